//! Statistics register
//!
//! Tallies classifications by error type and results by action for the
//! lifetime of one coordinator.

use super::result::ActionTaken;
use super::types::ErrorType;
use crate::config::CoordinatorConfig;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    by_type: [u64; ErrorType::COUNT],
    by_action: [u64; ActionTaken::COUNT],
}

/// Shared failure counters
///
/// A single mutex keeps the total and the per-type counts consistent with
/// each other; it is only ever held for an increment or a copy.
#[derive(Debug, Default)]
pub struct StatsRegister {
    counters: Mutex<Counters>,
}

impl StatsRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified error
    pub fn record_error(&self, error_type: ErrorType) {
        let mut counters = self.counters.lock();
        counters.total += 1;
        counters.by_type[error_type.index()] += 1;
    }

    /// Count one handling result
    pub fn record_action(&self, action: ActionTaken) {
        self.counters.lock().by_action[action.index()] += 1;
    }

    pub fn total_errors(&self) -> u64 {
        self.counters.lock().total
    }

    pub fn count_for(&self, error_type: ErrorType) -> u64 {
        self.counters.lock().by_type[error_type.index()]
    }

    /// Copy the counters out together with the active configuration
    pub fn snapshot(&self, config: &CoordinatorConfig) -> ErrorStats {
        let counters = self.counters.lock();
        ErrorStats {
            total_errors: counters.total,
            errors_by_type: ErrorType::ALL
                .iter()
                .map(|t| (*t, counters.by_type[t.index()]))
                .collect(),
            actions_taken: ActionTaken::ALL
                .iter()
                .map(|a| (*a, counters.by_action[a.index()]))
                .collect(),
            config: config.clone(),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        *self.counters.lock() = Counters::default();
    }
}

/// Point-in-time view of the register
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorStats {
    pub total_errors: u64,
    pub errors_by_type: BTreeMap<ErrorType, u64>,
    pub actions_taken: BTreeMap<ActionTaken, u64>,
    pub config: CoordinatorConfig,
}
