//! Validation trait definition

/// Validation for configuration structures
///
/// Returns a human-readable description of the first problem found.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
