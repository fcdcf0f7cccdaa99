//! Admin HTTP server
//!
//! Serves coordination statistics and pipeline health, and translates
//! recovery results into HTTP responses.

pub mod response;
pub mod routes;
pub mod server;
pub mod state;


pub use response::into_http_response;
pub use server::HttpServer;
pub use state::AppState;
