//! HTTP front end for Verbum.
//!
//! Serves the read-only JSON endpoints over a directory of version files.
//! Version codes are validated against the configured closed set before any
//! query runs; query failures map to 404 or 400 with a JSON error body.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use server::VerbumServer;
pub use state::AppState;
