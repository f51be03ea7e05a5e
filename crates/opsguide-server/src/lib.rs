//! OpsGuide Server - HTTP surface
//!
//! Thin transport over `opsguide-core`: validates headers and payloads,
//! invokes the classification pipeline, and renders the documented JSON
//! contract. All real design content lives in the core crate.

#![warn(unreachable_pub)]

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::router;
pub use state::AppState;
