//! HTTP service: `POST /docanalyser` runs one analysis, `GET /health` reports liveness.

pub mod analysis;
pub mod error;
pub mod handlers;
pub mod router;
pub mod shutdown;

pub use analysis::{AnalysisError, Analyser};
pub use error::ApiError;
pub use router::{AppState, router, serve};
pub use shutdown::shutdown_signal;

#[cfg(test)]
mod testing;
