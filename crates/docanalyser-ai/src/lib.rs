//! Language-model side of document analysis: the backend contract, the
//! analysis prompt, and normalization of whatever the model sends back.

pub mod backend;
pub mod normalizer;
pub mod prompt;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use backend::{AnalysisBackend, BackendError, BackendReply};
pub use normalizer::{Normalized, ParseStrategy, normalize};
pub use prompt::build_analysis_prompt;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiBackend, GeminiConfig};
