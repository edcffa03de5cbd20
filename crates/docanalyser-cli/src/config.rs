//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use docanalyser_ai::GeminiConfig;
use docanalyser_ai::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};

#[derive(Parser, Debug)]
#[command(name = "docanalyser", version)]
#[command(about = "Serve legal and financial risk analysis of document text over HTTP")]
pub struct Cli {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Gemini API key. Requests fail at call time when unset.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model identifier.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Gemini REST API.
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Seconds before a model call is abandoned.
    #[arg(long, env = "BACKEND_TIMEOUT_SECS", default_value_t = 120)]
    pub backend_timeout_secs: u64,
}

/// Load a `.env` file from the working directory or one of its parents into
/// the process environment, so it feeds the `env` fallbacks above. Variables
/// already set in the environment take precedence. Returns the file used.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.backend_timeout_secs),
        }
    }
}
