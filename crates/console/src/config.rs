//! Console configuration loaded from environment variables.

use std::path::PathBuf;

/// Runtime configuration for the console.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Backend base URL (no trailing slash).
    pub api_base_url: String,
    /// Directory downloaded recordings are written into.
    pub download_dir: PathBuf,
}

impl ConsoleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default                 |
    /// |----------------|-------------------------|
    /// | `API_BASE_URL` | `http://127.0.0.1:8000` |
    /// | `DOWNLOAD_DIR` | `.`                     |
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".into())
            .trim_end_matches('/')
            .to_string();

        let download_dir = std::env::var("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            api_base_url,
            download_dir,
        }
    }
}
