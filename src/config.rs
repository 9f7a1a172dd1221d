//! Environment-driven settings for the binary.

use std::path::PathBuf;

/// Logging configuration read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// JSON log file; file logging is off when unset.
    pub file_path: Option<PathBuf>,
    /// Filter for the stderr layer.
    pub stderr_filter: String,
    /// Filter for the JSON file layer.
    pub json_filter: String,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            file_path: non_empty("LOG_FILE_PATH").map(PathBuf::from),
            stderr_filter: non_empty("RUST_LOG").unwrap_or_else(|| "warn".to_string()),
            json_filter: non_empty("RUST_LOG_JSON").unwrap_or_else(|| "debug".to_string()),
        }
    }
}
