use std::path::PathBuf;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    #[error("The counter window must be created on the main thread")]
    NotMainThread,

    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    #[error("The counter window is already running")]
    AlreadyRunning,

    #[cfg_attr(target_os = "macos", allow(dead_code))]
    #[error("Failed to listen for Ctrl+C: {0}")]
    Signal(#[from] std::io::Error),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Text document loading errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Clipboard access errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write clipboard: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts_to_app_error() {
        let err: AppError = ConfigError::Invalid {
            key: "clipboard.poll_interval_ms",
            reason: "must be greater than zero".to_string(),
        }
        .into();

        assert!(matches!(err, AppError::Config(ConfigError::Invalid { .. })));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for clipboard.poll_interval_ms: must be greater than zero"
        );
    }

    #[test]
    fn test_startup_error_messages() {
        assert_eq!(
            AppError::NotMainThread.to_string(),
            "The counter window must be created on the main thread"
        );
        assert_eq!(
            AppError::AlreadyRunning.to_string(),
            "The counter window is already running"
        );
    }
}
