//! # CLI Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Script      │  │        Field            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  Script{line}   │  │  Core (invalid bounds,  │ │
//! │  │  Toml           │  │  Json           │  │  digit options, ...)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Warnings raised by the field are part of normal output, never errors.

use numfield_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Reading a config file or script failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for a field configuration.
    #[error("Failed to load config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Writing a reaction failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The field rejected its configuration.
    #[error("Invalid field configuration: {0}")]
    Core(#[from] CoreError),

    /// A script line could not be understood.
    #[error("Script line {line}: {reason}")]
    Script { line: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_wrapped() {
        let err: AppError = CoreError::EmptyLocale.into();
        assert!(err.to_string().starts_with("Invalid field configuration"));
    }

    #[test]
    fn test_script_error_names_line() {
        let err = AppError::Script {
            line: 3,
            reason: "unknown step".into(),
        };
        assert_eq!(err.to_string(), "Script line 3: unknown step");
    }
}
