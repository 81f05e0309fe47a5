use std::path::PathBuf;
use thiserror::Error;

/// Rejected `CLAUSEWATCH_*` settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    #[error("CLAUSEWATCH_PORT '{value}' is not a number: {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("CLAUSEWATCH_BIND_ADDR '{value}' is not an IP address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("{name}='{value}' is not a whole number: {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Parsed, but outside the accepted range.
    #[error("invalid {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("configured path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("expected a file: {path}")]
    NotAFile { path: PathBuf },

    #[error("expected a directory: {path}")]
    NotADirectory { path: PathBuf },
}
