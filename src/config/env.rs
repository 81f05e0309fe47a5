//! Typed readers for environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use super::ConfigError;

pub(crate) fn parse_path(var_name: &str, default: PathBuf) -> PathBuf {
    env::var(var_name).map(PathBuf::from).unwrap_or(default)
}

pub(crate) fn parse_optional_path(var_name: &str) -> Option<PathBuf> {
    env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn parse_string(var_name: &str, default: String) -> String {
    env::var(var_name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

/// Set and non-empty, apart from `0`/`false`/`no`/`off`.
pub(crate) fn parse_flag(var_name: &str) -> bool {
    env::var(var_name)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            !v.is_empty() && !matches!(v.as_str(), "0" | "false" | "no" | "off")
        })
        .unwrap_or(false)
}

/// Lenient: an unparseable value falls back to `default`.
pub(crate) fn parse_u64(var_name: &str, default: u64) -> u64 {
    env::var(var_name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Strict: an unparseable value is an error.
pub(crate) fn parse_number<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    match env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidNumber {
                name: var_name,
                value,
                source,
            }),
        Err(_) => Ok(default),
    }
}
