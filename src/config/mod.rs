//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CLAUSEWATCH_*` environment variables.
//! Pipeline tuning (chunk sizes, k, N, timeouts) lives in
//! [`PipelineConfig`](crate::pipeline::PipelineConfig).

pub(crate) mod env;
pub mod error;


pub use error::ConfigError;

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::cache::DEFAULT_MEMORY_CAPACITY;
use crate::constants::DEFAULT_GENERATOR_MODEL;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CLAUSEWATCH_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory for persisted analysis results. Default: `./.data`.
    pub storage_path: PathBuf,

    /// Sentence embedding model directory (config.json, model.safetensors, tokenizer.json).
    pub embedding_model_path: Option<PathBuf>,

    /// Cross-encoder model directory, same layout.
    pub reranker_path: Option<PathBuf>,

    /// Generative model name passed to `genai`. Default: `gemini-2.5-flash`.
    pub generator_model: String,

    /// Answer every concern with "NO" instead of calling a provider.
    pub offline_generator: bool,

    /// Max results held in memory in front of the store. Default: `10_000`.
    pub memory_cache_capacity: u64,

    /// JSON array of concern strings replacing the default checklist.
    pub checklist_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            storage_path: PathBuf::from("./.data"),
            embedding_model_path: None,
            reranker_path: None,
            generator_model: DEFAULT_GENERATOR_MODEL.to_string(),
            offline_generator: false,
            memory_cache_capacity: DEFAULT_MEMORY_CAPACITY,
            checklist_path: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "CLAUSEWATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "CLAUSEWATCH_BIND_ADDR";
    const ENV_STORAGE_PATH: &'static str = "CLAUSEWATCH_STORAGE_PATH";
    const ENV_EMBEDDING_MODEL_PATH: &'static str = "CLAUSEWATCH_EMBEDDING_MODEL_PATH";
    const ENV_RERANKER_PATH: &'static str = "CLAUSEWATCH_RERANKER_PATH";
    const ENV_GENERATOR_MODEL: &'static str = "CLAUSEWATCH_GENERATOR_MODEL";
    const ENV_OFFLINE_GENERATOR: &'static str = "CLAUSEWATCH_OFFLINE_GENERATOR";
    const ENV_MEMORY_CACHE_CAPACITY: &'static str = "CLAUSEWATCH_MEMORY_CACHE_CAPACITY";
    const ENV_CHECKLIST_PATH: &'static str = "CLAUSEWATCH_CHECKLIST_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            port: Self::parse_port_from_env(defaults.port)?,
            bind_addr: Self::parse_bind_addr_from_env(defaults.bind_addr)?,
            storage_path: env::parse_path(Self::ENV_STORAGE_PATH, defaults.storage_path),
            embedding_model_path: env::parse_optional_path(Self::ENV_EMBEDDING_MODEL_PATH),
            reranker_path: env::parse_optional_path(Self::ENV_RERANKER_PATH),
            generator_model: env::parse_string(
                Self::ENV_GENERATOR_MODEL,
                defaults.generator_model,
            ),
            offline_generator: env::parse_flag(Self::ENV_OFFLINE_GENERATOR),
            memory_cache_capacity: env::parse_u64(
                Self::ENV_MEMORY_CACHE_CAPACITY,
                defaults.memory_cache_capacity,
            ),
            checklist_path: env::parse_optional_path(Self::ENV_CHECKLIST_PATH),
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        if let Some(ref path) = self.embedding_model_path {
            require_dir(path)?;
        }

        if let Some(ref path) = self.reranker_path {
            require_dir(path)?;
        }

        if let Some(ref path) = self.checklist_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if self.memory_cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MEMORY_CACHE_CAPACITY,
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match std::env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match std::env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }
}

fn require_dir(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
