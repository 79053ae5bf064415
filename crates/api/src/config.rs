//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use agora_metadata::{InitializationError, Metadata, DEFAULT_DEFINITION};

pub const BIND_ADDR_ENV: &str = "AGORA_BIND_ADDR";
pub const METADATA_PATH_ENV: &str = "AGORA_METADATA_PATH";
pub const MODERATION_API_KEY_ENV: &str = "MODERATION_API_KEY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_MODERATION_API_KEY: &str = "dev-moderation-key";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Metadata definition file; the embedded definition is used when unset.
    pub metadata_path: Option<PathBuf>,
    pub moderation_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let raw_addr = get(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_ENV,
                value: raw_addr.clone(),
            })?;

        let moderation_api_key = get(MODERATION_API_KEY_ENV).unwrap_or_else(|| {
            tracing::warn!("{MODERATION_API_KEY_ENV} not set; using insecure dev default");
            DEV_MODERATION_API_KEY.to_string()
        });

        Ok(Self {
            bind_addr,
            metadata_path: get(METADATA_PATH_ENV).map(PathBuf::from),
            moderation_api_key,
        })
    }

    /// Load and resolve the configured metadata definition.
    pub fn load_metadata(&self) -> Result<Metadata, InitializationError> {
        match &self.metadata_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading metadata definition");
                Metadata::from_path(path)
            }
            None => {
                tracing::info!("using embedded metadata definition");
                Metadata::from_toml_str(DEFAULT_DEFINITION)
            }
        }
    }
}
