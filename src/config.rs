use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Embedding dimensionality shared by every collection this tooling manages.
///
/// Must match the output size of the embedding model used by the Q&A application.
pub const DEFAULT_VECTOR_SIZE: u64 = 1536;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6333;
const DEFAULT_COLLECTION: &str = "business_documents";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable {key}: {value:?}")]
    InvalidValue {
        /// Name of the offending variable.
        key: String,
        /// Raw value found in the environment.
        value: String,
    },
    /// Vector size resolved to zero.
    #[error("Vector size must be greater than zero")]
    ZeroVectorSize,
}

/// Runtime configuration shared by the operational commands.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hostname (or full base URL) of the Qdrant REST API.
    pub qdrant_host: String,
    /// Port of the Qdrant REST API.
    pub qdrant_port: u16,
    /// Name of the collection holding indexed documents.
    pub qdrant_collection_name: String,
    /// Optional API key sent to Qdrant by administrative calls.
    pub qdrant_api_key: Option<String>,
    /// Dimensionality of the vectors stored in the collection.
    pub vector_size: u64,
    /// Per-request timeout applied to every HTTP call.
    pub request_timeout: Duration,
}

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `QDRANT_COLLECTION_NAME`.
    pub collection: Option<String>,
    /// Replaces `EMBEDDING_DIMENSION`.
    pub vector_size: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables, falling back to documented defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Self {
            qdrant_host: read("QDRANT_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            qdrant_port: parse_or("QDRANT_PORT", read("QDRANT_PORT"), DEFAULT_PORT)?,
            qdrant_collection_name: read("QDRANT_COLLECTION_NAME")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            qdrant_api_key: read("QDRANT_API_KEY"),
            vector_size: parse_or(
                "EMBEDDING_DIMENSION",
                read("EMBEDDING_DIMENSION"),
                DEFAULT_VECTOR_SIZE,
            )?,
            request_timeout: Duration::from_secs(parse_or(
                "QDRANT_TIMEOUT_SECS",
                read("QDRANT_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?),
        };
        config.validate()
    }

    /// Apply command-line overrides, re-validating the result.
    pub fn apply(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(collection) = overrides.collection.filter(|name| !name.trim().is_empty()) {
            self.qdrant_collection_name = collection;
        }
        if let Some(size) = overrides.vector_size {
            self.vector_size = size;
        }
        self.validate()
    }

    /// Base URL of the Qdrant REST API.
    ///
    /// `QDRANT_HOST` may already carry a scheme (`https://qdrant.internal`); in that case
    /// the port is appended only when the host does not specify one.
    pub fn qdrant_url(&self) -> String {
        let host = self.qdrant_host.trim().trim_end_matches('/');
        match host.split_once("://") {
            Some((_, rest)) if rest.contains(':') => host.to_string(),
            Some(_) => format!("{host}:{}", self.qdrant_port),
            None => format!("http://{host}:{}", self.qdrant_port),
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.vector_size == 0 {
            return Err(ConfigError::ZeroVectorSize);
        }
        Ok(self)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load configuration from `.env` and the environment, apply overrides, and install it in
/// the global cache. Later calls return the configuration installed first.
pub fn init_config(overrides: ConfigOverrides) -> Result<&'static Config, ConfigError> {
    if let Some(existing) = CONFIG.get() {
        return Ok(existing);
    }
    dotenvy::dotenv().ok();
    let config = Config::from_env()?.apply(overrides)?;
    tracing::debug!(
        qdrant_url = %config.qdrant_url(),
        collection = %config.qdrant_collection_name,
        vector_size = config.vector_size,
        has_api_key = config.qdrant_api_key.is_some(),
        "Loaded configuration"
    );
    Ok(CONFIG.get_or_init(|| config))
}
