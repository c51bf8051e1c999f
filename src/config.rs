//! Process-wide configuration, read once at startup.
//!
//! Every setting has a compiled-in default and can be overridden through
//! `VECSTORE_*` environment variables or the `with_*` builders (tests point
//! [`IndexConfig`] at a temporary directory this way).

use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::values::provider_kind::ProviderKind;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_VECTOR_DIR: &str = "/vectors";
pub const DEFAULT_INDEX_NAME: &str = "openai-ada-fsdl";
pub const DEFAULT_EMBED_BATCH_SIZE: usize = 32;
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, DomainError>
where
    T::Err: fmt::Display,
{
    env_var(key)
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| DomainError::Config(format!("Invalid {key} '{v}': {e}")))
        })
        .transpose()
}

/// Where indexes live and how they are built.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub vector_dir: PathBuf,
    pub index_name: String,
    /// Documents sent to the embedding engine per request.
    pub embed_batch_size: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            vector_dir: PathBuf::from(DEFAULT_VECTOR_DIR),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            embed_batch_size: DEFAULT_EMBED_BATCH_SIZE,
        }
    }
}

impl IndexConfig {
    /// Reads `VECSTORE_DIR`, `VECSTORE_INDEX_NAME` and `VECSTORE_BATCH_SIZE`.
    pub fn from_env() -> Result<Self, DomainError> {
        let mut config = Self::default();
        if let Some(dir) = env_var("VECSTORE_DIR") {
            config.vector_dir = PathBuf::from(dir);
        }
        if let Some(name) = env_var("VECSTORE_INDEX_NAME") {
            config.index_name = name;
        }
        if let Some(size) = parse_env::<usize>("VECSTORE_BATCH_SIZE")? {
            config = config.with_batch_size(size)?;
        }
        Ok(config)
    }

    pub fn with_vector_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vector_dir = dir.into();
        self
    }

    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::Config("Embedding batch size must be at least 1".into()));
        }
        self.embed_batch_size = size;
        Ok(self)
    }
}

/// Settings for the embedding engine factory. `options` are forwarded
/// verbatim into every embedding request body.
#[derive(Clone)]
pub struct EmbeddingConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Falls back to the provider's conventional env var when `None`.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub options: Metadata,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: None,
            options: Metadata::new(),
        }
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("options", &self.options)
            .finish()
    }
}

impl EmbeddingConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Reads `VECSTORE_EMBEDDING_{PROVIDER,MODEL,API_KEY,BASE_URL}` and
    /// `VECSTORE_EMBEDDING_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, DomainError> {
        let mut config = Self::default();
        if let Some(provider) = env_var("VECSTORE_EMBEDDING_PROVIDER") {
            config.provider = provider.parse().map_err(DomainError::Config)?;
        }
        if let Some(model) = env_var("VECSTORE_EMBEDDING_MODEL") {
            config.model = model;
        }
        config.api_key = env_var("VECSTORE_EMBEDDING_API_KEY");
        config.base_url = env_var("VECSTORE_EMBEDDING_BASE_URL");
        config.timeout_secs = parse_env("VECSTORE_EMBEDDING_TIMEOUT_SECS")?;
        Ok(config)
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_index() {
        let config = IndexConfig::default();
        assert_eq!(config.vector_dir, PathBuf::from("/vectors"));
        assert_eq!(config.index_name, "openai-ada-fsdl");
        assert_eq!(EmbeddingConfig::default().model, "text-embedding-ada-002");
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(IndexConfig::default().with_batch_size(0).is_err());
        assert_eq!(IndexConfig::default().with_batch_size(8).unwrap().embed_batch_size, 8);
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = EmbeddingConfig::default().with_api_key("sk-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
