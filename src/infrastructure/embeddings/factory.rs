use crate::config::EmbeddingConfig;
use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::values::provider_kind::ProviderKind;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::embeddings::voyage::VoyageProvider;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;

/// Constructs the embedding engine described by `config`. Nothing is sent over
/// the network here; failures are configuration problems only.
pub fn build_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    if config.model.trim().is_empty() {
        return Err(DomainError::Config("Embedding model must not be empty".into()));
    }
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::from_config(config)?),
        ProviderKind::Voyage => Arc::new(VoyageProvider::from_config(config)?),
    };
    Ok(provider)
}

pub(crate) fn build_client(timeout_secs: Option<u64>) -> Result<Client, DomainError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        if secs == 0 {
            return Err(DomainError::Config("Timeout must be at least one second".into()));
        }
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {e}")))
}

pub(crate) fn resolve_api_key(
    explicit: Option<&str>,
    env_key: &str,
) -> Result<String, DomainError> {
    let key = match explicit {
        Some(key) => key.to_string(),
        None => std::env::var(env_key).unwrap_or_default(),
    };
    if key.trim().is_empty() {
        return Err(DomainError::Config(format!(
            "Missing API key: set api_key or {env_key}"
        )));
    }
    Ok(key)
}

pub(crate) fn resolve_base_url(
    explicit: Option<&str>,
    default: &str,
) -> Result<String, DomainError> {
    let raw = explicit.unwrap_or(default);
    let url = Url::parse(raw)
        .map_err(|e| DomainError::Config(format!("Invalid base URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::Config(format!(
            "Invalid base URL '{raw}': scheme must be http or https"
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Options are forwarded verbatim, except keys the request itself owns.
pub(crate) fn validate_options(options: &Metadata, reserved: &[&str]) -> Result<(), DomainError> {
    match reserved.iter().find(|key| options.contains_key(**key)) {
        Some(key) => Err(DomainError::Config(format!(
            "Option '{key}' is set by the embedding engine and cannot be overridden"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_empty_key_is_missing() {
        assert!(resolve_api_key(Some(""), "VECSTORE_TEST_UNSET_KEY").is_err());
        assert_eq!(resolve_api_key(Some("sk-1"), "VECSTORE_TEST_UNSET_KEY").unwrap(), "sk-1");
    }

    #[test]
    fn base_url_must_be_http() {
        assert_eq!(
            resolve_base_url(Some("http://localhost:8080/"), "https://x").unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(
            resolve_base_url(None, "https://api.openai.com").unwrap(),
            "https://api.openai.com"
        );
        assert!(resolve_base_url(Some("not a url"), "https://x").is_err());
        assert!(resolve_base_url(Some("ftp://host"), "https://x").is_err());
    }

    #[test]
    fn reserved_options_are_rejected() {
        let mut options = Metadata::new();
        options.insert("user".into(), "svc".into());
        assert!(validate_options(&options, &["input", "model"]).is_ok());
        options.insert("model".into(), "other".into());
        assert!(validate_options(&options, &["input", "model"]).is_err());
    }
}
