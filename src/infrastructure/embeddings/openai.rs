use crate::config::EmbeddingConfig;
use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::infrastructure::embeddings::factory::{
    build_client, resolve_api_key, resolve_base_url, validate_options,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const API_KEY_ENV: &str = "OPENAI_API_KEY";
const RESERVED_OPTIONS: &[&str] = &["input", "model"];

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    options: Metadata,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    input: &'a [String],
    model: &'a str,
    #[serde(flatten)]
    options: &'a Metadata,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl OpenAiProvider {
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, DomainError> {
        validate_options(&config.options, RESERVED_OPTIONS)?;
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            api_key: resolve_api_key(config.api_key.as_deref(), API_KEY_ENV)?,
            model: config.model.clone(),
            base_url: resolve_base_url(config.base_url.as_deref(), DEFAULT_BASE_URL)?,
            options: config.options.clone(),
        })
    }

    fn model_dimension(model: &str, options: &Metadata) -> usize {
        if let Some(dims) = options.get("dimensions").and_then(|v| v.as_u64()) {
            return dims as usize;
        }
        match model {
            "text-embedding-ada-002" | "text-embedding-3-small" => 1536,
            "text-embedding-3-large" => 3072,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let url = format!("{}/v1/embeddings", self.base_url);

        let resp = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&OpenAiRequest {
                input: texts,
                model: &self.model,
                options: &self.options,
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("OpenAI API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("OpenAI API {status}: {body}")));
        }

        let mut result: OpenAiResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Parse error: {e}")))?;
        result.data.sort_by_key(|d| d.index);
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model, &self.options)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dimension_follows_model_and_override() {
        let none = Metadata::new();
        assert_eq!(OpenAiProvider::model_dimension("text-embedding-ada-002", &none), 1536);
        assert_eq!(OpenAiProvider::model_dimension("text-embedding-3-large", &none), 3072);
        assert_eq!(OpenAiProvider::model_dimension("custom-model", &none), 0);
        let options = json!({"dimensions": 256}).as_object().cloned().unwrap();
        assert_eq!(OpenAiProvider::model_dimension("text-embedding-3-large", &options), 256);
    }

    #[test]
    fn request_body_carries_options_verbatim() {
        let options = json!({"user": "svc", "encoding_format": "float"})
            .as_object()
            .cloned()
            .unwrap();
        let input = vec!["hello".to_string()];
        let body = serde_json::to_value(OpenAiRequest {
            input: &input,
            model: "text-embedding-ada-002",
            options: &options,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "input": ["hello"],
                "model": "text-embedding-ada-002",
                "user": "svc",
                "encoding_format": "float"
            })
        );
    }
}
