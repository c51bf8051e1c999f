use crate::config::EmbeddingConfig;
use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::infrastructure::embeddings::factory::{
    build_client, resolve_api_key, resolve_base_url, validate_options,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.voyageai.com";
const API_KEY_ENV: &str = "VOYAGE_API_KEY";
const RESERVED_OPTIONS: &[&str] = &["input", "model", "input_type"];

pub struct VoyageProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    options: Metadata,
}

#[derive(Serialize)]
struct VoyageRequest<'a> {
    input: &'a [String],
    model: &'a str,
    input_type: &'static str,
    #[serde(flatten)]
    options: &'a Metadata,
}

#[derive(Deserialize)]
struct VoyageResponse {
    data: Vec<VoyageEmbedding>,
}

#[derive(Deserialize)]
struct VoyageEmbedding {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl VoyageProvider {
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
        if let Some(dims) = options.get("output_dimension").and_then(|v| v.as_u64()) {
            return dims as usize;
        }
        match model {
            "voyage-4-lite" => 512,
            "voyage-3-lite" => 512,
            "voyage-3" => 1024,
            "voyage-3-large" | "voyage-large-2" => 1536,
            "voyage-code-3" => 1024,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for VoyageProvider {
    async fn embed(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let it = match input_type {
            InputType::Document => "document",
            InputType::Query => "query",
        };

        let url = format!("{}/v1/embeddings", self.base_url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&VoyageRequest {
                input: texts,
                model: &self.model,
                input_type: it,
                options: &self.options,
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Voyage API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!(
                "Voyage API {status}: {body}"
            )));
        }

        let mut result: VoyageResponse = resp
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
