//! Shared test helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use vecstore::config::IndexConfig;
use vecstore::domain::entities::document::Metadata;
use vecstore::domain::error::DomainError;
use vecstore::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use vecstore::VecStore;

/// Deterministic bag-of-bytes embedder; identical texts get identical vectors.
pub struct HashEmbedder {
    dimension: usize,
    model: String,
    calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self::with_dimension(16)
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            model: "hash-test".to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0_f32; self.dimension];
        for b in text.bytes() {
            v[b as usize % self.dimension] += 1.0;
        }
        v
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Embedder standing in for an unreachable API.
pub struct FailingEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(
        &self,
        _texts: &[String],
        _input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        Err(DomainError::Embedding("connection refused".into()))
    }

    fn dimension(&self) -> usize {
        0
    }

    fn model(&self) -> &str {
        "unreachable"
    }
}

/// Embedder that drops the last vector of every batch.
pub struct ShortEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for ShortEmbedder {
    async fn embed(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let mut vectors = HashEmbedder::new().embed(texts, input_type).await?;
        vectors.pop();
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        16
    }

    fn model(&self) -> &str {
        "short"
    }
}

pub fn setup() -> (TempDir, VecStore) {
    let dir = TempDir::new().unwrap();
    let store = VecStore::with_config(IndexConfig::default().with_vector_dir(dir.path()));
    (dir, store)
}

pub fn embedder() -> Arc<HashEmbedder> {
    Arc::new(HashEmbedder::new())
}

pub fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn meta(value: serde_json::Value) -> Metadata {
    value.as_object().cloned().expect("metadata must be a JSON object")
}
