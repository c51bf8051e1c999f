pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::connect::ConnectIndexUseCase;
use crate::application::create_index::CreateIndexUseCase;
use crate::application::vector_index::VectorIndex;
use crate::config::{EmbeddingConfig, IndexConfig};
use crate::domain::entities::document::Metadata;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::index_storage::IndexStorage;
use crate::domain::values::index_name::IndexName;
use crate::infrastructure::embeddings::factory::build_provider;
use crate::infrastructure::sqlite::storage::SqliteIndexStorage;
use std::sync::Arc;
use tracing::error;

/// Entry point for loading, building and configuring vector indexes.
///
/// Every operation returns a `Result`; failures are also logged so the log
/// stream carries the same detail the caller sees.
pub struct VecStore {
    config: IndexConfig,
    connect_uc: ConnectIndexUseCase,
    create_uc: CreateIndexUseCase,
}

impl VecStore {
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self::with_config(IndexConfig::from_env()?))
    }

    pub fn with_config(config: IndexConfig) -> Self {
        let storage: Arc<dyn IndexStorage> =
            Arc::new(SqliteIndexStorage::new(config.vector_dir.clone()));
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: IndexConfig, storage: Arc<dyn IndexStorage>) -> Self {
        Self {
            connect_uc: ConnectIndexUseCase::new(storage.clone(), config.embed_batch_size),
            create_uc: CreateIndexUseCase::new(storage, config.embed_batch_size),
            config,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Opens the index persisted under `index_name`.
    pub fn connect_to_vector_index(
        &self,
        index_name: &str,
        embedding_engine: Arc<dyn EmbeddingProvider>,
    ) -> Result<VectorIndex, DomainError> {
        IndexName::new(index_name)
            .map_err(DomainError::InvalidInput)
            .and_then(|name| self.connect_uc.execute(&name, embedding_engine))
            .inspect_err(|e| error!(index = index_name, "Error connecting to vector index: {e}"))
    }

    /// Builds the embedding engine described by `config`.
    pub fn get_embedding_engine(
        config: &EmbeddingConfig,
    ) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        build_provider(config)
            .inspect_err(|e| {
                error!(model = %config.model, "Error initializing embedding engine: {e}")
            })
    }

    /// Replaces the index `index_name` with `documents`, paired by position with `metadatas`.
    pub async fn create_vector_index(
        &self,
        index_name: &str,
        embedding_engine: Arc<dyn EmbeddingProvider>,
        documents: &[String],
        metadatas: &[Metadata],
    ) -> Result<VectorIndex, DomainError> {
        let name = IndexName::new(index_name)
            .map_err(DomainError::InvalidInput)
            .inspect_err(|e| error!(index = index_name, "Error creating vector index: {e}"))?;
        self.create_uc
            .execute(&name, embedding_engine, documents, metadatas)
            .await
            .inspect_err(|e| error!(index = index_name, "Error creating vector index: {e}"))
    }

    /// [`connect_to_vector_index`](Self::connect_to_vector_index) for the configured default index.
    pub fn connect_default(
        &self,
        embedding_engine: Arc<dyn EmbeddingProvider>,
    ) -> Result<VectorIndex, DomainError> {
        self.connect_to_vector_index(&self.config.index_name, embedding_engine)
    }
}
