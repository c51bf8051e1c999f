use crate::application::vector_index::VectorIndex;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::index_storage::IndexStorage;
use crate::domain::values::index_name::IndexName;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ConnectIndexUseCase {
    storage: Arc<dyn IndexStorage>,
    batch_size: usize,
}

impl ConnectIndexUseCase {
    pub fn new(storage: Arc<dyn IndexStorage>, batch_size: usize) -> Self {
        Self { storage, batch_size }
    }

    pub fn execute(
        &self,
        name: &IndexName,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<VectorIndex, DomainError> {
        let store = self.storage.open(name)?;
        let info = store.info()?;

        let provider_dim = embedder.dimension();
        if provider_dim > 0 && provider_dim != info.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: info.dimension,
                found: provider_dim,
            });
        }
        if info.model != embedder.model() {
            warn!(
                index = %name,
                stored_model = %info.model,
                engine_model = %embedder.model(),
                "Index was built with a different embedding model"
            );
        }

        info!(
            index = %name,
            location = %self.storage.location().display(),
            dimension = info.dimension,
            "Connected to vector index"
        );
        Ok(VectorIndex::new(store, embedder, info, self.batch_size))
    }
}
