use crate::application::documents::{check_pairs, embed_documents, vector_dimension};
use crate::application::vector_index::VectorIndex;
use crate::domain::entities::document::{Document, Metadata};
use crate::domain::entities::index_info::IndexInfo;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::index_storage::IndexStorage;
use crate::domain::values::index_name::IndexName;
use std::sync::Arc;
use tracing::{info, warn};

pub struct CreateIndexUseCase {
    storage: Arc<dyn IndexStorage>,
    batch_size: usize,
}

impl CreateIndexUseCase {
    pub fn new(storage: Arc<dyn IndexStorage>, batch_size: usize) -> Self {
        Self { storage, batch_size }
    }

    /// Replaces index `name` with `texts` embedded by `embedder`.
    ///
    /// Input is validated before anything is deleted. Old files are then
    /// removed best-effort; a file that cannot be deleted is logged and the
    /// build continues. Every call re-embeds all texts.
    pub async fn execute(
        &self,
        name: &IndexName,
        embedder: Arc<dyn EmbeddingProvider>,
        texts: &[String],
        metadatas: &[Metadata],
    ) -> Result<VectorIndex, DomainError> {
        check_pairs(texts, metadatas)?;

        let report = self.storage.remove(name);
        if !report.is_clean() {
            warn!(
                index = %name,
                failed = report.failed.len(),
                "Some existing index files could not be deleted"
            );
        }

        let vectors = embed_documents(embedder.as_ref(), texts, self.batch_size).await?;
        let dimension = vector_dimension(&vectors)?;

        let info = IndexInfo::new(name.as_str(), embedder.model(), dimension);
        let documents: Vec<Document> = texts
            .iter()
            .zip(metadatas)
            .enumerate()
            .map(|(i, (text, metadata))| Document::new(i, text.clone(), metadata.clone()))
            .collect();
        let store = self.storage.create(name, &info, &documents, &vectors)?;

        info!(
            index = %name,
            documents = documents.len(),
            dimension,
            replaced_files = report.deleted.len(),
            "Created vector index"
        );
        Ok(VectorIndex::new(store, embedder, info, self.batch_size))
    }
}
