use crate::application::documents::{check_pairs, embed_documents, vector_dimension};
use crate::domain::entities::document::{Document, Metadata, ScoredDocument};
use crate::domain::entities::index_info::IndexInfo;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::VectorStore;
use std::sync::Arc;
use tracing::debug;

/// An opened index bound to the embedding engine used for its queries.
pub struct VectorIndex {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    info: IndexInfo,
    batch_size: usize,
}

impl VectorIndex {
    pub(crate) fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        info: IndexInfo,
        batch_size: usize,
    ) -> Self {
        Self { store, embedder, info, batch_size }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn info(&self) -> &IndexInfo {
        &self.info
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        self.store.count()
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.store.count()? == 0)
    }

    /// All stored documents in insertion order.
    pub fn documents(&self) -> Result<Vec<Document>, DomainError> {
        self.store.documents()
    }

    pub async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        if k == 0 {
            return Ok(vec![]);
        }
        let vector = self.embed_query(query).await?;
        self.store.search_similar(&vector, k, None)
    }

    /// Like [`similarity_search`](Self::similarity_search), restricted to
    /// documents whose metadata contains every pair in `filter`.
    pub async fn similarity_search_with_filter(
        &self,
        query: &str,
        k: usize,
        filter: &Metadata,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        if k == 0 {
            return Ok(vec![]);
        }
        let vector = self.embed_query(query).await?;
        self.store.search_similar(&vector, k, Some(filter))
    }

    pub fn similarity_search_by_vector(
        &self,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        self.check_dimension(vector.len())?;
        self.store.search_similar(vector, k, None)
    }

    /// Embeds and appends documents, returning their new ids.
    pub async fn add_texts(
        &self,
        texts: &[String],
        metadatas: &[Metadata],
    ) -> Result<Vec<String>, DomainError> {
        check_pairs(texts, metadatas)?;
        let vectors = embed_documents(self.embedder.as_ref(), texts, self.batch_size).await?;
        self.check_dimension(vector_dimension(&vectors)?)?;

        let offset = self.store.count()?;
        let documents: Vec<Document> = texts
            .iter()
            .zip(metadatas)
            .enumerate()
            .map(|(i, (text, metadata))| Document::new(offset + i, text.clone(), metadata.clone()))
            .collect();
        self.store.insert(&documents, &vectors)?;
        debug!(index = %self.info.name, added = documents.len(), "Appended documents");
        Ok(documents.into_iter().map(|d| d.id).collect())
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        let vector = self
            .embedder
            .embed(&[query.to_string()], InputType::Query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::Embedding("Embedding engine returned no vector for query".into())
            })?;
        self.check_dimension(vector.len())?;
        Ok(vector)
    }

    fn check_dimension(&self, found: usize) -> Result<(), DomainError> {
        if found != self.info.dimension {
            return Err(DomainError::DimensionMismatch {
                expected: self.info.dimension,
                found,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("info", &self.info)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}
