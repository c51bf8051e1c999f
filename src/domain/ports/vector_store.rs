use crate::domain::entities::document::{Document, Metadata, ScoredDocument};
use crate::domain::entities::index_info::IndexInfo;
use crate::domain::error::DomainError;

pub trait VectorStore: Send + Sync {
    /// Stores `documents[i]` with `vectors[i]` atomically.
    fn insert(&self, documents: &[Document], vectors: &[Vec<f32>]) -> Result<(), DomainError>;
    fn search_similar(
        &self,
        vector: &[f32],
        limit: usize,
        filter: Option<&Metadata>,
    ) -> Result<Vec<ScoredDocument>, DomainError>;
    fn documents(&self) -> Result<Vec<Document>, DomainError>;
    fn count(&self) -> Result<usize, DomainError>;
    fn info(&self) -> Result<IndexInfo, DomainError>;
}
