use crate::domain::entities::document::Document;
use crate::domain::entities::index_info::IndexInfo;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::index_name::IndexName;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of removing the files of an index. Failures never abort the sweep.
#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Where named indexes are persisted.
pub trait IndexStorage: Send + Sync {
    /// Opens an existing index; `DomainError::NotFound` when none is stored
    /// under `name`.
    fn open(&self, name: &IndexName) -> Result<Arc<dyn VectorStore>, DomainError>;
    /// Writes a complete index described by `info`. Either every document is
    /// stored or nothing readable is left under `name`.
    fn create(
        &self,
        name: &IndexName,
        info: &IndexInfo,
        documents: &[Document],
        vectors: &[Vec<f32>],
    ) -> Result<Arc<dyn VectorStore>, DomainError>;
    /// Best-effort removal of every file belonging to `name`.
    fn remove(&self, name: &IndexName) -> CleanupReport;
    fn location(&self) -> &Path;
}
