use crate::domain::entities::document::Document;
use crate::domain::entities::index_info::IndexInfo;
use crate::domain::error::DomainError;
use crate::domain::ports::index_storage::{CleanupReport, IndexStorage};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::index_name::IndexName;
use crate::infrastructure::fs::cleanup::remove_index_files;
use crate::infrastructure::sqlite::vector_store::SqliteVectorStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

pub const INDEX_FILE_EXTENSION: &str = "db";

/// One SQLite file per index: `<dir>/<name>.db`.
pub struct SqliteIndexStorage {
    dir: PathBuf,
}

impl SqliteIndexStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn index_path(&self, name: &IndexName) -> PathBuf {
        self.dir.join(format!("{}{}", name.file_prefix(), INDEX_FILE_EXTENSION))
    }
}

impl IndexStorage for SqliteIndexStorage {
    fn open(&self, name: &IndexName) -> Result<Arc<dyn VectorStore>, DomainError> {
        let path = self.index_path(name);
        if !path.is_file() {
            return Err(DomainError::NotFound(format!(
                "Index '{name}' not found in {}",
                self.dir.display()
            )));
        }
        Ok(Arc::new(SqliteVectorStore::open(&path)?))
    }

    fn create(
        &self,
        name: &IndexName,
        info: &IndexInfo,
        documents: &[Document],
        vectors: &[Vec<f32>],
    ) -> Result<Arc<dyn VectorStore>, DomainError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DomainError::Io(format!("Cannot create {}: {e}", self.dir.display()))
        })?;
        let path = self.index_path(name);
        // A leftover file would merge old documents into the new index.
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                DomainError::Io(format!("Cannot replace {}: {e}", path.display()))
            })?;
        }
        match SqliteVectorStore::create(&path, info, documents, vectors) {
            Ok(store) => Ok(Arc::new(store)),
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&path) {
                    if remove_err.kind() != std::io::ErrorKind::NotFound {
                        warn!(
                            path = %path.display(),
                            error = %remove_err,
                            "Failed to remove partial index"
                        );
                    }
                }
                Err(e)
            }
        }
    }

    fn remove(&self, name: &IndexName) -> CleanupReport {
        remove_index_files(&self.dir, name)
    }

    fn location(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::document::Metadata;
    use tempfile::TempDir;

    fn name(s: &str) -> IndexName {
        IndexName::new(s).unwrap()
    }

    #[test]
    fn create_writes_one_file_per_index() {
        let dir = TempDir::new().unwrap();
        let storage = SqliteIndexStorage::new(dir.path());
        let docs = [Document::new(0, "a".into(), Metadata::new())];
        let store = storage
            .create(&name("docs"), &IndexInfo::new("docs", "m", 1), &docs, &[vec![1.0]])
            .unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert!(dir.path().join("docs.db").is_file());
        assert_eq!(storage.open(&name("docs")).unwrap().count().unwrap(), 1);
    }

    #[test]
    fn failed_create_removes_the_index_file() {
        let dir = TempDir::new().unwrap();
        let storage = SqliteIndexStorage::new(dir.path());
        let doc = Document::new(0, "a".into(), Metadata::new());
        let err = storage
            .create(
                &name("docs"),
                &IndexInfo::new("docs", "m", 1),
                &[doc.clone(), doc],
                &[vec![1.0], vec![1.0]],
            )
            .err()
            .unwrap();
        assert!(matches!(err, DomainError::Database(_)));
        assert!(!dir.path().join("docs.db").exists());

        let err = storage.open(&name("docs")).err().unwrap();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
