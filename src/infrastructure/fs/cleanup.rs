use crate::domain::ports::index_storage::CleanupReport;
use crate::domain::values::index_name::IndexName;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Files in `dir` named `<name>.<anything>`. A missing directory has no files.
pub fn index_files(dir: &Path, name: &IndexName) -> Vec<PathBuf> {
    let prefix = name.file_prefix();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(dir = %dir.display(), error = %e, "Cannot list index directory");
            }
            return vec![];
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|file_name| {
                    file_name.len() > prefix.len() && file_name.starts_with(&prefix)
                })
        })
        .map(|entry| entry.path())
        .collect();
    files.sort();
    files
}

/// Deletes every file of index `name`, one by one. A failed deletion is
/// logged and recorded; the remaining files are still attempted.
pub fn remove_index_files(dir: &Path, name: &IndexName) -> CleanupReport {
    let mut report = CleanupReport::default();
    for path in index_files(dir, name) {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(file = %file_name, "Deleted existing index file");
                report.deleted.push(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(file = %file_name, error = %e, "Error deleting index file");
                report.failed.push((path, e.to_string()));
            }
        }
    }
    report
}
