use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS index_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            text TEXT NOT NULL,
            metadata TEXT NOT NULL DEFAULT '{}'
        );

        CREATE TABLE IF NOT EXISTS vectors (
            id TEXT PRIMARY KEY REFERENCES documents(id),
            vector BLOB NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_documents_position ON documents(position);
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
