use crate::domain::entities::document::{Document, Metadata, ScoredDocument};
use crate::domain::entities::index_info::IndexInfo;
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::DateTime;
use rusqlite::{params, Connection, OpenFlags};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    /// Writes a complete store at `path`. Schema, descriptor and every
    /// document are committed in one transaction, so a failed build never
    /// leaves a readable index behind.
    pub fn create(
        path: &Path,
        info: &IndexInfo,
        documents: &[Document],
        vectors: &[Vec<f32>],
    ) -> Result<Self, DomainError> {
        Self::check_lengths(documents, vectors)?;
        let mut conn = Connection::open(path).map_err(|e| {
            DomainError::Database(format!("Failed to create {}: {e}", path.display()))
        })?;
        let tx = conn.transaction()?;
        run_migrations(&tx)?;
        Self::write_info(&tx, info)?;
        Self::insert_rows(&tx, documents, vectors)?;
        tx.commit()?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Opens a store previously written by [`SqliteVectorStore::create`].
    pub fn open(path: &Path) -> Result<Self, DomainError> {
        if !path.is_file() {
            return Err(DomainError::NotFound(format!(
                "No index file at {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| DomainError::Database(format!("Failed to open {}: {e}", path.display())))?;
        // Reading the descriptor rejects corrupt files and foreign databases.
        Self::read_info(&conn)
            .and_then(|_| Self::check_schema(&conn))
            .map_err(|e| {
                DomainError::Database(format!(
                    "{} is not a valid vector index: {e}",
                    path.display()
                ))
            })?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn write_info(conn: &Connection, info: &IndexInfo) -> Result<(), DomainError> {
        let dimension = info.dimension.to_string();
        let created_at = info.created_at.to_rfc3339();
        let pairs = [
            ("name", info.name.as_str()),
            ("model", info.model.as_str()),
            ("dimension", dimension.as_str()),
            ("created_at", created_at.as_str()),
        ];
        for (key, value) in pairs {
            conn.execute(
                "INSERT OR REPLACE INTO index_info (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| DomainError::Database(format!("Failed to write index info: {e}")))?;
        }
        Ok(())
    }

    fn check_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.prepare("SELECT id, position, text, metadata FROM documents LIMIT 0")?;
        conn.prepare("SELECT id, vector FROM vectors LIMIT 0")?;
        Ok(())
    }

    fn check_lengths(documents: &[Document], vectors: &[Vec<f32>]) -> Result<(), DomainError> {
        if documents.len() != vectors.len() {
            return Err(DomainError::InvalidInput(format!(
                "{} documents but {} vectors",
                documents.len(),
                vectors.len()
            )));
        }
        Ok(())
    }

    fn insert_rows(
        conn: &Connection,
        documents: &[Document],
        vectors: &[Vec<f32>],
    ) -> Result<(), DomainError> {
        let mut doc_stmt = conn.prepare(
            "INSERT INTO documents (id, position, text, metadata) VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut vec_stmt = conn.prepare("INSERT INTO vectors (id, vector) VALUES (?1, ?2)")?;
        for (doc, vector) in documents.iter().zip(vectors) {
            let metadata = serde_json::to_string(&doc.metadata)
                .map_err(|e| DomainError::Parse(format!("Failed to encode metadata: {e}")))?;
            doc_stmt
                .execute(params![doc.id, doc.position as i64, doc.text, metadata])
                .map_err(|e| DomainError::Database(format!("Failed to store document: {e}")))?;
            vec_stmt
                .execute(params![doc.id, Self::serialize_vector(vector)])
                .map_err(|e| DomainError::Database(format!("Failed to store vector: {e}")))?;
        }
        Ok(())
    }

    fn read_info(conn: &Connection) -> Result<IndexInfo, DomainError> {
        let mut stmt = conn.prepare("SELECT key, value FROM index_info")?;
        let pairs: HashMap<String, String> = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<_, _>>()?;

        let get = |key: &str| {
            pairs
                .get(key)
                .cloned()
                .ok_or_else(|| DomainError::Database(format!("index_info is missing '{key}'")))
        };

        let dimension = get("dimension")?;
        let created_at = get("created_at")?;
        Ok(IndexInfo {
            name: get("name")?,
            model: get("model")?,
            dimension: dimension
                .parse()
                .map_err(|e| DomainError::Parse(format!("Invalid dimension '{dimension}': {e}")))?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| {
                    DomainError::Parse(format!("Invalid created_at '{created_at}': {e}"))
                })?,
        })
    }

    fn row_to_document(
        id: String,
        position: i64,
        text: String,
        metadata: &str,
    ) -> Result<Document, DomainError> {
        let metadata: Metadata = serde_json::from_str(metadata)
            .map_err(|e| DomainError::Parse(format!("Invalid metadata for document {id}: {e}")))?;
        Ok(Document {
            id,
            position: position.max(0) as usize,
            text,
            metadata,
        })
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        let mut dot = 0.0_f64;
        let mut norm_a = 0.0_f64;
        let mut norm_b = 0.0_f64;
        for (x, y) in a.iter().zip(b.iter()) {
            let x = *x as f64;
            let y = *y as f64;
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 { 0.0 } else { dot / denom }
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes.chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }
}

impl VectorStore for SqliteVectorStore {
    fn insert(&self, documents: &[Document], vectors: &[Vec<f32>]) -> Result<(), DomainError> {
        Self::check_lengths(documents, vectors)?;
        let mut conn = self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))?;
        let tx = conn.transaction()?;
        Self::insert_rows(&tx, documents, vectors)?;
        tx.commit()?;
        Ok(())
    }

    fn search_similar(
        &self,
        vector: &[f32],
        limit: usize,
        filter: Option<&Metadata>,
    ) -> Result<Vec<ScoredDocument>, DomainError> {
        if limit == 0 {
            return Ok(vec![]);
        }
        let conn = self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn.prepare(
            "SELECT d.id, d.position, d.text, d.metadata, v.vector
             FROM documents d JOIN vectors v ON v.id = d.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Vec<u8>>(4)?,
            ))
        })?;

        let mut results = Vec::new();
        for row in rows {
            let (id, position, text, metadata, blob) = row?;
            let document = Self::row_to_document(id, position, text, &metadata)?;
            if filter.is_some_and(|f| !document.matches(f)) {
                continue;
            }
            let score = Self::cosine_similarity(vector, &Self::deserialize_vector(&blob));
            results.push(ScoredDocument { document, score });
        }

        results.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);
        Ok(results)
    }

    fn documents(&self) -> Result<Vec<Document>, DomainError> {
        let conn = self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt =
            conn.prepare("SELECT id, position, text, metadata FROM documents ORDER BY position")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, position, text, metadata) = row?;
            documents.push(Self::row_to_document(id, position, text, &metadata)?);
        }
        Ok(documents)
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    fn info(&self) -> Result<IndexInfo, DomainError> {
        let conn = self.conn.lock().map_err(|e| DomainError::Database(e.to_string()))?;
        Self::read_info(&conn)
    }
}
