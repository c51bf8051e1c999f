use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptor persisted alongside the vectors of every index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    /// Model identifier of the embedding engine that built the index.
    pub model: String,
    pub dimension: usize,
    pub created_at: DateTime<Utc>,
}

impl IndexInfo {
    pub fn new(name: &str, model: &str, dimension: usize) -> Self {
        Self {
            name: name.to_string(),
            model: model.to_string(),
            dimension,
            created_at: Utc::now(),
        }
    }
}
