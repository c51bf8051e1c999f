use serde::{Deserialize, Serialize};

/// Free-form key/value metadata attached to each document.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Insertion order within the index.
    pub position: usize,
    pub text: String,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(position: usize, text: String, metadata: Metadata) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            position,
            text,
            metadata,
        }
    }

    /// True when every key in `filter` is present with an equal value.
    pub fn matches(&self, filter: &Metadata) -> bool {
        filter
            .iter()
            .all(|(key, value)| self.metadata.get(key) == Some(value))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: Document,
    /// Cosine similarity to the query vector.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: serde_json::Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn filter_requires_every_pair() {
        let doc = Document::new(0, "a".into(), meta(json!({"id": 1, "source": "docs"})));
        assert!(doc.matches(&Metadata::new()));
        assert!(doc.matches(&meta(json!({"id": 1}))));
        assert!(doc.matches(&meta(json!({"id": 1, "source": "docs"}))));
        assert!(!doc.matches(&meta(json!({"id": 2}))));
        assert!(!doc.matches(&meta(json!({"id": 1, "lang": "en"}))));
    }
}
