use std::fmt;

/// Name of a persisted index. Index files live directly in the storage
/// directory as `<name>.<ext>`, so the name must be a single path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexName(String);

impl IndexName {
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Index name must not be empty".to_string());
        }
        if name == "." || name == ".." {
            return Err(format!("Invalid index name: '{name}'"));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(format!(
                "Invalid index name: '{name}'. Path separators are not allowed"
            ));
        }
        Ok(IndexName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name prefix shared by every file belonging to this index.
    pub fn file_prefix(&self) -> String {
        format!("{}.", self.0)
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        let name = IndexName::new("openai-ada-fsdl").unwrap();
        assert_eq!(name.as_str(), "openai-ada-fsdl");
        assert_eq!(name.file_prefix(), "openai-ada-fsdl.");
    }

    #[test]
    fn rejects_empty_and_path_like_names() {
        assert!(IndexName::new("").is_err());
        assert!(IndexName::new("   ").is_err());
        assert!(IndexName::new("..").is_err());
        assert!(IndexName::new("../etc").is_err());
        assert!(IndexName::new("a\\b").is_err());
    }
}
