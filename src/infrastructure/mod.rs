pub mod embeddings;
pub mod fs;
pub mod sqlite;
