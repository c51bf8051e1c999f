pub mod embedding_port;
pub mod index_storage;
pub mod vector_store;
