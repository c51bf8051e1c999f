pub mod migrations;
pub mod storage;
pub mod vector_store;
