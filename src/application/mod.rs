pub mod connect;
pub mod create_index;
pub(crate) mod documents;
pub mod vector_index;
