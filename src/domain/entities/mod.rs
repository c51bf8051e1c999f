pub mod document;
pub mod index_info;
