pub mod index_name;
pub mod provider_kind;
