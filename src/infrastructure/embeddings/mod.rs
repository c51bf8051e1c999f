pub mod factory;
pub mod openai;
pub mod voyage;
