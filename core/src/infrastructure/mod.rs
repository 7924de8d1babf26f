pub mod image;
pub mod llm;
pub mod object_storage;
