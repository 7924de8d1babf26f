pub mod common;
pub mod compliance;
pub mod constraint;
pub mod image;
pub mod llm;
pub mod nutrition;
pub mod prompt;
pub mod recipe;
pub mod safety;
