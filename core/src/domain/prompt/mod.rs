pub mod entities;
pub mod schema;
pub mod services;
pub mod value_objects;
