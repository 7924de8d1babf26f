pub mod entities;
pub mod services;
pub mod tables;
