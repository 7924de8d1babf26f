pub mod entities;
pub mod helpers;
pub mod services;
pub mod tables;
