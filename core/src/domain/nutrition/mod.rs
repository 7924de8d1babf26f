pub mod entities;
pub mod helpers;
pub mod services;
