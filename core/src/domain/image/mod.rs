pub mod helpers;
pub mod ports;
pub mod services;
