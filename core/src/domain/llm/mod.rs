pub mod entities;
pub mod ports;

#[cfg(test)]
pub mod fake;
