pub mod definition;
pub mod error;
pub mod location;
pub mod navigator;
pub mod ports;
