//! go-navigator library: Go oracle find-definition and project navigation.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod server;
