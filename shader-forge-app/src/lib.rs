//! Shader Forge Application Library
//!
//! Configuration, logging, report output and the command driver for the
//! `shader-forge` binary.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use config::AppConfig;
pub use error::AppError;

// Re-export the main function so it can be called from the root crate
pub use crate::app::main;
