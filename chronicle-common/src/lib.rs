//! # Chronicle Common Library
//!
//! Shared code for the Chronicle import tooling including:
//! - Error types
//! - Configuration loading (TOML bootstrap with built-in defaults)
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
