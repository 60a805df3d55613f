//! VentureDesk Common Library
//!
//! Shared code for the VentureDesk binaries including:
//! - SeaORM entities and the repository pattern
//! - Seed-document bulk loading
//! - Error types and handling
//! - Configuration management

pub mod config;
pub mod db;
pub mod errors;
pub mod seed;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::{DbPool, Repository};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
