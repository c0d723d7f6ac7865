//! Bibliosynth Common Library
//!
//! Shared code for all Bibliosynth crates including:
//! - Researcher / publication / corpus model
//! - Error types and handling
//! - Configuration management
//! - CSV corpus tables and atomic artifact writes
//! - Logging setup

pub mod artifact;
pub mod config;
pub mod errors;
pub mod logging;
pub mod model;
pub mod table;

// Re-export commonly used types
pub use config::{AppConfig, DisciplineConfig, GeneratorConfig};
pub use errors::{AppError, ErrorKind, Result};
pub use model::{Corpus, Publication, PublicationId, Researcher, ResearcherId};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
