//! # Ucdb - Unicode Character Database ingestion
//!
//! Loads the UCD grouped XML export into a SQLite database of code points,
//! blocks, and name aliases.
//!
//! Ucdb provides:
//! - Idempotent schema initialization for the three data tables plus the
//!   Room identity stamp expected by the consuming app
//! - A streaming, namespace-filtered XML traversal that never materializes
//!   the full document
//! - Per-element validation with warn-and-skip semantics
//! - Configurable commit granularity (eager groups, deferred characters)

pub mod codepoint;
pub mod config;
pub mod loader;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use loader::xml::UcdReader;
pub use loader::{CommitPolicy, Granularity, LoadStats, Loader, Outcome};
pub use storage::UcdStore;

use std::path::PathBuf;

/// Result type alias for Ucdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Ucdb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The ucd database file {} does not exist. Run `ucdb init` first.", .0.display())]
    DatabaseMissing(PathBuf),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid codepoint: {0}")]
    InvalidCodepoint(String),
}
