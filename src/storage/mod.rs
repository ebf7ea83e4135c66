//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - UnicodeGroup(name)
//! - UnicodeCharacter(codepoint, name, groupName)
//! - UnicodeCharacterAlias(id, codepoint, alias)
//! - room_master_table(id, identity_hash)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, UcdStore};
