//! SQLite storage implementation

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::{Error, Result};

/// SQLite-backed store for the UCD tables
pub struct UcdStore {
    conn: Connection,
}

impl UcdStore {
    /// Create or re-open a database file and ensure the schema exists.
    ///
    /// Table creation is idempotent; the Room master row is re-stamped
    /// unconditionally on every call.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an existing database file without touching the schema.
    ///
    /// Fails with [`Error::DatabaseMissing`] before opening any connection
    /// when the file is absent.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatabaseMissing(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema and stamp the Room master row
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        self.conn.execute(
            schema::STAMP_MASTER_ROW,
            params![schema::MASTER_ROW_ID, schema::MASTER_IDENTITY_HASH],
        )?;
        Ok(())
    }

    // ========== Row Operations ==========

    /// Insert a group row. Fails on a duplicate name (primary key).
    pub fn insert_group(&self, name: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO UnicodeGroup (name) VALUES (?1)",
            params![name],
        )?;
        Ok(())
    }

    /// Insert a character row. `name` and `group_name` may be absent.
    pub fn insert_character(
        &self,
        codepoint: &str,
        name: Option<&str>,
        group_name: Option<&str>,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO UnicodeCharacter (codepoint, name, groupName) VALUES (?1, ?2, ?3)",
            params![codepoint, name, group_name],
        )?;
        Ok(())
    }

    /// Insert an alias row for a codepoint. The id is assigned by SQLite.
    pub fn insert_alias(&self, codepoint: &str, alias: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO UnicodeCharacterAlias (codepoint, alias) VALUES (?1, ?2)",
            params![codepoint, alias],
        )?;
        Ok(())
    }

    // ========== Transactions ==========

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Commit the open transaction and immediately begin the next one, so
    /// rows written so far are durable while the pass keeps batching.
    pub fn checkpoint(&mut self) -> Result<()> {
        self.commit()?;
        self.begin_transaction()
    }

    // ========== Queries ==========

    /// Count group rows
    pub fn count_groups(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM UnicodeGroup", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count character rows
    pub fn count_characters(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM UnicodeCharacter", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count alias rows
    pub fn count_aliases(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM UnicodeCharacterAlias",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Read back the Room master row, if present
    pub fn master_row(&self) -> Result<Option<(i64, String)>> {
        self.conn
            .query_row(
                "SELECT id, identity_hash FROM room_master_table WHERE id = ?1",
                params![schema::MASTER_ROW_ID],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            groups: self.count_groups()?,
            characters: self.count_characters()?,
            aliases: self.count_aliases()?,
        })
    }

    /// Look up a character's group, for tests and diagnostics
    pub fn character_group(&self, codepoint: &str) -> Result<Option<Option<String>>> {
        self.conn
            .query_row(
                "SELECT groupName FROM UnicodeCharacter WHERE codepoint = ?1",
                params![codepoint],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Aliases recorded for a codepoint, in insertion order
    pub fn aliases_for(&self, codepoint: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT alias FROM UnicodeCharacterAlias WHERE codepoint = ?1 ORDER BY id",
        )?;

        let aliases = stmt
            .query_map(params![codepoint], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(aliases)
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub groups: usize,
    pub characters: usize,
    pub aliases: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Groups: {}", self.groups)?;
        writeln!(f, "  Characters: {}", self.characters)?;
        writeln!(f, "  Aliases: {}", self.aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_count() {
        let store = UcdStore::open_in_memory().unwrap();

        store.insert_group("Basic Latin").unwrap();
        store
            .insert_character("0041", Some("LATIN CAPITAL LETTER A"), Some("Basic Latin"))
            .unwrap();
        store.insert_alias("0041", "LCA").unwrap();

        assert_eq!(store.count_groups().unwrap(), 1);
        assert_eq!(store.count_characters().unwrap(), 1);
        assert_eq!(store.count_aliases().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_group_is_constraint_error() {
        let store = UcdStore::open_in_memory().unwrap();

        store.insert_group("Basic Latin").unwrap();
        assert!(store.insert_group("Basic Latin").is_err());
    }

    #[test]
    fn test_character_without_group_or_name() {
        let store = UcdStore::open_in_memory().unwrap();

        store.insert_character("E000", None, None).unwrap();

        let group = store.character_group("E000").unwrap();
        assert_eq!(group, Some(None));
    }

    #[test]
    fn test_master_row_stamped() {
        let store = UcdStore::open_in_memory().unwrap();

        let (id, hash) = store.master_row().unwrap().unwrap();
        assert_eq!(id, 42);
        assert_eq!(hash, "97f03dcdfb957fe79a7c6c2ed3b6729e");
    }

    #[test]
    fn test_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucd.db");

        {
            let store = UcdStore::create(&path).unwrap();
            store.insert_group("Basic Latin").unwrap();
        }

        // Re-running init must not drop tables or lose rows.
        let store = UcdStore::create(&path).unwrap();
        assert_eq!(store.count_groups().unwrap(), 1);

        let (id, hash) = store.master_row().unwrap().unwrap();
        assert_eq!(id, 42);
        assert_eq!(hash, "97f03dcdfb957fe79a7c6c2ed3b6729e");
    }

    #[test]
    fn test_open_existing_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");

        match UcdStore::open_existing(&path) {
            Err(crate::Error::DatabaseMissing(p)) => assert_eq!(p, path),
            other => panic!("expected DatabaseMissing, got {:?}", other.map(|_| ())),
        }
    }
}
