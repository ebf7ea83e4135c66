//! Database schema definitions

/// SQL to create the group table. One row per Unicode block (or per
/// ungrouped singleton, named after the character itself).
pub const CREATE_GROUP_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS UnicodeGroup (
    name TEXT NOT NULL,
    PRIMARY KEY(name)
)
"#;

/// SQL to create the character table. `groupName` is nullable: characters
/// encountered before any group element are stored without one.
pub const CREATE_CHARACTER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS UnicodeCharacter (
    codepoint TEXT NOT NULL,
    name TEXT,
    groupName TEXT,
    PRIMARY KEY(codepoint)
)
"#;

/// SQL to create the alias table. `codepoint` references UnicodeCharacter
/// by value; no foreign key is enforced.
pub const CREATE_ALIAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS UnicodeCharacterAlias (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    codepoint TEXT NOT NULL,
    alias TEXT NOT NULL
)
"#;

/// SQL to create the Room master table checked by the consuming Android app
/// when it first opens the database.
pub const CREATE_MASTER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS room_master_table (
    id INTEGER PRIMARY KEY,
    identity_hash TEXT
)
"#;

/// Fixed id of the Room master row.
pub const MASTER_ROW_ID: i64 = 42;

/// Identity hash the consuming app's generated schema expects.
pub const MASTER_IDENTITY_HASH: &str = "97f03dcdfb957fe79a7c6c2ed3b6729e";

/// SQL to stamp the Room master row. Re-run unconditionally on every init.
pub const STAMP_MASTER_ROW: &str = r#"
INSERT OR REPLACE INTO room_master_table (id, identity_hash)
VALUES (?1, ?2)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_GROUP_TABLE,
        CREATE_CHARACTER_TABLE,
        CREATE_ALIAS_TABLE,
        CREATE_MASTER_TABLE,
    ]
}
