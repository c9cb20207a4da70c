//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Schema-Scout
//! database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Domains queued for exploration
CREATE TABLE IF NOT EXISTS unexplored_domains (
    domain TEXT PRIMARY KEY,
    queued_at TEXT NOT NULL
);

-- Domains whose sitemaps have been fully explored
CREATE TABLE IF NOT EXISTS explored_domains (
    domain TEXT PRIMARY KEY,
    explored_at TEXT NOT NULL
);

-- schema.org script blocks found on pages; one row per page URL
CREATE TABLE IF NOT EXISTS schema_match (
    url TEXT PRIMARY KEY,
    domain TEXT NOT NULL,
    json TEXT NOT NULL,
    found_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_schema_match_domain ON schema_match(domain);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
