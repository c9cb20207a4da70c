//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::SchemaMatch;
use crate::ScoutError;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(ScoutError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, ScoutError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, ScoutError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    // ===== Frontier State =====

    fn load_unexplored_domains(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT domain FROM unexplored_domains ORDER BY queued_at, domain")?;

        let domains = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(domains)
    }

    fn load_explored_domains(&self) -> StorageResult<HashSet<String>> {
        let mut stmt = self.conn.prepare("SELECT domain FROM explored_domains")?;

        let domains = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<HashSet<String>, _>>()?;

        Ok(domains)
    }

    fn insert_unexplored_domains(&mut self, domains: &[String]) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        for domain in domains {
            tx.execute(
                "INSERT OR IGNORE INTO unexplored_domains (domain, queued_at) VALUES (?1, ?2)",
                params![domain, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_unexplored_domain(&mut self, domain: &str) -> StorageResult<()> {
        self.conn.execute(
            "DELETE FROM unexplored_domains WHERE domain = ?1",
            params![domain],
        )?;
        Ok(())
    }

    fn insert_explored_domain(&mut self, domain: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR IGNORE INTO explored_domains (domain, explored_at) VALUES (?1, ?2)",
            params![domain, now],
        )?;
        Ok(())
    }

    // ===== Matches =====

    fn insert_matches(&mut self, domain: &str, matches: &[SchemaMatch]) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        for m in matches {
            // url is the primary key; re-inserting replaces (last write wins)
            tx.execute(
                "INSERT OR REPLACE INTO schema_match (url, domain, json, found_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![m.url, domain, m.json, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ===== Statistics =====

    fn count_explored_domains(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM explored_domains", [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }

    fn count_unexplored_domains(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM unexplored_domains", [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }

    fn count_matches(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM schema_match", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn matches_for_domain(&self, domain: &str) -> StorageResult<Vec<SchemaMatch>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, json FROM schema_match WHERE domain = ?1 ORDER BY url")?;

        let matches = stmt
            .query_map(params![domain], |row| {
                Ok(SchemaMatch {
                    url: row.get(0)?,
                    json: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(matches)
    }
}
