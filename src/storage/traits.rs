//! Storage traits and error types
//!
//! This module defines the persistence gateway interface the crawler uses to
//! load and commit frontier state and extracted matches.

use crate::storage::SchemaMatch;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for persistence gateway implementations
///
/// The crawler loads both domain sets at startup, then writes back only the
/// per-domain delta when a domain's exploration completes. Insert operations
/// are idempotent per domain so re-exploration after a partial flush is safe.
pub trait Storage {
    // ===== Frontier State =====

    /// Loads the queued-but-unexplored domains in insertion order
    fn load_unexplored_domains(&self) -> StorageResult<Vec<String>>;

    /// Loads the set of fully explored domains
    fn load_explored_domains(&self) -> StorageResult<HashSet<String>>;

    /// Queues newly discovered domains; idempotent per domain
    fn insert_unexplored_domains(&mut self, domains: &[String]) -> StorageResult<()>;

    /// Removes a domain from the unexplored queue
    fn remove_unexplored_domain(&mut self, domain: &str) -> StorageResult<()>;

    /// Marks a domain as fully explored; idempotent
    fn insert_explored_domain(&mut self, domain: &str) -> StorageResult<()>;

    // ===== Matches =====

    /// Stores the matches collected from one domain's pages
    ///
    /// Each match is keyed by its page URL; re-inserting the same URL
    /// replaces the previous payload (last write wins).
    fn insert_matches(&mut self, domain: &str, matches: &[SchemaMatch]) -> StorageResult<()>;

    // ===== Statistics =====

    /// Counts fully explored domains
    fn count_explored_domains(&self) -> StorageResult<u64>;

    /// Counts queued-but-unexplored domains
    fn count_unexplored_domains(&self) -> StorageResult<u64>;

    /// Counts stored matches across all domains
    fn count_matches(&self) -> StorageResult<u64>;

    /// Loads the matches recorded for one domain, in URL order
    fn matches_for_domain(&self, domain: &str) -> StorageResult<Vec<SchemaMatch>>;
}
