//! Storage module for persisting crawl state
//!
//! This module handles all database operations for the crawler, including:
//! - SQLite database initialization and schema management
//! - Unexplored/explored domain set persistence
//! - Extracted schema.org match persistence

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::ScoutError;
use std::path::Path;

/// One schema.org script block found on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMatch {
    /// The page the script was found on
    pub url: String,

    /// The raw textual content of the script element
    pub json: String,
}

/// Initializes or opens a storage database
pub fn open_storage(path: &Path) -> Result<SqliteStorage, ScoutError> {
    SqliteStorage::new(path)
}
