//! Configuration module for Schema-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files that describe the crawl: seed hostnames, domains to skip, the fetch
//! timeout, and the database location.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
