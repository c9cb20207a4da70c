use serde::Deserialize;

/// Main configuration structure for Schema-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,

    /// Seed hostnames whose sitemaps start the crawl
    #[serde(default)]
    pub seeds: Vec<String>,

    /// Domains treated as already explored and never crawled
    #[serde(rename = "skip-domains", default)]
    pub skip_domains: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Request timeout in seconds; also the sleep between retry attempts
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Stop after fully exploring this many domains (0 = unlimited)
    #[serde(rename = "max-domains-per-run", default)]
    pub max_domains_per_run: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("schema-scout/{}", env!("CARGO_PKG_VERSION"))
}
