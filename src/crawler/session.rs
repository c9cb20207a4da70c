//! Per-run crawl session state
//!
//! The session is an explicit value created when a crawl starts and threaded
//! through the orchestrator, rather than ambient mutable state. It tracks
//! wall-clock timing and progress counters; it is never persisted.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// State of one crawl run: timing plus what is currently in progress
#[derive(Debug)]
pub struct CrawlSession {
    started: Instant,
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Wall-clock end, set by [`CrawlSession::finish`]
    pub finished_at: Option<DateTime<Utc>>,
    /// Domain currently being explored
    pub current_domain: Option<String>,
    /// Page currently being visited
    pub current_url: Option<String>,
    /// Domains fully explored and committed this run
    pub domains_explored: u64,
    /// Pages successfully loaded this run
    pub pages_visited: u64,
    /// schema.org matches collected this run
    pub matches_found: u64,
}

impl CrawlSession {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
            finished_at: None,
            current_domain: None,
            current_url: None,
            domains_explored: 0,
            pages_visited: 0,
            matches_found: 0,
        }
    }

    /// Records that a domain's exploration has started
    pub fn begin_domain(&mut self, domain: &str) {
        self.current_domain = Some(domain.to_string());
        self.current_url = None;
    }

    /// Records that a page visit has started
    pub fn begin_page(&mut self, url: &str) {
        self.current_url = Some(url.to_string());
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
        self.current_domain = None;
        self.current_url = None;
    }

    /// Elapsed time since the run started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for CrawlSession {
    fn default() -> Self {
        Self::new()
    }
}
