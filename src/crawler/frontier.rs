//! Two-level crawl frontier
//!
//! The frontier tracks which domains remain to be explored, which have been
//! fully explored, and the page URLs of the domain currently in progress.
//! Each FIFO queue carries a companion membership set so "already pending"
//! checks are constant time instead of queue scans.

use std::collections::{HashSet, VecDeque};

/// The crawl frontier: unexplored domains, explored domains, and the site
/// queue for the domain currently being explored.
///
/// A domain in the explored set is never re-enqueued. The unexplored queue
/// may still surface a domain that was marked explored after it was enqueued;
/// callers must re-check `is_explored` after every `next_domain` pop.
#[derive(Debug, Default)]
pub struct Frontier {
    unexplored: VecDeque<String>,
    pending: HashSet<String>,
    explored: HashSet<String>,
    sites: VecDeque<String>,
    sites_seen: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier preloaded from persisted state
    pub fn with_state(unexplored: Vec<String>, explored: HashSet<String>) -> Self {
        let mut frontier = Self {
            explored,
            ..Self::default()
        };
        for domain in unexplored {
            frontier.enqueue_domain(&domain);
        }
        frontier
    }

    /// Queues a domain for exploration
    ///
    /// No-op for empty strings, already-explored domains, and domains already
    /// pending. Returns whether the domain was actually inserted, so the
    /// caller can persist exactly the set it enqueued.
    pub fn enqueue_domain(&mut self, domain: &str) -> bool {
        if domain.is_empty() || self.explored.contains(domain) || self.pending.contains(domain) {
            return false;
        }
        self.pending.insert(domain.to_string());
        self.unexplored.push_back(domain.to_string());
        true
    }

    /// Pops the next domain to explore; `None` signals frontier exhaustion
    /// (normal termination, not a failure)
    pub fn next_domain(&mut self) -> Option<String> {
        let domain = self.unexplored.pop_front()?;
        self.pending.remove(&domain);
        Some(domain)
    }

    /// Marks a domain as fully explored; idempotent
    pub fn mark_explored(&mut self, domain: &str) {
        self.explored.insert(domain.to_string());
    }

    /// Returns whether a domain has been fully explored
    pub fn is_explored(&self, domain: &str) -> bool {
        self.explored.contains(domain)
    }

    /// Returns whether a domain is already explored or pending exploration
    pub fn is_known_domain(&self, domain: &str) -> bool {
        self.explored.contains(domain) || self.pending.contains(domain)
    }

    /// Number of domains still queued
    pub fn domains_remaining(&self) -> usize {
        self.unexplored.len()
    }

    /// Queues a page URL for the domain currently being explored
    pub fn enqueue_site(&mut self, url: &str) {
        if url.is_empty() || self.sites_seen.contains(url) {
            return;
        }
        self.sites_seen.insert(url.to_string());
        self.sites.push_back(url.to_string());
    }

    /// Pops the next site to visit
    pub fn next_site(&mut self) -> Option<String> {
        self.sites.pop_front()
    }

    /// Number of sites still queued for the current domain
    pub fn sites_remaining(&self) -> usize {
        self.sites.len()
    }

    /// Clears the site queue between domains
    pub fn reset_sites(&mut self) {
        self.sites.clear();
        self.sites_seen.clear();
    }
}
