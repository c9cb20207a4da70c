//! Crawl orchestration
//!
//! The coordinator drives the domain loop: pop a domain from the frontier,
//! expand its sitemap into the site queue, visit each site (collecting
//! matches and harvesting new domains), and commit the domain's findings to
//! storage in one flush before moving on. A crash or interrupt mid-domain
//! loses only that domain's uncommitted progress.

use crate::config::Config;
use crate::crawler::extract::{extract_matches, harvest_domains};
use crate::crawler::fetcher::{build_http_client, PageLoader};
use crate::crawler::frontier::Frontier;
use crate::crawler::session::CrawlSession;
use crate::crawler::sitemap::resolve_sitemap;
use crate::storage::{SchemaMatch, Storage};
use crate::url::{registrable_domain, sitemap_url};
use crate::ScoutError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Everything collected while exploring one domain, flushed as a unit
#[derive(Debug, Default)]
struct DomainFindings {
    matches: Vec<SchemaMatch>,
    discovered: Vec<String>,
}

/// Main crawl coordinator
pub struct Coordinator<S: Storage> {
    config: Config,
    storage: S,
    frontier: Frontier,
    loader: PageLoader,
    shutdown: Arc<AtomicBool>,
}

impl<S: Storage> Coordinator<S> {
    /// Creates a coordinator, loading persisted frontier state
    ///
    /// Domains on the configured skip list are treated as already explored
    /// for this run without being written to storage.
    pub fn new(config: Config, storage: S) -> Result<Self, ScoutError> {
        let unexplored = storage.load_unexplored_domains()?;
        let mut explored = storage.load_explored_domains()?;
        for domain in &config.skip_domains {
            explored.insert(domain.to_lowercase());
        }

        if !unexplored.is_empty() {
            tracing::info!("Resuming with {} queued domains", unexplored.len());
        }

        let frontier = Frontier::with_state(unexplored, explored);

        let timeout = Duration::from_secs(config.crawler.request_timeout_secs);
        let client = build_http_client(&config.crawler.user_agent, timeout)?;
        let loader = PageLoader::new(client, timeout);

        Ok(Self {
            config,
            storage,
            frontier,
            loader,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag an interrupt handler can set to stop the crawl at the next
    /// commit point
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Seeds the frontier with one hostname
    ///
    /// The seed is reduced to its registrable domain; hosts without one
    /// (IP addresses, bare hostnames) are used verbatim. Already-explored
    /// seeds are not enqueued.
    pub fn scrape(&mut self, seed: &str) {
        let domain = registrable_domain(&format!("https://www.{seed}"))
            .unwrap_or_else(|| seed.to_lowercase());

        if self.frontier.enqueue_domain(&domain) {
            tracing::info!("Seeded frontier with {}", domain);
        } else {
            tracing::info!("Seed {} already explored or queued, skipping", domain);
        }
    }

    /// Runs the domain loop until the frontier is exhausted
    pub async fn run(&mut self, session: &mut CrawlSession) -> Result<(), ScoutError> {
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::info!("Shutdown requested, stopping before next domain");
                break;
            }

            let Some(domain) = self.frontier.next_domain() else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            // The queue may hold a domain that was marked explored after it
            // was enqueued; the explored set is authoritative.
            if self.frontier.is_explored(&domain) {
                tracing::info!("Skipping already-explored domain {}", domain);
                continue;
            }

            session.begin_domain(&domain);
            tracing::info!("Exploring {}", domain);

            let Some(findings) = self.explore_domain(&domain, session).await? else {
                tracing::info!("Interrupted mid-domain, discarding unflushed findings for {}", domain);
                break;
            };

            session.matches_found += findings.matches.len() as u64;
            self.flush_domain(&domain, &findings)?;
            session.domains_explored += 1;

            tracing::info!(
                "Finished {}: {} matches, {} new domains, {} domains left",
                domain,
                findings.matches.len(),
                findings.discovered.len(),
                self.frontier.domains_remaining()
            );

            let cap = self.config.crawler.max_domains_per_run;
            if cap > 0 && session.domains_explored >= u64::from(cap) {
                tracing::info!("Reached max-domains-per-run ({}), stopping", cap);
                break;
            }
        }

        Ok(())
    }

    /// Explores every site in one domain's sitemap
    ///
    /// Returns `None` when interrupted mid-domain so the caller discards the
    /// partial findings instead of committing them.
    async fn explore_domain(
        &mut self,
        domain: &str,
        session: &mut CrawlSession,
    ) -> Result<Option<DomainFindings>, ScoutError> {
        self.frontier.reset_sites();

        let sitemap = sitemap_url(domain);
        resolve_sitemap(&self.loader, &sitemap, &mut self.frontier).await?;
        tracing::info!(
            "Resolved {} sites from {}",
            self.frontier.sites_remaining(),
            sitemap
        );

        let mut findings = DomainFindings::default();

        while let Some(site) = self.frontier.next_site() {
            if self.shutdown.load(Ordering::SeqCst) {
                return Ok(None);
            }

            session.begin_page(&site);
            tracing::debug!("Visiting {}", site);

            let document = match self.loader.load(&site).await {
                Ok(d) => d,
                Err(e) => {
                    // One unavailable page never aborts the domain
                    tracing::warn!("Skipping {}: {}", site, e);
                    continue;
                }
            };
            session.pages_visited += 1;

            findings.matches.extend(extract_matches(&document, &site));

            for candidate in harvest_domains(&document, &self.frontier) {
                // Persist exactly what was enqueued
                if self.frontier.enqueue_domain(&candidate) {
                    tracing::debug!("Discovered domain {}", candidate);
                    findings.discovered.push(candidate);
                }
            }
        }

        Ok(Some(findings))
    }

    /// Commits one domain's findings and marks it explored
    ///
    /// Writes run in sequence: matches, newly discovered domains, removal
    /// from the unexplored store, insertion into the explored store. If any
    /// write fails the domain is NOT marked explored, so a future run
    /// re-explores it; matches are keyed by URL, which makes re-exploration
    /// idempotent.
    fn flush_domain(&mut self, domain: &str, findings: &DomainFindings) -> Result<(), ScoutError> {
        self.storage.insert_matches(domain, &findings.matches)?;
        self.storage
            .insert_unexplored_domains(&findings.discovered)?;
        self.storage.remove_unexplored_domain(domain)?;
        self.storage.insert_explored_domain(domain)?;

        self.frontier.mark_explored(domain);
        Ok(())
    }
}
