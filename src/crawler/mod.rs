//! Crawler module: the crawl orchestration engine
//!
//! This module contains the core crawling logic, including:
//! - The two-level frontier (domains, then sites within a domain)
//! - Recursive sitemap-index resolution
//! - Page loading with bounded retries
//! - Match and domain extraction
//! - Overall crawl coordination and per-domain commits

mod coordinator;
mod extract;
mod fetcher;
mod frontier;
mod session;
mod sitemap;

pub use coordinator::Coordinator;
pub use extract::{extract_matches, harvest_domains};
pub use fetcher::{build_http_client, PageLoader, LOAD_ATTEMPTS};
pub use frontier::Frontier;
pub use session::CrawlSession;
pub use sitemap::resolve_sitemap;

use crate::config::Config;
use crate::storage::open_storage;
use crate::ScoutError;
use std::path::Path;
use std::sync::atomic::Ordering;

/// Runs a complete crawl operation
///
/// Opens the configured database, seeds the frontier with every configured
/// hostname, and drives the domain loop until the frontier is exhausted, an
/// interrupt is received, or the per-run domain cap is reached. Returns
/// after reporting elapsed time and progress totals.
pub async fn crawl(config: Config) -> Result<(), ScoutError> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let seeds = config.seeds.clone();

    let mut coordinator = Coordinator::new(config, storage)?;

    // ctrl-c stops the crawl at the next commit point; the in-progress
    // domain's unflushed findings are discarded, committed domains stay.
    let shutdown = coordinator.shutdown_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping at next commit point");
            shutdown.store(true, Ordering::SeqCst);
        }
    });

    let mut session = CrawlSession::new();
    for seed in &seeds {
        coordinator.scrape(seed);
    }

    coordinator.run(&mut session).await?;
    session.finish();

    tracing::info!(
        "Crawl took {:?}: {} domains explored, {} pages visited, {} matches",
        session.elapsed(),
        session.domains_explored,
        session.pages_visited,
        session.matches_found
    );

    Ok(())
}
