//! Schema-Scout main entry point
//!
//! This is the command-line interface for the Schema-Scout structured-data
//! harvester.

use clap::Parser;
use std::path::PathBuf;
use schema_scout::config::load_config_with_hash;
use schema_scout::crawler::crawl;
use tracing_subscriber::EnvFilter;

/// Schema-Scout: a sitemap-driven structured-data harvester
///
/// Schema-Scout expands each seed domain's sitemap, fetches every listed
/// page, records inline schema.org script blocks, and follows outbound
/// links to discover new domains to explore.
#[derive(Parser, Debug)]
#[command(name = "schema-scout")]
#[command(version = "0.1.0")]
#[command(about = "A sitemap-driven structured-data harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("schema_scout=info,warn"),
            1 => EnvFilter::new("schema_scout=debug,info"),
            2 => EnvFilter::new("schema_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &schema_scout::config::Config) {
    println!("=== Schema-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  User agent: {}", config.crawler.user_agent);
    if config.crawler.max_domains_per_run > 0 {
        println!(
            "  Max domains per run: {}",
            config.crawler.max_domains_per_run
        );
    } else {
        println!("  Max domains per run: unlimited");
    }

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\nSeed Domains ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    if !config.skip_domains.is_empty() {
        println!("\nSkipped Domains ({}):", config.skip_domains.len());
        for domain in &config.skip_domains {
            println!("  - {}", domain);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {} seeds", config.seeds.len());
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &schema_scout::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    use schema_scout::storage::{SqliteStorage, Storage};
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    println!("Explored domains:   {}", storage.count_explored_domains()?);
    println!(
        "Unexplored domains: {}",
        storage.count_unexplored_domains()?
    );
    println!("Matches collected:  {}", storage.count_matches()?);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: schema_scout::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl with {} seeds ({} skipped domains)",
        config.seeds.len(),
        config.skip_domains.len()
    );

    // Run the crawler
    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
