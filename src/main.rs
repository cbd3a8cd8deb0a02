//! Legal corpus collector entry point
//!
//! This is the command-line interface for the legal corpus collector.

use anyhow::{bail, Context};
use clap::Parser;
use legal_corpus_collector::config::{
    load_seeds_with_hash, CrawlOptions, SeedFile, DEFAULT_DELAY_SECS, DEFAULT_FETCH_TIMEOUT_SECS,
    DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_ROOT,
};
use legal_corpus_collector::crawler::run_collection;
use legal_corpus_collector::output::{print_statistics, verify_manifest};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Legal corpus collector: a polite PDF harvester
///
/// Crawls each seed's start URLs breadth-first within its allowed domains,
/// downloads every PDF found and records each one in
/// `<out>/<seed>/manifest.jsonl` with its SHA-256 digest.
#[derive(Parser, Debug)]
#[command(name = "legal-corpus-collector")]
#[command(version)]
#[command(about = "A polite legal PDF harvester", long_about = None)]
struct Cli {
    /// Path to the TOML seed file
    #[arg(long, value_name = "PATH")]
    seeds: PathBuf,

    /// Output root; each seed writes to <OUT>/<seed name>/
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_ROOT)]
    out: PathBuf,

    /// Maximum number of HTML pages expanded per seed
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Pause after each page fetch and PDF download (seconds)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_DELAY_SECS)]
    delay: f64,

    /// Timeout for full-body requests (seconds)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout: u64,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the seed file and show what would be crawled without crawling
    #[arg(long, conflicts_with = "verify")]
    dry_run: bool,

    /// Re-hash every downloaded artifact against its manifest and exit
    #[arg(long, conflicts_with = "dry_run")]
    verify: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading seeds from: {}", cli.seeds.display());
    let (seed_file, hash) = load_seeds_with_hash(&cli.seeds)
        .with_context(|| format!("failed to load seed file {}", cli.seeds.display()))?;
    tracing::info!(
        "Seed file loaded: {} seeds (hash: {})",
        seed_file.seeds.len(),
        hash
    );

    let options = build_options(&cli, &seed_file)?;

    if cli.dry_run {
        handle_dry_run(&seed_file, &options);
    } else if cli.verify {
        handle_verify(&seed_file, &options)?;
    } else {
        handle_crawl(&seed_file, &options).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("legal_corpus_collector=info,warn"),
            1 => EnvFilter::new("legal_corpus_collector=debug,info"),
            2 => EnvFilter::new("legal_corpus_collector=trace,debug"),
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

/// Combines command-line flags with the seed file's user agent
fn build_options(cli: &Cli, seed_file: &SeedFile) -> anyhow::Result<CrawlOptions> {
    if !cli.delay.is_finite() || cli.delay < 0.0 {
        bail!("--delay must be a finite, non-negative number of seconds");
    }
    if cli.timeout == 0 {
        bail!("--timeout must be at least one second");
    }

    let defaults = CrawlOptions::default();
    let fetch_timeout = Duration::from_secs(cli.timeout);
    Ok(CrawlOptions {
        output_root: cli.out.clone(),
        max_pages: cli.max_pages,
        delay: Duration::from_secs_f64(cli.delay),
        fetch_timeout,
        probe_timeout: defaults.probe_timeout.min(fetch_timeout),
        user_agent: seed_file.user_agent.clone(),
    })
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(seed_file: &SeedFile, options: &CrawlOptions) {
    println!("=== Legal Corpus Collector Dry Run ===\n");

    println!("Options:");
    println!("  Output root: {}", options.output_root.display());
    println!("  Max HTML pages per seed: {}", options.max_pages);
    println!("  Delay: {:.2}s", options.delay.as_secs_f64());
    println!(
        "  Timeouts: fetch {}s, probe {}s",
        options.fetch_timeout.as_secs(),
        options.probe_timeout.as_secs()
    );
    println!("  User-Agent: {}", options.user_agent.header_value());

    println!("\nSeeds ({}):", seed_file.seeds.len());
    for seed in &seed_file.seeds {
        println!(
            "  - {} -> {}",
            seed.name,
            options.seed_dir(seed).display()
        );
        println!("    allowed: {}", seed.allowed_domains.join(", "));
        for url in &seed.start_urls {
            println!("    * {}", url);
        }
    }

    println!("\n✓ Seed file is valid");
    println!(
        "✓ Would start crawling with {} start URLs",
        seed_file
            .seeds
            .iter()
            .map(|s| s.start_urls.len())
            .sum::<usize>()
    );
}

/// Handles the --verify mode: checks stored artifacts against their manifests
fn handle_verify(seed_file: &SeedFile, options: &CrawlOptions) -> anyhow::Result<()> {
    println!("=== Verifying Manifests ===\n");

    let mut problems = 0;
    for seed in &seed_file.seeds {
        let manifest = options.manifest_path(seed);
        if !manifest.exists() {
            println!("Seed: {} (no manifest at {})", seed.name, manifest.display());
            continue;
        }

        let report = verify_manifest(&manifest)
            .with_context(|| format!("failed to verify {}", manifest.display()))?;
        println!("Seed: {}", seed.name);
        println!("  Records checked: {}", report.checked);
        println!("  Missing files: {}", report.missing.len());
        for record in &report.missing {
            println!("    - {}", record.path);
        }
        println!("  Digest mismatches: {}", report.mismatched.len());
        for mismatch in &report.mismatched {
            println!("    - {}", mismatch.record.path);
        }
        println!();

        problems += report.missing.len() + report.mismatched.len();
    }

    if problems > 0 {
        bail!("{} artifacts failed verification", problems);
    }
    println!("✓ All artifacts match their manifests");
    Ok(())
}

/// Handles the main collection run
async fn handle_crawl(seed_file: &SeedFile, options: &CrawlOptions) -> anyhow::Result<()> {
    match run_collection(&seed_file.seeds, options).await {
        Ok(stats) => {
            tracing::info!("Collection completed successfully");
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Collection failed: {}", e);
            Err(e.into())
        }
    }
}
