//! sitemap-check main entry point
//!
//! This is the command-line interface for sitemap-check.

use anyhow::Context;
use clap::Parser;
use sitemap_check::checks::CheckRegistry;
use sitemap_check::config::{load_config_with_hash, validate, Config, ReportFormat, WorkerCount};
use sitemap_check::crawler::{executor_for, HttpFetcher, Pipeline, Shutdown};
use sitemap_check::output::{console, render_report, summarize, ReportContext};
use sitemap_check::sitemap::{collect_url_records, source_for, UrlRecord};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit status for a run stopped with Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

/// sitemap-check: page hygiene checks for every URL in a sitemap
///
/// Fetches each URL the site's sitemap declares and reports on status codes,
/// metadata and security headers. Exits non-zero when any check errors or
/// any page cannot be fetched.
#[derive(Parser, Debug)]
#[command(name = "sitemap-check")]
#[command(version)]
#[command(about = "Check every page in a sitemap", long_about = None)]
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

    /// Check pages concurrently
    #[arg(long)]
    parallel: bool,

    /// Worker pool size for concurrent checks ("auto" or a number)
    #[arg(long, value_name = "N")]
    workers: Option<WorkerCount>,

    /// Do not ask for confirmation before a concurrent run
    #[arg(long)]
    no_input: bool,

    /// Report file path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,

    /// Record panicking checks as errors
    #[arg(long)]
    strict: bool,

    /// Validate config and list the URLs that would be checked, without fetching them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let status = match run(cli).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!("{:#}", e);
            1
        }
    };

    std::process::exit(status);
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_check=info,warn"),
            1 => EnvFilter::new("sitemap_check=debug,info"),
            2 => EnvFilter::new("sitemap_check=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs one batch and returns the process exit status
async fn run(cli: Cli) -> anyhow::Result<i32> {
    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid command-line override")?;

    let registry = CheckRegistry::from_ids(&config.checks.enabled)?;
    let source = source_for(&config)?;
    let records = collect_url_records(source.as_ref())
        .await
        .context("Could not build the list of URLs to check")?;

    if cli.dry_run {
        print_dry_run(&config, &registry, &records);
        return Ok(0);
    }

    let executor = executor_for(&config.concurrency, records.len());
    if executor.parallelism() > 1 && !cli.no_input && !confirm(records.len(), executor.parallelism())? {
        eprintln!("URL checks cancelled");
        return Ok(1);
    }

    let fetcher = HttpFetcher::from_config(&config.site.base_url, &config.fetcher)?;
    let styled = console::Styled::new();
    let pipeline = Pipeline::new(Arc::new(fetcher), Arc::new(registry))
        .strict(config.checks.strict)
        .on_page(move |page| {
            if let Err(e) = console::print_page(&styled, page) {
                tracing::warn!("Failed to print {}: {}", page.path, e);
            }
        });

    let shutdown = Shutdown::new();
    let ctrl_c = shutdown.listen_for_ctrl_c();

    tracing::info!(
        "Checking {} URLs ({} strategy, {} checks)",
        records.len(),
        executor.name(),
        pipeline.registry().len()
    );
    let execution = executor.execute(&pipeline, records, &shutdown).await;
    ctrl_c.abort();

    let summary = summarize(execution.page_results);
    console::print_totals(&summary).context("Failed to print totals")?;

    let context = ReportContext::new(config.site.base_url.clone())
        .with_config_hash(config_hash)
        .cancelled(execution.cancelled);
    let report_path = Path::new(&config.output.report_path);
    render_report(&summary, &context, config.output.format, report_path)
        .with_context(|| format!("Failed to write report to {}", report_path.display()))?;

    if execution.cancelled {
        return Ok(EXIT_INTERRUPTED);
    }

    // Unfetchable pages fail the run as well as check errors
    Ok(exit_status(summary.failure_count()))
}

/// Applies command-line flags on top of the file configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if cli.parallel {
        config.concurrency.enabled = true;
    }
    if let Some(workers) = cli.workers {
        config.concurrency.workers = workers;
    }
    if let Some(report) = &cli.report {
        config.output.report_path = report.to_string_lossy().into_owned();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.strict {
        config.checks.strict = true;
    }
}

/// Maps a failure count onto a process exit status that never wraps to zero
fn exit_status(failures: usize) -> i32 {
    if failures == 0 {
        0
    } else {
        failures.min(255) as i32
    }
}

/// Asks before starting a concurrent run; anything but yes declines
fn confirm(url_count: usize, workers: usize) -> anyhow::Result<bool> {
    eprintln!(
        "You're about to check {} URLs using {} concurrent workers. \
         Ctrl-C stops new checks but abandons the ones in flight.",
        url_count, workers
    );
    eprint!("Are you sure you wish to continue? [y/N] ");
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_lowercase().starts_with('y'))
}

/// Handles the --dry-run mode: shows what would be checked
fn print_dry_run(config: &Config, registry: &CheckRegistry, records: &[UrlRecord]) {
    println!("=== sitemap-check Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    if let Some(sitemap_url) = &config.site.sitemap_url {
        println!("  Sitemap: {}", sitemap_url);
    }

    println!("\nFetcher:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  User agent: {}", config.fetcher.user_agent);

    println!("\nConcurrency:");
    println!("  Enabled: {}", config.concurrency.enabled);
    println!("  Workers: {}", config.concurrency.workers);

    println!("\nChecks ({}):", registry.len());
    for check in registry.iter() {
        println!("  - {} ({})", check.name, check.id);
    }

    println!("\nURLs ({}):", records.len());
    for record in records {
        match record.request_path() {
            Ok(path) => println!("  - {}", path),
            Err(e) => println!("  - {} (unresolvable: {})", record.target_url, e),
        }
    }

    println!("\nReport: {} ({:?})", config.output.report_path, config.output.format);
    println!("\n✓ Configuration is valid");
}
