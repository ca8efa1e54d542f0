//! # dnsperf
//!
//! Measures query latency of every authoritative nameserver of a fixed list
//! of domains, over and over, and keeps running per-domain statistics.

mod bootstrap;
mod di;

use bootstrap::{init_database, init_logging, load_config};
use clap::Parser;
use di::{DnsServices, Repositories, UseCases};
use dnsperf_domain::CliOverrides;
use dnsperf_jobs::{JobRunner, MeasurementJob};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "dnsperf")]
#[command(version)]
#[command(about = "Authoritative nameserver latency tracker")]
struct Cli {
    /// Path to a TOML config file (default: ./dnsperf.toml if present)
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Sleep between passes, in milliseconds
    #[arg(short = 'i', long)]
    interval_ms: Option<u64>,

    /// SQLite database file
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Domain to measure; repeat to replace the configured list
    #[arg(long = "domain")]
    domains: Vec<String>,

    /// Drop all stored measurements and stats before starting
    #[arg(short = 'r', long)]
    reset_db: bool,

    /// Do not print the per-pass stats report
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Debug-level logging
    #[arg(short = 'v', long, conflicts_with = "log_level")]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            interval_ms: self.interval_ms,
            database_path: self.database.clone(),
            domains: (!self.domains.is_empty()).then(|| self.domains.clone()),
            log_level: if self.verbose {
                Some("debug".to_string())
            } else {
                self.log_level.clone()
            },
            quiet: self.quiet,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.overrides())?;
    init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        domains = config.schedule.domains.len(),
        interval_ms = config.schedule.interval_ms,
        database = %config.database.path,
        "Configuration loaded"
    );

    for (rank, domain) in config.schedule.domains.iter().enumerate() {
        info!("{:>3}. {}", rank + 1, domain);
    }

    let pool = init_database(&config.database).await?;
    let repos = Repositories::new(pool.clone());
    let dns = DnsServices::new(&config.dns)?;
    let use_cases = UseCases::new(&repos, &dns, &config.schedule);

    use_cases
        .seed_stats
        .execute(&config.schedule.domains, cli.reset_db)
        .await?;

    let shutdown = CancellationToken::new();

    let mut job = MeasurementJob::new(
        use_cases.measure_domain.clone(),
        use_cases.update_stats.clone(),
        config.schedule.domains.clone(),
    )
    .with_interval(config.schedule.interval_ms)
    .with_cancellation(shutdown.clone());
    if config.schedule.report {
        job = job.with_report(use_cases.get_report.clone());
    }

    let handles = JobRunner::new().with_measurement(job).start();

    info!("dnsperf running, press Ctrl+C to stop");
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }

    info!("Shutdown requested");
    shutdown.cancel();
    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Background job panicked");
        }
    }

    pool.close().await;
    info!("dnsperf stopped");
    Ok(())
}
