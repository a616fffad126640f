use anyhow::Context;
use clap::Parser;
use holeflux_domain::{CliOverrides, CollectionMode};
use holeflux_jobs::{CycleOutcome, JobRunner, MetricsCollectionJob};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "holeflux")]
#[command(version)]
#[command(about = "Pi-hole statistics exporter for InfluxDB")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Collection interval in seconds
    #[arg(short = 'i', long, value_name = "SECS")]
    interval: Option<u64>,

    /// Collection mode (totals, live, raw)
    #[arg(short = 'm', long)]
    mode: Option<CollectionMode>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        interval_secs: cli.interval,
        mode: cli.mode,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)
        .context("invalid configuration")?;

    bootstrap::init_logging(&config);

    info!("Starting holeflux v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(&config);

    let use_cases = di::UseCases::new(&config).context("failed to build services")?;
    let job = MetricsCollectionJob::new(use_cases.collect, use_cases.publish, config.interval_secs());

    if cli.once {
        job.prepare().await;
        return match job.run_once().await {
            CycleOutcome::Published { groups } => {
                info!(groups, "Single cycle completed");
                Ok(())
            }
            CycleOutcome::CollectFailed(e) => Err(e).context("collection failed"),
            CycleOutcome::PublishFailed(e) => Err(e).context("publishing failed"),
        };
    }

    let shutdown = CancellationToken::new();
    let handles = JobRunner::new()
        .with_metrics_collection(job)
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    bootstrap::shutdown_signal().await;
    shutdown.cancel();

    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Background job terminated abnormally");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
