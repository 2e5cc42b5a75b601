//! LBP launchpad keeper
//!
//! Polls the mention source for launch requests, mines CREATE2 salts,
//! assembles auction parameters, and drives launch transactions to
//! confirmation. Also serves the prepare-launch and scan-trigger HTTP
//! endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio::time;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use launchpad_keeper::api::{self, ApiState};
use launchpad_keeper::chain::ChainClient;
use launchpad_keeper::config::KeeperConfig;
use launchpad_keeper::executor::EvmExecutor;
use launchpad_keeper::launch::{build_engine, LaunchService};
use launchpad_keeper::mentions::HttpMentionSource;
use launchpad_keeper::parser::PostParser;
use launchpad_keeper::scanner::Scanner;
use launchpad_keeper::store::MemoryStore;

#[derive(Parser)]
#[command(name = "launchpad-keeper")]
#[command(about = "Off-chain keeper for social-triggered LBP token launches")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "keeper.toml")]
    config: String,

    /// Override log level
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single scan cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = if std::path::Path::new(&cli.config).exists() {
        KeeperConfig::load(&cli.config)?
    } else {
        warn!("config file not found, using defaults: {}", cli.config);
        let mut config = KeeperConfig::default();
        config.apply_env_overrides();
        config
    };
    config.validate()?;

    info!("starting launchpad keeper");
    info!("chain id: {}", config.chain.chain_id);
    info!("launcher: {}", config.chain.launcher);
    info!("rpc url: {}", config.rpc_url());

    let chain = ChainClient::new(&config.rpc_url())?;
    let store = Arc::new(MemoryStore::new());
    let source = Arc::new(HttpMentionSource::new(
        config.mentions.api_base.clone(),
        config.mentions.bearer_token.clone(),
        config.mentions.handle.clone(),
        config.mentions.trigger.clone(),
    ));
    let executor = Arc::new(EvmExecutor::new(
        chain.clone(),
        config.chain.submitter_key.as_deref(),
        config.chain.launcher,
        config.chain.chain_id,
    )?);
    let launch = Arc::new(LaunchService::new(
        Arc::new(chain),
        build_engine(&config),
        config.clone(),
    ));
    let scanner = Arc::new(Scanner::new(
        source,
        store,
        executor,
        launch.clone(),
        PostParser::new(config.mentions.trigger.clone()),
        config.limits.rate_limit_hours,
        config.mentions.batch_limit,
    ));

    if cli.once {
        let report = scanner.scan_once().await?;
        info!(
            "scan complete: {} found, {} launched, {} failed, {} skipped",
            report.mentions_found, report.launched, report.failed, report.skipped
        );
        return Ok(());
    }

    let state = ApiState {
        scanner: scanner.clone(),
        launch,
        scan_secret: config.server.scan_secret.clone(),
    };
    let server = api::start_server(state, &config.server.bind_address).await?;

    let scan_loop = {
        let scanner = scanner.clone();
        let enabled = config.mentions.enabled;
        let interval_secs = config.mentions.poll_interval_secs;
        tokio::spawn(async move {
            if !enabled {
                info!("scan loop disabled; scans run only via the HTTP trigger");
                return;
            }
            let mut interval = time::interval(Duration::from_secs(interval_secs));
            loop {
                interval.tick().await;
                match scanner.scan_once().await {
                    Ok(report) => {
                        if report.mentions_found > 0 {
                            info!(
                                "scan: {} found, {} launched, {} failed, {} skipped",
                                report.mentions_found,
                                report.launched,
                                report.failed,
                                report.skipped
                            );
                        }
                        for e in &report.errors {
                            warn!("scan error: {e}");
                        }
                    }
                    Err(e) => error!("scan cycle failed: {e}"),
                }
            }
        })
    };

    info!("keeper started; press Ctrl+C to shut down");
    tokio::select! {
        _ = signal::ctrl_c() => info!("received shutdown signal"),
        _ = server => warn!("API server exited"),
        _ = scan_loop => warn!("scan loop exited"),
    }

    info!("shutting down launchpad keeper");
    Ok(())
}

fn init_logging(override_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(override_level.unwrap_or("launchpad_keeper=info,launchpad_core=info"))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
