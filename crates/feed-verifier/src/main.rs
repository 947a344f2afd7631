//! Feed verifier CLI
//!
//! Connects to a running node's notification feed and RPC port, runs the
//! three correlation checks, and exits non-zero on the first failure.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use feed_telemetry::{init_telemetry, TelemetryConfig};
use feed_verifier::adapters::{self, JsonRpcNodeClient, RpcCredentials};
use feed_verifier::config::timeout_from_secs;
use feed_verifier::{CorrelationHarness, FeedVerifierApi, HarnessConfig, VerifierError};
use shared_bus::TopicFilter;
use shared_types::PayloadFormat;

/// Verify a node's block and transaction notification feed
#[derive(Parser, Debug)]
#[command(name = "feed-verifier")]
#[command(about = "Correlate notification-feed hashes with node RPC results")]
struct Args {
    /// Notification feed endpoint
    #[arg(long)]
    zmq_endpoint: Option<String>,

    /// RPC URL of the node whose feed is subscribed
    #[arg(long)]
    rpc_url: Option<String>,

    /// RPC URL of a peer node that drives batch blocks and the transaction
    #[arg(long)]
    peer_rpc_url: Option<String>,

    /// RPC user
    #[arg(long)]
    rpc_user: Option<String>,

    /// RPC password
    #[arg(long)]
    rpc_password: Option<String>,

    /// Seconds to wait for each notification, 0 waits forever
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Blocks generated in the batch check
    #[arg(long)]
    batch_size: Option<usize>,

    /// Coins sent in the transaction check
    #[arg(long)]
    amount: Option<f64>,

    /// Payload encoding of the feed: network or hash
    #[arg(long)]
    payload_format: Option<PayloadFormat>,

    /// Milliseconds to wait after subscribing before the first command
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Log filter, e.g. `feed_verifier=debug`
    #[arg(long)]
    log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    /// Flags override the `FEED_*` environment, which overrides defaults.
    fn into_config(self) -> Result<HarnessConfig, VerifierError> {
        let base = HarnessConfig::from_env()?;
        Ok(HarnessConfig {
            zmq_endpoint: self.zmq_endpoint.unwrap_or(base.zmq_endpoint),
            rpc_url: self.rpc_url.unwrap_or(base.rpc_url),
            peer_rpc_url: self.peer_rpc_url.or(base.peer_rpc_url),
            rpc_user: self.rpc_user.or(base.rpc_user),
            rpc_password: self.rpc_password.or(base.rpc_password),
            receive_timeout: self
                .timeout_secs
                .map_or(base.receive_timeout, timeout_from_secs),
            batch_size: self.batch_size.unwrap_or(base.batch_size),
            send_amount: self.amount.unwrap_or(base.send_amount),
            payload_format: self.payload_format.unwrap_or(base.payload_format),
            settle: self.settle_ms.map_or(base.settle, Duration::from_millis),
        })
    }
}

fn credentials(config: &HarnessConfig) -> Option<RpcCredentials> {
    config.rpc_user.as_ref().map(|user| RpcCredentials {
        user: user.clone(),
        password: config.rpc_password.clone(),
    })
}

async fn run(config: HarnessConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let subscriber = adapters::subscribe(
        &config.zmq_endpoint,
        &TopicFilter::all(),
        config.receive_timeout,
    )
    .await
    .context("Failed to subscribe to notification feed")?;

    // SUB sockets drop everything published before the subscription lands.
    tokio::time::sleep(config.settle).await;

    let primary = JsonRpcNodeClient::new(&config.rpc_url, credentials(&config))
        .context("Failed to create RPC client")?;
    let mut harness = CorrelationHarness::new(primary, subscriber, &config);

    if let Some(peer_url) = &config.peer_rpc_url {
        let peer = JsonRpcNodeClient::new(peer_url, credentials(&config))
            .context("Failed to create peer RPC client")?;
        info!(peer = %peer_url, "Relayed actions go through peer node");
        harness = harness.with_peer(peer);
    }

    let report = harness.run_all().await.context("Verification failed")?;
    for check in &report.checks {
        info!(
            check = %check.kind,
            hashes = check.verified.len(),
            elapsed_ms = check.elapsed.as_millis() as u64,
            "Check passed"
        );
    }
    info!(
        hashes_verified = report.hashes_verified(),
        frames_received = report.metrics.frames_received,
        "Feed verified"
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if let Some(level) = &args.log_level {
        telemetry = telemetry.with_log_level(level.clone());
    }
    telemetry.json_logs |= args.json_logs;

    let _telemetry = match init_telemetry(telemetry) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        endpoint = %config.zmq_endpoint,
        rpc = %config.rpc_url,
        batch_size = config.batch_size,
        format = %config.payload_format,
        "Starting feed verifier"
    );

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
