//! `pitlane`: listen for F1 22 telemetry and hand it to a consumer.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pitlane::logging::init_logging;
use pitlane::{AppConfig, ConsumerKind, Listener, UdpSource, consumers};

// ── CLI ─────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "pitlane", version, about = "Command-line tool for decoding F1 22 UDP telemetry")]
struct Cli {
    /// UDP port to listen on [default: 20777]
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Address to bind [default: 127.0.0.1]
    #[arg(long, value_name = "ADDR")]
    bind: Option<IpAddr>,

    /// Consumer applied to decoded packets [default: log]
    #[arg(short, long, value_enum, value_name = "NAME")]
    filter: Option<ConsumerKind>,

    /// Output file for the capture consumer
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Capture every packet, not only complete sessions
    #[arg(long)]
    all_packets: bool,

    /// YAML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set [default: info]
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => AppConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(kind) = self.filter {
            config.consumer = kind;
        }
        if let Some(output) = self.output {
            config.capture_path = Some(output);
        }
        if self.all_packets {
            config.capture_all_packets = true;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

// ── Main ────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_level);

    let consumer = consumers::build(&config).context("creating consumer")?;
    let source = UdpSource::from_config(&config.listener)
        .await
        .with_context(|| format!("binding {}", config.listener.socket_addr()))?;
    info!("Using consumer: {:?}", config.consumer);

    let handle = Listener::spawn(source, consumer, config.listener.queue_capacity);
    let cancel = handle.cancellation_token();

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("waiting for Ctrl-C")?;
            info!("Stopping listener");
            cancel.cancel();
        }
        _ = cancel.cancelled() => {}
    }

    let stats = handle.join().await.context("waiting for listener")?;
    info!(
        "{} datagrams received, {} decoded, {} rejected",
        stats.received, stats.decoded, stats.rejected
    );
    Ok(())
}
