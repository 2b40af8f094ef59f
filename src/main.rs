//! dicepool - exploding dice pool server

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dicepool::{Config, Server};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exploding d10 dice pool server
#[derive(Parser, Debug)]
#[command(name = "dicepool", version, about = "Serve the dice pool roller over HTTP")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Rolls kept in the history (overrides config)
    #[arg(long)]
    history_limit: Option<usize>,

    /// RNG seed for reproducible rolls (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dicepool=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(limit) = args.history_limit {
        config.history_limit = limit;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let server = Arc::new(Server::new(config)?);

    let signal_server = server.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal_server.shutdown();
        }
    });

    server.run().await?;

    Ok(())
}
