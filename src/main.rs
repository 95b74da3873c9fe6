//! TradingView Signal Relay
//!
//! Webhook listener that forwards trading alerts to Telegram.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use signal_relay::{
    config::{Config, DEFAULT_CHAT_ID},
    format::{FixedClock, Formatter},
    notify::Notifier,
    relay::{Outcome, Relay},
    server,
    types::AlertRecord,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "signal-relay")]
#[command(about = "Relay TradingView alerts to Telegram")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: search config.toml, config.yaml, ~/.config/signal-relay)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the webhook listener
    Serve,
    /// Render an alert payload without sending it
    Preview {
        /// JSON payload file
        payload: PathBuf,
        /// Timestamp for time-stamped messages (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Commands::Serve => run_server(config).await,
        Commands::Preview { payload, at } => preview(&payload, at),
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let notifier = Notifier::from_config(&config.telegram);
    if !notifier.is_enabled() {
        tracing::warn!("TELEGRAM_BOT_TOKEN not set - alerts will be logged, not sent");
    }

    let relay = Relay::new(Formatter::system(), Arc::new(notifier));

    tracing::info!("Starting signal relay (chat {})", DEFAULT_CHAT_ID);
    server::serve(&config.server, relay).await
}

fn preview(path: &Path, at: Option<DateTime<Utc>>) -> anyhow::Result<()> {
    let body = std::fs::read(path)?;
    let record = AlertRecord::from_slice(&body)?;

    let formatter = match at {
        Some(at) => Formatter::new(Arc::new(FixedClock(at))),
        None => Formatter::system(),
    };
    let relay = Relay::new(formatter, Arc::new(Notifier::disabled()));

    match relay.evaluate(&record) {
        Outcome::Deliver(message) => {
            println!("\n📨 {} message ({})\n", message.variant, message.parse_mode.as_str());
            println!("{}", message.text);
        }
        Outcome::Filtered(rejection) => {
            println!(
                "\n⛔ Filtered [{} / {}]: {}",
                rejection.category(),
                rejection.reason(),
                rejection
            );
        }
    }

    Ok(())
}
