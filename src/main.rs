use clap::Parser;
use tokio::io::{self, BufReader};
use tracing_subscriber::EnvFilter;

use wallet_bridge::config::BridgeConfig;
use wallet_bridge::error::Result;
use wallet_bridge::services::stdio;
use wallet_bridge::WalletBridge;

#[derive(Parser, Debug)]
#[command(name = "wallet-bridge")]
#[command(about = "Relay JSON-line envelopes between an application and a wallet provider")]
struct Cli {
    #[arg(long)]
    config: Option<String>,

    #[arg(long, env = "WALLET_BRIDGE_PROVIDER_URL")]
    provider_url: Option<String>,

    #[arg(long)]
    channel_capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wallet_bridge=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BridgeConfig::from_file(path)?,
        None => BridgeConfig::default(),
    };
    if let Some(url) = cli.provider_url {
        config = config.with_provider_url(url);
    }
    if cli.channel_capacity.is_some() {
        config.channel_capacity = cli.channel_capacity;
    }

    let bridge = WalletBridge::from_config(&config)?;
    let summary = stdio::run(BufReader::new(io::stdin()), io::stdout(), bridge).await?;
    tracing::info!(
        forwarded = summary.forwarded,
        delivered = summary.delivered,
        skipped = summary.skipped,
        "input exhausted"
    );
    Ok(())
}
