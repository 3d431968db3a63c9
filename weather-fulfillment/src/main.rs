//! Binary crate for the `weather-fulfillment` webhook server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the webhook over HTTP
//! - Interactive configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;
use weather_fulfillment::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the key may come from the config file.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "weather_fulfillment=info,weather_core=info,tower_http=info".into()
        }))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
