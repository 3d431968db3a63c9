use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use std::{path::PathBuf, sync::Arc};
use weather_core::{Config, Fulfillment, OpenWeatherProvider, WebhookRequest};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-fulfillment", version, about = "Weather webhook fulfillment")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the webhook server.
    Serve {
        /// Address to bind, overrides the config file.
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind, overrides the config file.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the fulfillment text for a city, as the webhook would answer.
    Show {
        /// City name.
        city: String,

        /// Optional date/time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS); if absent, means "now".
        #[arg(long)]
        date: Option<String>,
    },

    /// Store the OpenWeather API key and default city in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Serve { host, port } => {
                let mut config = load_config(self.config.as_deref())?;
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                server::serve(&config).await
            }
            Command::Show { city, date } => {
                let config = load_config(self.config.as_deref())?;
                let provider = OpenWeatherProvider::new(&config.openweather)
                    .context("Failed to build OpenWeather HTTP client")?;
                let fulfillment = Fulfillment::new(Arc::new(provider), config.default_city);

                let request = WebhookRequest::with_parameters(Some(&city), date.as_deref());
                let response = fulfillment.respond(&request).await;
                println!("{}", response.fulfillment_text);
                Ok(())
            }
            Command::Configure => configure(self.config),
        }
    }
}

/// File (or defaults), then environment.
fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env(|name| std::env::var(name).ok());
    Ok(config)
}

fn configure(path: Option<PathBuf>) -> Result<()> {
    // Only file values are saved; environment overrides stay out.
    let mut config = match &path {
        Some(p) if p.exists() => Config::load_from(p)?,
        Some(_) => Config::default(),
        None => Config::load()?,
    };

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.openweather.api_key = api_key.trim().to_string();
    config.default_city = default_city.trim().to_string();

    let saved_to = match path {
        Some(p) => {
            config.save_to(&p)?;
            p
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}
