use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, HttpFetcher, config::env_api_key};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::{error, info, warn};

/// Top-level CLI struct. Without a subcommand the tool prompts for a city.
#[derive(Debug, Parser)]
#[command(name = "weather-forecast", version, about = "5-day weather forecast for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            None => forecast().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
    {
        Ok(key) => key,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => return Ok(()),
        Err(e) => return Err(e).context("Failed to read API key"),
    };

    let Some(api_key) = normalize(&api_key) else {
        println!("API key cannot be empty.");
        return Ok(());
    };

    config.set_api_key(api_key);
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn forecast() -> anyhow::Result<()> {
    let city = match Text::new("Enter a city name to get weather information:").prompt() {
        Ok(city) => city,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => return Ok(()),
        Err(e) => return Err(e).context("Failed to read city name"),
    };

    let Some(city) = normalize(&city) else {
        println!("City name cannot be empty.");
        return Ok(());
    };

    let env_key = env_api_key();
    let config = config_or_default(Config::load(), env_key.is_some())?;

    let from_env = env_key.is_some();
    let api_key = match config.resolve_api_key(env_key) {
        Ok(key) => key,
        Err(e) => {
            error!("{e}");
            return Ok(());
        }
    };
    info!(from_env, "resolved API key");

    let fetcher = match HttpFetcher::new(config.timeout()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("{e}");
            return Ok(());
        }
    };

    let base = config.base_url;
    let task = tokio::spawn(async move {
        let mut out = std::io::stdout();
        forecast_core::run(&fetcher, &base, &city, &api_key, &mut out).await
    });

    if let Err(e) = task.await {
        error!("Forecast task failed: {e}");
    }

    Ok(())
}

/// A broken config file only matters when it is the sole source of the API key.
fn config_or_default(loaded: anyhow::Result<Config>, have_env_key: bool) -> anyhow::Result<Config> {
    match loaded {
        Ok(config) => Ok(config),
        Err(e) if have_env_key => {
            warn!("Ignoring config file: {e:#}");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn normalize(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
