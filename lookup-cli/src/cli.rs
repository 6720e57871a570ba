use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Locale;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use lookup_core::{Config, LookupController, LookupState, Settings, provider_from_settings};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::render_state;

const QUIT_COMMAND: &str = ":q";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Look up current weather for a city")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI key (and display locale) in the config file.
    Configure,

    /// Look up one city and exit.
    Show {
        /// City or location name.
        city: String,
    },

    /// Type a city per line; results refresh as they arrive. This is the default.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let config = Config::load_from(&config_path)?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(config, &config_path),
            Command::Show { city } => show(&config.resolve_from_env()?, city).await,
            Command::Interactive => interactive(&config.resolve_from_env()?).await,
        }
    }
}

fn configure(mut config: Config, path: &Path) -> anyhow::Result<()> {
    let api_key = Password::new("WeatherAPI key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let locale = Text::new("Display locale:")
        .with_default(&config.locale)
        .with_help_message("POSIX-style, e.g. en_US, de_DE, fr_FR")
        .prompt()
        .context("Failed to read locale")?;

    config.set_api_key(api_key);
    config.locale = locale;
    // Refuse to write a config that would fail at startup.
    config.resolve(None)?;
    config.save_to(path)?;

    tracing::info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(settings: &Settings, city: String) -> anyhow::Result<()> {
    let provider = provider_from_settings(settings)?;
    let (mut controller, mut outcomes) = LookupController::new(provider, settings.forecast_days);

    controller.update_query(city);
    controller.submit();
    controller.resolve(&mut outcomes).await;

    if let LookupState::Failed(err) = controller.state() {
        return Err((*err).into());
    }

    print!("{}", render_state(controller.state(), settings.locale));
    Ok(())
}

async fn interactive(settings: &Settings) -> anyhow::Result<()> {
    let provider = provider_from_settings(settings)?;
    let (mut controller, mut outcomes) = LookupController::new(provider, settings.forecast_days);
    let locale = settings.locale;

    println!("Weather Forecast - get real-time weather information ({QUIT_COMMAND} to quit)\n");
    redraw(controller.state(), locale)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if line.trim() == QUIT_COMMAND {
                    break;
                }
                controller.update_query(line);
                controller.submit();
                redraw(controller.state(), locale)?;
            }
            Some(action) = outcomes.recv() => {
                if controller.dispatch(action) {
                    redraw(controller.state(), locale)?;
                }
            }
        }
    }

    Ok(())
}

fn redraw(state: &LookupState, locale: Locale) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "\n{}\nEnter city name > ", render_state(state, locale))?;
    stdout.flush()?;
    Ok(())
}
