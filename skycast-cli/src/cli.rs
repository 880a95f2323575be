use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use skycast_core::{Config, Favorites, FileStorage, OpenWeatherClient, Units, search, theme};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather lookup with favorites")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up current weather and a short-range forecast for a city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        city: String,
    },

    /// Store the OpenWeather API key and unit system.
    Configure,

    /// Manage remembered cities.
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },

    /// Show or toggle the light/dark theme preference.
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List remembered cities in the order they were added.
    List,

    /// Forget one city (matched case-insensitively).
    Remove { city: String },

    /// Forget all cities.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// Print the active theme.
    Show,

    /// Switch between light and dark.
    Toggle,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { city } => show(&city).await,
            Command::Configure => configure(),
            Command::Favorites { command } => manage_favorites(command),
            Command::Theme { command } => manage_theme(command),
        }
    }
}

async fn show(city: &str) -> Result<()> {
    let config = Config::load()?;
    let client = OpenWeatherClient::new(config)?;
    let mut favorites = Favorites::new(FileStorage::open_default()?);

    match search(&client, &mut favorites, city).await {
        Ok(outcome) => {
            render::current(&outcome.current);
            if let Some(days) = &outcome.forecast {
                render::forecast(days);
            }
            Ok(())
        }
        Err(err) => Err(anyhow!("{}", err.user_message())),
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let units = Select::new("Units:", vec![Units::Metric, Units::Imperial])
        .prompt()
        .context("Failed to read unit selection")?;

    config.api_key = api_key.trim().to_string();
    config.units = units;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn manage_favorites(command: FavoritesCommand) -> Result<()> {
    let mut favorites = Favorites::new(FileStorage::open_default()?);

    match command {
        FavoritesCommand::List => {
            let entries = favorites.list()?;
            if entries.is_empty() {
                println!("No favorite cities yet. `skycast show <city>` adds one.");
            } else {
                for entry in entries {
                    println!("{:<20} {:>4}°", entry.city, entry.temperature);
                }
            }
        }
        FavoritesCommand::Remove { city } => {
            favorites.remove(&city)?;
            println!("Removed {city} from favorites.");
        }
        FavoritesCommand::Clear => {
            favorites.clear()?;
            println!("Cleared favorites.");
        }
    }

    Ok(())
}

fn manage_theme(command: ThemeCommand) -> Result<()> {
    let mut storage = FileStorage::open_default()?;

    match command {
        ThemeCommand::Show => println!("{}", theme::load(&storage)?),
        ThemeCommand::Toggle => println!("{}", theme::toggle(&mut storage)?),
    }

    Ok(())
}
