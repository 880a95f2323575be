//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather HTTP client and its error taxonomy
//! - Forecast aggregation into per-day summaries
//! - Favorites and theme preference over a pluggable key-value storage
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries.

pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod forecast;
pub mod model;
pub mod search;
pub mod storage;
pub mod theme;

pub use client::OpenWeatherClient;
pub use config::Config;
pub use error::WeatherError;
pub use favorites::{FavoriteEntry, Favorites};
pub use model::{CurrentConditions, DaySummary, ForecastSample, Units};
pub use search::{SearchOutcome, search, validate_city};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use theme::Theme;
