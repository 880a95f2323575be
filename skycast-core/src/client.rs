use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::Config;
use crate::error::WeatherError;
use crate::model::{CurrentConditions, ForecastSample};

/// Client for the OpenWeather current-conditions and forecast endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: Config,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(WeatherError::Transport)?;

        Ok(Self { config, http })
    }

    /// Fetch current conditions for a city name.
    ///
    /// The name is expected to be validated already (see
    /// [`crate::search::validate_city`]); it is passed through as-is.
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        // A placeholder key is caught here, before any request goes out.
        if !self.config.is_configured() {
            return Err(WeatherError::Configuration);
        }

        let url = format!("{}/weather", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(%city, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", self.config.units.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(WeatherError::Transport)?;

        match res.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidCredentials),
            status => {
                return Err(WeatherError::Upstream {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                });
            }
        }

        let body = res.text().await.map_err(WeatherError::Transport)?;
        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(WeatherError::BadPayload)?;

        let observed_at = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);

        let (condition, description, icon) = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new(), String::new()));

        Ok(CurrentConditions {
            city: parsed.name,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity: parsed.main.humidity,
            pressure: parsed.main.pressure,
            wind_speed: parsed.wind.speed,
            visibility: parsed.visibility,
            condition,
            description,
            icon,
            observed_at,
            lat: parsed.coord.lat,
            lon: parsed.coord.lon,
        })
    }

    /// Fetch 3-hourly forecast samples for a coordinate pair.
    ///
    /// Unlike [`fetch_current`](Self::fetch_current), every failure collapses
    /// into [`WeatherError::ForecastUnavailable`]; the cause is only logged.
    /// Callers render search results without a forecast section rather than
    /// failing the whole search.
    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let url = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        tracing::debug!(lat, lon, "requesting forecast");

        let res = match self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", self.config.units.as_str().to_string()),
                ("appid", self.config.api_key.clone()),
            ])
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::debug!(error = %err, "forecast request failed");
                return Err(WeatherError::ForecastUnavailable);
            }
        };

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(%status, "forecast request rejected");
            return Err(WeatherError::ForecastUnavailable);
        }

        let parsed: OwForecastResponse = match res.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(error = %err, "forecast response unreadable");
                return Err(WeatherError::ForecastUnavailable);
            }
        };

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| {
                let (condition, icon) = entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| (w.main, w.icon))
                    .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

                ForecastSample { dt: entry.dt, temperature: entry.main.temp, condition, icon }
            })
            .collect();

        Ok(samples)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    // Omitted upstream in some conditions.
    #[serde(default)]
    visibility: u32,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
