use crate::client::OpenWeatherClient;
use crate::error::WeatherError;
use crate::favorites::Favorites;
use crate::forecast;
use crate::model::{CurrentConditions, DaySummary};
use crate::storage::KeyValueStorage;

/// Validate a raw city name: valid iff it contains any non-whitespace.
///
/// Returns the trimmed name. Internal whitespace is left alone, there is no
/// length cap and no character-set restriction.
pub fn validate_city(raw: &str) -> Result<&str, WeatherError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::EmptyCity);
    }

    Ok(trimmed)
}

/// Outcome of one user-initiated search.
#[derive(Debug)]
pub struct SearchOutcome {
    pub current: CurrentConditions,
    /// `None` when the forecast fetch failed; that is never fatal.
    pub forecast: Option<Vec<DaySummary>>,
}

/// The full search flow: validate the name, fetch current conditions, record
/// the city as a favorite, then fetch and aggregate the forecast using the
/// coordinates the current-conditions response returned.
///
/// The calls run sequentially on one task: the current-conditions request
/// completes before the forecast request is issued. Current-conditions errors
/// abort the search; forecast errors only drop the forecast section. A
/// failure to persist the favorite is logged and ignored.
pub async fn search<S: KeyValueStorage>(
    client: &OpenWeatherClient,
    favorites: &mut Favorites<S>,
    raw_city: &str,
) -> Result<SearchOutcome, WeatherError> {
    let city = validate_city(raw_city)?;

    let current = client.fetch_current(city).await?;

    if let Err(err) = favorites.add(&current.city, current.temperature) {
        tracing::warn!(error = %err, "failed to persist favorite");
    }

    let forecast = match client.fetch_forecast(current.lat, current.lon).await {
        Ok(samples) => Some(forecast::summarize(&samples)),
        Err(err) => {
            tracing::warn!(error = %err, "forecast unavailable, skipping");
            None
        }
    };

    Ok(SearchOutcome { current, forecast })
}
