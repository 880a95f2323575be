use thiserror::Error;

/// Errors produced while looking up weather data.
///
/// The current-conditions path keeps upstream statuses distinguishable; the
/// forecast path deliberately collapses every failure into
/// [`WeatherError::ForecastUnavailable`] because callers treat a missing
/// forecast as non-fatal.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API key is missing or still the placeholder value.
    #[error("no API key configured")]
    Configuration,

    #[error("city name must not be empty")]
    EmptyCity,

    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("invalid API credentials")]
    InvalidCredentials,

    #[error("upstream error {status}: {reason}")]
    Upstream { status: u16, reason: String },

    #[error("network failure")]
    Transport(#[source] reqwest::Error),

    #[error("malformed response body")]
    BadPayload(#[source] serde_json::Error),

    #[error("forecast unavailable")]
    ForecastUnavailable,
}

impl WeatherError {
    /// User-facing message for terminal display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration => {
                "No API key configured. Run `skycast configure` first.".to_string()
            }
            Self::EmptyCity => "Please enter a city name.".to_string(),
            Self::CityNotFound(city) => {
                format!("City \"{city}\" not found. Check the spelling and try again.")
            }
            Self::InvalidCredentials => {
                "The weather service rejected the API key. Run `skycast configure` with a valid key."
                    .to_string()
            }
            Self::Upstream { status, .. } => {
                format!("The weather service returned an error ({status}). Try again later.")
            }
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
            Self::BadPayload(_) => {
                "The weather service returned an unexpected response.".to_string()
            }
            Self::ForecastUnavailable => "Forecast is currently unavailable.".to_string(),
        }
    }
}
