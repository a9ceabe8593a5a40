//! Weather lookup error types.

use thiserror::Error;
use widget_core::{NetworkError, ReqwestErrorExt};

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Location is missing")]
    InvalidInput,

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Widget not found: {0}")]
    WidgetNotFound(String),

    #[error("Weather data unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.into_network_error())
    }
}

impl WeatherError {
    /// HTTP status the outer API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound(_) | Self::WidgetNotFound(_) => 404,
            Self::UpstreamUnavailable(_) => 502,
            Self::Network(_) => 500,
        }
    }

    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput => "Please enter a location.".to_string(),
            Self::NotFound(name) => format!("No place called \"{}\" was found.", name),
            Self::WidgetNotFound(_) => "This widget no longer exists.".to_string(),
            Self::UpstreamUnavailable(_) => {
                "Weather data is currently unavailable. Please try again later.".to_string()
            }
            Self::Network(e) => e.user_message().to_string(),
        }
    }

    /// Whether repeating the same lookup could succeed. Lookups are never
    /// retried internally; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_transient(),
            _ => false,
        }
    }
}
