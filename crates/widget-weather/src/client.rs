//! Open-Meteo client: place name -> coordinates -> current weather.
//! Free API, no key required.

use serde::Deserialize;
use tracing::instrument;
use widget_core::WeatherConfig;

use crate::error::WeatherError;
use crate::types::{CurrentWeather, GeoResult};

const USER_AGENT: &str = concat!("widget-weather/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<RawCurrentWeather>,
}

/// Fields are optional so a partial block is reported as unavailable
/// instead of failing to decode.
#[derive(Debug, Deserialize)]
struct RawCurrentWeather {
    temperature: Option<f64>,
    windspeed: Option<f64>,
    weathercode: Option<i32>,
    time: Option<String>,
}

impl RawCurrentWeather {
    fn complete(self) -> Option<CurrentWeather> {
        Some(CurrentWeather {
            temperature: self.temperature?,
            windspeed: self.windspeed?,
            weathercode: self.weathercode?,
            time: self.time?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteoClient {
    /// Build a client; every request it sends is bounded by the configured timeout.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
        })
    }

    /// Resolve a place name to the single best match.
    #[instrument(skip(self), level = "debug")]
    pub async fn geocode(&self, location: &str) -> Result<GeoResult, WeatherError> {
        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("name", location),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Geocoding request failed: {}", e);
                e
            })?
            .error_for_status()?;

        let body: GeocodingResponse = response.json().await?;

        body.results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                tracing::debug!("Geocoder returned no match");
                WeatherError::NotFound(location.to_string())
            })
    }

    /// Fetch the current conditions at the given coordinates.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_current_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Forecast request failed: {}", e);
                e
            })?
            .error_for_status()?;

        let body: ForecastResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                WeatherError::UpstreamUnavailable(format!("malformed forecast response: {}", e))
            } else {
                WeatherError::from(e)
            }
        })?;

        body.current_weather
            .and_then(RawCurrentWeather::complete)
            .ok_or_else(|| {
                tracing::warn!("Forecast response has no usable current_weather block");
                WeatherError::UpstreamUnavailable(format!(
                    "no current weather for {}, {}",
                    latitude, longitude
                ))
            })
    }
}
