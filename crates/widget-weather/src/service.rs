//! Cached weather lookups by location name or widget.

use std::sync::Arc;
use std::time::Duration;

use widget_core::WeatherConfig;

use crate::cache::TtlCache;
use crate::client::OpenMeteoClient;
use crate::error::WeatherError;
use crate::location::{cache_key, normalize_location};
use crate::types::{WeatherPayload, WidgetWeather};
use crate::widget::WidgetLocations;

pub type WeatherCache = TtlCache<Arc<WeatherPayload>>;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(300_000);

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: OpenMeteoClient,
    cache: Arc<WeatherCache>,
    ttl: Duration,
}

impl WeatherService {
    pub fn new(client: OpenMeteoClient, cache: Arc<WeatherCache>, ttl: Duration) -> Self {
        Self { client, cache, ttl }
    }

    /// Client, a fresh cache, and TTL all taken from configuration.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = OpenMeteoClient::new(config)?;
        Ok(Self::new(client, Arc::new(TtlCache::new()), config.cache_ttl()))
    }

    pub fn cache(&self) -> &Arc<WeatherCache> {
        &self.cache
    }

    /// Current weather for a free-text location.
    ///
    /// A cached payload is returned as-is for as long as it is valid.
    /// Otherwise the location is geocoded and its forecast fetched; the
    /// payload is cached only when both calls succeed.
    pub async fn get_weather_for_location(
        &self,
        raw_location: &str,
    ) -> Result<Arc<WeatherPayload>, WeatherError> {
        let location = normalize_location(raw_location);
        if location.is_empty() {
            return Err(WeatherError::InvalidInput);
        }

        let key = cache_key(&location);
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(key = %key, "Weather cache hit");
            return Ok(cached);
        }
        tracing::debug!(key = %key, "Weather cache miss");

        let geo = self.client.geocode(&location).await?;
        let current = self
            .client
            .fetch_current_weather(geo.latitude, geo.longitude)
            .await?;

        let payload = Arc::new(WeatherPayload::from_lookup(geo, current));
        self.cache.set(key, payload.clone(), self.ttl);

        tracing::info!(
            "Fetched weather for {}, {}: {}°C",
            payload.location,
            payload.country,
            payload.temperature
        );
        Ok(payload)
    }

    /// Current weather for the location stored on a widget.
    pub async fn get_weather_for_widget(
        &self,
        widgets: &dyn WidgetLocations,
        widget_id: &str,
    ) -> Result<WidgetWeather, WeatherError> {
        let location = widgets
            .location_for(widget_id)
            .ok_or_else(|| WeatherError::WidgetNotFound(widget_id.to_string()))?;

        let data = self.get_weather_for_location(&location).await?;

        Ok(WidgetWeather {
            widget_id: widget_id.to_string(),
            location,
            data: WeatherPayload::clone(&data),
        })
    }

    /// Drop every cached payload.
    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::info!("Weather cache cleared");
    }
}
