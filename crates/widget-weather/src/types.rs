use serde::{Deserialize, Serialize};

/// First geocoding match for a place name. Not cached on its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// The `current_weather` block of a forecast response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
    /// Observation time in the location's local timezone, e.g. `2024-05-01T12:00`
    pub time: String,
}

/// Normalized current weather for a location; this is what gets cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub location: String,
    pub country: String,
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
    pub time: String,
}

impl WeatherPayload {
    pub fn from_lookup(geo: GeoResult, current: CurrentWeather) -> Self {
        Self {
            location: geo.name,
            country: geo.country,
            temperature: current.temperature,
            windspeed: current.windspeed,
            weathercode: current.weathercode,
            time: current.time,
        }
    }

    /// Display text for the CLI; not part of the cached data.
    pub fn describe_conditions(&self) -> &'static str {
        describe_weathercode(self.weathercode)
    }
}

/// Short English label for a WMO weather interpretation code, as reported
/// in Open-Meteo's `weathercode`. Display helper only.
pub fn describe_weathercode(code: i32) -> &'static str {
    match code {
        0 => "clear sky",
        1 => "mainly clear",
        2 => "partly cloudy",
        3 => "overcast",
        45 | 48 => "fog",
        51..=57 => "drizzle",
        61..=67 | 80..=82 => "rain",
        71..=77 | 85 | 86 => "snow",
        95..=99 => "thunderstorm",
        _ => "unknown",
    }
}

/// Weather resolved through a registered widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetWeather {
    pub widget_id: String,
    /// The location as stored on the widget, not the geocoder's display name
    pub location: String,
    pub data: WeatherPayload,
}
