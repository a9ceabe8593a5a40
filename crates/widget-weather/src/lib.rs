//! Current weather for named locations via the Open-Meteo API, with an
//! in-process TTL cache in front of the upstream lookups.

pub mod cache;
pub mod client;
pub mod error;
pub mod location;
pub mod service;
pub mod types;
pub mod widget;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use client::OpenMeteoClient;
pub use error::WeatherError;
pub use location::{cache_key, normalize_location};
pub use service::{WeatherCache, WeatherService, DEFAULT_CACHE_TTL};
pub use types::*;
pub use widget::{InMemoryWidgets, Widget, WidgetLocations};
