//! Core library for the `weather` display client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (place lookup, current + daily forecast)
//! - Startup location resolution (device position with a fallback)
//! - View state: payload, notification and derived theme
//! - The session that sequences the async steps into the view
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod location;
pub mod model;
pub mod provider;
pub mod session;
pub mod theme;
pub mod view;

pub use config::Config;
pub use location::{Geolocator, IpGeolocator, StartupOptions};
pub use model::{Coordinates, DailyForecast, WeatherPayload};
pub use provider::{ProviderError, WeatherProvider, openweather::OpenWeatherProvider};
pub use session::{FetchFailure, Session};
pub use theme::Theme;
pub use view::{Notification, ViewState};
