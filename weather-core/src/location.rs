//! Where to show weather for when the user hasn't searched yet.
//!
//! The device position comes from a [`Geolocator`]. Startup waits a bounded
//! time for it and falls back to a fixed location otherwise, so exactly one
//! position is ever produced.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, info, warn};

use crate::model::Coordinates;

/// Fallback position used when the device cannot be located.
pub const KATHMANDU: Coordinates = Coordinates::new(27.7172, 85.324);

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("geolocation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("geolocation service refused: {0}")]
    Rejected(String),

    #[error("unexpected geolocation response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// Locates the host through an IP geolocation service.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new(DEFAULT_GEOLOCATION_URL)
    }
}

#[derive(Debug, Deserialize)]
struct IpLocation {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        debug!(url = %self.url, "requesting device position");

        let body = self.http.get(&self.url).send().await?.error_for_status()?.text().await?;
        let parsed: IpLocation = serde_json::from_str(&body)?;

        match (parsed.status.as_str(), parsed.lat, parsed.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocateError::Rejected(
                parsed.message.unwrap_or_else(|| format!("status {}", parsed.status)),
            )),
        }
    }
}

/// How the startup position is chosen.
#[derive(Debug, Clone, Copy)]
pub struct StartupOptions {
    /// Skip the device lookup and go straight to `fallback`.
    pub use_device: bool,
    pub wait: Duration,
    pub fallback: Coordinates,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self { use_device: true, wait: Duration::from_secs(5), fallback: KATHMANDU }
    }
}

/// Device position if it arrives within `options.wait`, else the fallback.
pub async fn resolve_startup_location(
    geolocator: &dyn Geolocator,
    options: &StartupOptions,
) -> Coordinates {
    if !options.use_device {
        info!(location = %options.fallback, "device geolocation disabled, using fallback");
        return options.fallback;
    }

    match tokio::time::timeout(options.wait, geolocator.locate()).await {
        Ok(Ok(coords)) => {
            info!(location = %coords, "device located");
            coords
        }
        Ok(Err(e)) => {
            warn!(error = %e, location = %options.fallback, "device geolocation failed, using fallback");
            options.fallback
        }
        Err(_) => {
            warn!(
                wait_ms = options.wait.as_millis() as u64,
                location = %options.fallback,
                "device geolocation timed out, using fallback"
            );
            options.fallback
        }
    }
}
