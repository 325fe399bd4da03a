use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::model::{Coordinates, WeatherPayload};

use super::{ProviderError, WeatherProvider, truncate_body};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug)]
pub struct OpenWeatherProviderBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl OpenWeatherProviderBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<OpenWeatherProvider, ProviderError> {
        let mut http = Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(OpenWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            http: http.build()?,
        })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherProviderBuilder {
        OpenWeatherProviderBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

/// Only `coord` matters; error bodies (`{"cod":"404",...}`) simply lack it.
#[derive(Debug, Deserialize)]
struct OwLookupResponse {
    coord: Option<OwCoord>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>, ProviderError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(%url, query, "looking up location");

        let res = self
            .http
            .get(&url)
            .query(&[("q", query), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, "lookup response received");

        let parsed: OwLookupResponse = serde_json::from_str(&body)?;

        Ok(parsed.coord.map(|c| Coordinates::new(c.lat, c.lon)))
    }

    async fn forecast(&self, coords: Coordinates) -> Result<WeatherPayload, ProviderError> {
        let url = format!("{}/data/2.5/onecall", self.base_url);
        debug!(%url, lat = coords.lat, lon = coords.lon, "fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[("lat", coords.lat), ("lon", coords.lon)])
            .query(&[
                ("exclude", "hourly,minutely"),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
