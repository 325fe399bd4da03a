use crate::{
    Config,
    model::{Coordinates, WeatherPayload},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider answered with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolves free text (a place name) to coordinates. `Ok(None)` means the
    /// provider answered but knows no such place.
    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>, ProviderError>;

    /// Current conditions plus daily forecast for `coords`.
    async fn forecast(&self, coords: Coordinates) -> Result<WeatherPayload, ProviderError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here: requests go out without a usable
/// key and fail provider-side.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, ProviderError> {
    let api_key = match config.api_key() {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!(
                "No OpenWeather API key configured. \
                 Hint: run `weather configure` or set OPENWEATHER_API_KEY."
            );
            String::new()
        }
    };

    OpenWeatherProvider::builder(api_key)
        .base_url(config.openweather_base_url())
        .timeout(Duration::from_secs(config.request_timeout_secs()))
        .build()
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_tolerates_missing_api_key() {
        let cfg = Config::default();
        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            openweather_base_url: Some("http://localhost:9999/".into()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg).expect("provider builds");
        assert_eq!(provider.base_url(), "http://localhost:9999");
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}
