//! Sequences location resolution and forecast fetches into the view state.
//!
//! Every network operation runs as its own tokio task. At most one task is
//! pending: starting another aborts it, so a slow response can never land on
//! top of a newer one. [`Session::settle`] awaits the pending task and applies
//! its outcome.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::{
    location::{Geolocator, StartupOptions, resolve_startup_location},
    model::{Coordinates, WeatherPayload},
    provider::{ProviderError, WeatherProvider},
    view::{self, ViewState},
};

#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    #[error("no location matches {query:?}")]
    LocationNotFound { query: String },

    #[error("location lookup failed: {0}")]
    Lookup(#[source] ProviderError),

    #[error("forecast fetch for {coords} failed: {source}")]
    Forecast {
        coords: Coordinates,
        #[source]
        source: ProviderError,
    },

    #[error("fetch task failed: {0}")]
    Task(String),
}

impl FetchFailure {
    /// What the user is told.
    pub fn message(&self) -> &'static str {
        match self {
            FetchFailure::LocationNotFound { .. } => view::NOT_FOUND_MESSAGE,
            _ => view::FETCH_ERROR_MESSAGE,
        }
    }
}

type FetchTask = JoinHandle<Result<(Coordinates, WeatherPayload), FetchFailure>>;

async fn fetch_forecast(
    provider: &dyn WeatherProvider,
    coords: Coordinates,
) -> Result<(Coordinates, WeatherPayload), FetchFailure> {
    match provider.forecast(coords).await {
        Ok(payload) => Ok((coords, payload)),
        Err(source) => Err(FetchFailure::Forecast { coords, source }),
    }
}

#[derive(Debug)]
pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    view: ViewState,
    /// Coordinates of the last forecast request that reached the provider.
    target: Option<Coordinates>,
    pending: Option<FetchTask>,
}

impl Session {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider, view: ViewState::default(), target: None, pending: None }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Initial load: one position (device or fallback), one forecast fetch.
    pub async fn start(&mut self, geolocator: &dyn Geolocator, options: &StartupOptions) {
        let coords = resolve_startup_location(geolocator, options).await;
        self.begin_fetch(coords);
        self.settle().await;
    }

    /// Search by place name and wait for the result.
    pub async fn search(&mut self, text: &str) {
        if self.begin_search(text) {
            self.settle().await;
        }
    }

    /// Fetch again for the last requested location. After a failed fetch
    /// this retries the failed place, not the one still displayed.
    pub async fn refresh(&mut self) {
        let Some(coords) = self.target.or_else(|| self.view.location()) else {
            debug!("nothing to refresh yet");
            return;
        };
        self.begin_fetch(coords);
        self.settle().await;
    }

    /// Starts a forecast fetch for `coords`, superseding any pending operation.
    pub fn begin_fetch(&mut self, coords: Coordinates) {
        let provider = Arc::clone(&self.provider);

        self.replace_pending(tokio::spawn(async move {
            fetch_forecast(provider.as_ref(), coords).await
        }));
    }

    /// Starts lookup + forecast for `text`. Returns `false` when the trimmed
    /// text is empty; nothing is sent then and the user is asked for input.
    pub fn begin_search(&mut self, text: &str) -> bool {
        let query = text.trim();
        if query.is_empty() {
            self.view.notify(view::EMPTY_QUERY_MESSAGE);
            return false;
        }

        let query = query.to_string();
        let provider = Arc::clone(&self.provider);

        self.replace_pending(tokio::spawn(async move {
            let coords = provider
                .lookup(&query)
                .await
                .map_err(FetchFailure::Lookup)?
                .ok_or_else(|| FetchFailure::LocationNotFound { query: query.clone() })?;

            info!(%query, location = %coords, "location resolved");
            fetch_forecast(provider.as_ref(), coords).await
        }));

        true
    }

    /// Waits for the pending operation, if any, and applies its outcome.
    pub async fn settle(&mut self) {
        let Some(task) = self.pending.take() else {
            return;
        };

        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => {
                debug!("pending fetch was cancelled");
                return;
            }
            Err(e) => Err(FetchFailure::Task(e.to_string())),
        };

        match outcome {
            Ok((coords, payload)) => {
                self.target = Some(coords);
                info!(
                    timezone = %payload.timezone,
                    days = payload.daily.len(),
                    "weather loaded"
                );
                self.view.load(payload);
            }
            Err(failure) => {
                if let FetchFailure::Forecast { coords, .. } = &failure {
                    self.target = Some(*coords);
                }
                error!(error = %failure, "Error fetching weather data");
                self.view.notify(failure.message());
            }
        }
    }

    /// "Development Team" action.
    pub fn show_team(&mut self) {
        self.view.notify(view::CREDITS);
    }

    pub fn dismiss(&mut self) {
        self.view.dismiss();
    }

    fn replace_pending(&mut self, task: FetchTask) {
        if let Some(previous) = self.pending.replace(task) {
            debug!("superseding pending fetch");
            previous.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
