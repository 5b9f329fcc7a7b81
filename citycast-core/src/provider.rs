use crate::{
    Config,
    model::{Forecast, PlaceCandidate},
    provider::{forecast::OpenMeteoForecast, geocoding::OpenMeteoGeocoder},
    units::UnitPreferences,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod forecast;
pub mod geocoding;

/// Free-text place search.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Up to `count` places matching `name`, in provider relevance order.
    /// An empty list means nothing matched.
    async fn search(&self, name: &str, count: usize) -> anyhow::Result<Vec<PlaceCandidate>>;
}

/// Current, hourly and daily forecast for a coordinate pair.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        units: &UnitPreferences,
    ) -> anyhow::Result<Forecast>;
}

/// Construct the geocoder described by `config`.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Arc<dyn Geocoder>> {
    let geocoder = OpenMeteoGeocoder::new(
        config.geocoding_url.clone(),
        config.language.clone(),
        config.request_timeout(),
    )?;
    Ok(Arc::new(geocoder))
}

/// Construct the forecast provider described by `config`.
pub fn forecast_provider_from_config(
    config: &Config,
) -> anyhow::Result<Arc<dyn ForecastProvider>> {
    let provider = OpenMeteoForecast::new(config.forecast_url.clone(), config.request_timeout())?;
    Ok(Arc::new(provider))
}

pub(crate) fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
