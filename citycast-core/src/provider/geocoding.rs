use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{model::PlaceCandidate, provider::{http_client, truncate_body}};

use super::Geocoder;

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    base_url: String,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(
        base_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.into(),
            language: language.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<GeoResult> for PlaceCandidate {
    fn from(r: GeoResult) -> Self {
        PlaceCandidate {
            name: r.name,
            admin_region: r.admin1,
            country: r.country.unwrap_or_default(),
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn search(&self, name: &str, count: usize) -> Result<Vec<PlaceCandidate>> {
        let count = count.to_string();
        debug!(name, count = %count, "geocoding request");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("name", name),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .context("Failed to send geocoding request")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GeoResponse =
            serde_json::from_str(&body).context("Failed to parse geocoding JSON")?;

        Ok(parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(PlaceCandidate::from)
            .collect())
    }
}
