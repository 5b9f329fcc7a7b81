//! Contract layer over the raw providers.
//!
//! Providers report plumbing failures as `anyhow` errors; these clients turn
//! them into [`WeatherError`] variants the pipeline can act on.

use std::sync::Arc;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{Forecast, PlaceCandidate, WeatherSnapshot},
    provider::{ForecastProvider, Geocoder},
    units::UnitPreferences,
};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    geocoder: Arc<dyn Geocoder>,
    suggestion_limit: usize,
}

impl GeocodingClient {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Lower the suggestion cap. Values outside `1..=5` are clamped.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit.clamp(1, DEFAULT_SUGGESTION_LIMIT);
        self
    }

    /// Autocomplete candidates for `query`, most relevant first.
    ///
    /// The caller is expected to skip queries shorter than two characters.
    pub async fn suggest(&self, query: &str) -> Result<Vec<PlaceCandidate>, WeatherError> {
        let query = query.trim();
        let mut places = self
            .geocoder
            .search(query, self.suggestion_limit)
            .await
            .map_err(WeatherError::lookup)?;
        places.truncate(self.suggestion_limit);
        debug!(query, count = places.len(), "suggestions");
        Ok(places)
    }

    /// The single best match for `query`.
    pub async fn resolve_best(&self, query: &str) -> Result<PlaceCandidate, WeatherError> {
        let query = query.trim();
        let places = self
            .geocoder
            .search(query, 1)
            .await
            .map_err(WeatherError::lookup)?;
        places
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NoMatch(query.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    provider: Arc<dyn ForecastProvider>,
}

impl ForecastClient {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        preferences: &UnitPreferences,
    ) -> Result<Forecast, WeatherError> {
        self.provider
            .forecast(latitude, longitude, preferences)
            .await
            .map_err(WeatherError::fetch)
    }

    /// Fetch the forecast for `place` and wrap it as a snapshot tagged with
    /// the units it was requested in.
    pub async fn fetch_snapshot(
        &self,
        place: PlaceCandidate,
        preferences: &UnitPreferences,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let forecast = self
            .fetch(place.latitude, place.longitude, preferences)
            .await?;
        Ok(WeatherSnapshot::new(place, *preferences, forecast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubForecast, StubGeocoder, paris, sample_forecast};

    #[tokio::test]
    async fn suggest_caps_results_at_limit() {
        let geocoder = Arc::new(StubGeocoder::with_places(vec![paris(); 8]));
        let client = GeocodingClient::new(geocoder.clone());

        let places = client.suggest("Par").await.unwrap();
        assert_eq!(places.len(), 5);
        assert_eq!(geocoder.calls(), 1);
    }

    #[tokio::test]
    async fn oversized_limit_is_clamped() {
        let geocoder = Arc::new(StubGeocoder::with_places(vec![paris(); 10]));
        let client = GeocodingClient::new(geocoder.clone()).with_suggestion_limit(10);

        let places = client.suggest("Pa").await.unwrap();
        assert_eq!(places.len(), 5);
        assert_eq!(geocoder.counts(), vec![5]);
    }

    #[tokio::test]
    async fn resolve_asks_for_one_and_suggest_for_five() {
        let geocoder = Arc::new(StubGeocoder::default());
        let client = GeocodingClient::new(geocoder.clone());

        client.resolve_best("Paris").await.unwrap();
        client.suggest("Par").await.unwrap();
        assert_eq!(geocoder.counts(), vec![1, 5]);
    }

    #[tokio::test]
    async fn suggest_failure_is_lookup_failed() {
        let client = GeocodingClient::new(Arc::new(StubGeocoder::failing()));
        let err = client.suggest("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::LookupFailed(_)));
    }

    #[tokio::test]
    async fn resolve_best_takes_first_match() {
        let client = GeocodingClient::new(Arc::new(StubGeocoder::default()));
        let place = client.resolve_best("  Paris ").await.unwrap();
        assert_eq!(place.label(), "Paris, France");
    }

    #[tokio::test]
    async fn resolve_best_without_results_is_no_match() {
        let client = GeocodingClient::new(Arc::new(StubGeocoder::default()));
        let err = client.resolve_best("zzznotacity").await.unwrap_err();
        assert!(matches!(err, WeatherError::NoMatch(q) if q == "zzznotacity"));
    }

    #[tokio::test]
    async fn fetch_failure_is_fetch_failed() {
        let client = ForecastClient::new(Arc::new(StubForecast::failing(1)));
        let err = client
            .fetch(48.8566, 2.3522, &UnitPreferences::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn fetch_passes_forecast_through() {
        let client = ForecastClient::new(Arc::new(StubForecast::default()));
        let forecast = client
            .fetch(48.8566, 2.3522, &UnitPreferences::default())
            .await
            .unwrap();
        assert_eq!(forecast, sample_forecast());
    }

    #[tokio::test]
    async fn fetch_snapshot_labels_place_and_records_units() {
        let client = ForecastClient::new(Arc::new(StubForecast::default()));
        let prefs = UnitPreferences {
            temperature: crate::units::TemperatureUnit::Fahrenheit,
            ..UnitPreferences::default()
        };

        let snapshot = client.fetch_snapshot(paris(), &prefs).await.unwrap();
        assert_eq!(snapshot.place_label, "Paris, France");
        assert_eq!(snapshot.units, prefs);
        assert_eq!(snapshot.forecast, sample_forecast());
    }

    #[tokio::test]
    async fn fetch_snapshot_failure_is_fetch_failed() {
        let client = ForecastClient::new(Arc::new(StubForecast::failing(1)));
        let err = client
            .fetch_snapshot(paris(), &UnitPreferences::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::FetchFailed(_)));
    }
}
