use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info, warn};

use crate::{
    Config,
    client::{ForecastClient, GeocodingClient},
    error::WeatherError,
    model::{PlaceCandidate, WeatherSnapshot},
    provider::{forecast_provider_from_config, geocoder_from_config},
    render::{WeatherView, render},
    state::{Transition, UiState},
    units::UnitPreferences,
};

/// Shortest trimmed input, in characters, that triggers a suggestion lookup.
pub const MIN_QUERY_CHARS: usize = 2;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Free text that still needs geocoding.
    Text(String),
    /// A picked suggestion; coordinates are already known.
    Place(PlaceCandidate),
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchQuery::Text(text) => f.write_str(text),
            SearchQuery::Place(place) => f.write_str(&place.label()),
        }
    }
}

/// Session state owned by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    preferences: UnitPreferences,
    snapshot: Option<WeatherSnapshot>,
    ui: UiState,
    last_query: Option<SearchQuery>,
    latest_request: u64,
}

impl AppState {
    pub fn preferences(&self) -> UnitPreferences {
        self.preferences
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    /// Sequence number of the most recently issued search.
    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }
}

/// A search that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
    preferences: UnitPreferences,
}

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    seq: u64,
    result: Result<WeatherSnapshot, WeatherError>,
}

impl SearchOutcome {
    pub fn sequence(&self) -> u64 {
        self.seq
    }

    pub fn result(&self) -> &Result<WeatherSnapshot, WeatherError> {
        &self.result
    }
}

/// The I/O half of a search: geocoding (if needed), then the forecast.
/// Holds no session state, so it can run while newer searches are issued.
#[derive(Debug, Clone)]
pub struct SearchRunner {
    geocoding: GeocodingClient,
    forecast: ForecastClient,
}

impl SearchRunner {
    pub async fn run(&self, ticket: SearchTicket) -> SearchOutcome {
        let result = self.resolve(&ticket).await;
        SearchOutcome {
            seq: ticket.seq,
            result,
        }
    }

    async fn resolve(&self, ticket: &SearchTicket) -> Result<WeatherSnapshot, WeatherError> {
        let place = match &ticket.query {
            SearchQuery::Text(text) => self.geocoding.resolve_best(text).await?,
            SearchQuery::Place(place) => place.clone(),
        };

        self.forecast
            .fetch_snapshot(place, &ticket.preferences)
            .await
    }
}

/// Drives geocoding, forecast fetching and the presentation state.
#[derive(Debug)]
pub struct WeatherPipeline {
    runner: SearchRunner,
    state: AppState,
}

impl WeatherPipeline {
    pub fn new(geocoding: GeocodingClient, forecast: ForecastClient) -> Self {
        Self {
            runner: SearchRunner {
                geocoding,
                forecast,
            },
            state: AppState::default(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let geocoding = GeocodingClient::new(geocoder_from_config(config)?)
            .with_suggestion_limit(config.suggestion_limit);
        let forecast = ForecastClient::new(forecast_provider_from_config(config)?);
        Ok(Self::new(geocoding, forecast))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ui_state(&self) -> UiState {
        self.state.ui
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.state.snapshot.as_ref()
    }

    pub fn preferences(&self) -> UnitPreferences {
        self.state.preferences
    }

    pub fn geocoding(&self) -> &GeocodingClient {
        &self.runner.geocoding
    }

    pub fn runner(&self) -> SearchRunner {
        self.runner.clone()
    }

    /// Enter `Loading` and issue a ticket for `query`.
    ///
    /// Blank free text is ignored and leaves the state untouched.
    pub fn begin(&mut self, query: SearchQuery) -> Option<SearchTicket> {
        let query = match query {
            SearchQuery::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("ignoring blank search");
                    return None;
                }
                SearchQuery::Text(text.to_string())
            }
            place => place,
        };

        self.state.latest_request += 1;
        self.state.ui = self.state.ui.next(Transition::Submitted);
        self.state.last_query = Some(query.clone());

        info!(seq = self.state.latest_request, query = %query, "search started");

        Some(SearchTicket {
            seq: self.state.latest_request,
            query,
            preferences: self.state.preferences,
        })
    }

    /// Apply a finished search. Returns `false` when a newer search has been
    /// issued since, in which case the outcome is dropped.
    pub fn complete(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.seq != self.state.latest_request {
            warn!(
                seq = outcome.seq,
                latest = self.state.latest_request,
                "discarding stale search result"
            );
            return false;
        }

        match outcome.result {
            Ok(snapshot) => {
                info!(place = %snapshot.place_label, timezone = snapshot.timezone(), "forecast applied");
                self.state.snapshot = Some(snapshot);
                self.state.ui = self.state.ui.next(Transition::Loaded);
            }
            Err(err) => {
                warn!(error = %err, "search failed");
                self.state.snapshot = None;
                self.state.ui = self.state.ui.next(UiState::transition_for(&err));
            }
        }
        true
    }

    /// Run a whole search and return the resulting state.
    pub async fn search(&mut self, query: SearchQuery) -> UiState {
        if let Some(ticket) = self.begin(query) {
            let outcome = self.runner.run(ticket).await;
            self.complete(outcome);
        }
        self.state.ui
    }

    /// Re-issue the last query. `None` if nothing has been searched yet.
    pub async fn retry(&mut self) -> Option<UiState> {
        let query = self.state.last_query.clone()?;
        Some(self.search(query).await)
    }

    /// Change units. The current snapshot is kept and re-rendered on the next
    /// [`view`](Self::view); nothing is fetched.
    pub fn set_preferences(&mut self, preferences: UnitPreferences) {
        debug!(?preferences, "unit preferences changed");
        self.state.preferences = preferences;
    }

    /// View-model for the current snapshot, only while in `Weather`.
    pub fn view(&self, now: DateTime<Utc>) -> Option<WeatherView> {
        if self.state.ui != UiState::Weather {
            return None;
        }
        self.state
            .snapshot
            .as_ref()
            .map(|snapshot| render(snapshot, &self.state.preferences, now))
    }

    /// Autocomplete for the search box. Does not touch the presentation state.
    pub async fn suggest(&self, text: &str) -> Vec<PlaceCandidate> {
        suggestions(&self.runner.geocoding, text).await
    }
}

/// Suggestions for `text`, or an empty list when the input is too short or
/// the lookup fails. Failures are only logged.
pub async fn suggestions(geocoding: &GeocodingClient, text: &str) -> Vec<PlaceCandidate> {
    let query = text.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    match geocoding.suggest(query).await {
        Ok(places) => places,
        Err(err) => {
            warn!(error = %err, query, "suggestion lookup failed");
            Vec::new()
        }
    }
}
