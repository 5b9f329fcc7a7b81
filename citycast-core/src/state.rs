use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WeatherError;

/// The five mutually exclusive presentation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    #[default]
    Initial,
    Loading,
    Weather,
    Error,
    NoResults,
}

/// Events that move the presentation between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A free-text query was submitted or a suggestion was picked.
    Submitted,
    Loaded,
    NoMatch,
    Failed,
}

impl UiState {
    /// Apply `event`. A new search is accepted from any state; outcomes are
    /// only accepted while loading.
    pub fn next(self, event: Transition) -> UiState {
        match (self, event) {
            (_, Transition::Submitted) => UiState::Loading,
            (UiState::Loading, Transition::Loaded) => UiState::Weather,
            (UiState::Loading, Transition::NoMatch) => UiState::NoResults,
            (UiState::Loading, Transition::Failed) => UiState::Error,
            (state, event) => {
                debug!(?state, ?event, "ignoring transition outside of loading");
                state
            }
        }
    }

    pub fn transition_for(err: &WeatherError) -> Transition {
        match err {
            WeatherError::NoMatch(_) => Transition::NoMatch,
            WeatherError::LookupFailed(_) | WeatherError::FetchFailed(_) => Transition::Failed,
        }
    }

    /// State a pipeline run ends in when it fails with `err`.
    pub fn from_error(err: &WeatherError) -> UiState {
        UiState::Loading.next(Self::transition_for(err))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UiState::Weather | UiState::Error | UiState::NoResults)
    }

    /// Fixed user-facing message for states that have one.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            UiState::Initial => Some("Search for a city to see its weather."),
            UiState::Loading => Some("Loading weather..."),
            UiState::Error => {
                Some("We couldn't connect to the weather service. Please try again.")
            }
            UiState::NoResults => Some("No search result found!"),
            UiState::Weather => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_initial() {
        assert_eq!(UiState::default(), UiState::Initial);
        assert!(!UiState::Initial.is_terminal());
    }

    #[test]
    fn submit_from_any_state_loads() {
        for state in [
            UiState::Initial,
            UiState::Loading,
            UiState::Weather,
            UiState::Error,
            UiState::NoResults,
        ] {
            assert_eq!(state.next(Transition::Submitted), UiState::Loading);
        }
    }

    #[test]
    fn outcomes_from_loading() {
        assert_eq!(UiState::Loading.next(Transition::Loaded), UiState::Weather);
        assert_eq!(UiState::Loading.next(Transition::NoMatch), UiState::NoResults);
        assert_eq!(UiState::Loading.next(Transition::Failed), UiState::Error);
    }

    #[test]
    fn outcomes_outside_loading_are_ignored() {
        assert_eq!(UiState::Initial.next(Transition::Loaded), UiState::Initial);
        assert_eq!(UiState::Weather.next(Transition::Failed), UiState::Weather);
        assert_eq!(UiState::Error.next(Transition::NoMatch), UiState::Error);
    }

    #[test]
    fn errors_map_to_screens() {
        assert_eq!(
            UiState::from_error(&WeatherError::NoMatch("x".into())),
            UiState::NoResults
        );
        assert_eq!(
            UiState::from_error(&WeatherError::LookupFailed("x".into())),
            UiState::Error
        );
        assert_eq!(
            UiState::from_error(&WeatherError::FetchFailed("x".into())),
            UiState::Error
        );
    }

    #[test]
    fn weather_state_has_no_fixed_message() {
        assert!(UiState::Weather.message().is_none());
        assert!(UiState::Error.message().unwrap().contains("try again"));
    }
}
