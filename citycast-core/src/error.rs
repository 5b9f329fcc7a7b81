use thiserror::Error;

/// Failures that end a pipeline run.
///
/// Each one maps onto exactly one presentation state; see
/// [`UiState::from_error`](crate::state::UiState::from_error).
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Place lookup failed: {0}")]
    LookupFailed(String),

    #[error("No place matches '{0}'")]
    NoMatch(String),

    #[error("Forecast fetch failed: {0}")]
    FetchFailed(String),
}

impl WeatherError {
    pub(crate) fn lookup(err: anyhow::Error) -> Self {
        WeatherError::LookupFailed(format!("{err:#}"))
    }

    pub(crate) fn fetch(err: anyhow::Error) -> Self {
        WeatherError::FetchFailed(format!("{err:#}"))
    }
}
