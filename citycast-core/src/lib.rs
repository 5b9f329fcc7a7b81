//! Core library for the `citycast` CLI.
//!
//! This crate defines:
//! - Geocoding and forecast clients over the Open-Meteo APIs
//! - The search pipeline and its presentation state machine
//! - Pure view-model rendering of a weather snapshot
//! - Debounced autocomplete and configuration handling
//!
//! It is used by `citycast-cli`, but any front end can drive a
//! [`WeatherPipeline`] and draw the [`WeatherView`] it produces.

pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod icon;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod state;
pub mod units;

#[cfg(test)]
mod testing;

pub use client::{ForecastClient, GeocodingClient};
pub use config::Config;
pub use debounce::{Debouncer, SuggestionFeed, spawn_suggestion_feed};
pub use error::WeatherError;
pub use icon::{IconCategory, map_code};
pub use model::{Forecast, PlaceCandidate, WeatherSnapshot};
pub use pipeline::{SearchQuery, WeatherPipeline};
pub use provider::{ForecastProvider, Geocoder};
pub use render::WeatherView;
pub use state::UiState;
pub use units::{PrecipitationUnit, TemperatureUnit, UnitPreferences, WindSpeedUnit};
