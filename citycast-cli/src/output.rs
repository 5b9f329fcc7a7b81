use chrono::{DateTime, Utc};
use citycast_core::{PlaceCandidate, UiState, WeatherPipeline, WeatherView};
use std::fmt::Write;

/// Text for whatever state the pipeline is in.
pub fn render_state(pipeline: &WeatherPipeline, now: DateTime<Utc>) -> String {
    match pipeline.view(now) {
        Some(view) => render_weather(&view),
        None => render_message(pipeline.ui_state()),
    }
}

pub fn render_message(state: UiState) -> String {
    let mut out = String::new();
    if let Some(msg) = state.message() {
        let _ = writeln!(out, "{msg}");
    }
    if state == UiState::Error {
        let _ = writeln!(out, "Hint: run the command again, or choose Retry in interactive mode.");
    }
    out
}

pub fn render_weather(view: &WeatherView) -> String {
    let current = &view.current;
    let mut out = String::new();

    let _ = writeln!(out, "{}", current.place_label);
    let _ = writeln!(out, "{}", current.date_label);
    let _ = writeln!(
        out,
        "{}  {}  {}",
        current.icon.glyph(),
        current.temperature,
        current.icon.description()
    );
    let _ = writeln!(
        out,
        "Feels like {}   Humidity {}   Wind {}   Precipitation {}",
        current.feels_like, current.humidity, current.wind, current.precipitation
    );

    if !view.hourly.is_empty() {
        let _ = writeln!(out, "\nHourly forecast");
        for row in &view.hourly {
            let _ = writeln!(
                out,
                "  {:>8}  {}  {:>5}  {:>4}",
                row.time_label,
                row.icon.glyph(),
                row.temperature,
                row.precipitation_probability
            );
        }
    }

    if !view.daily.is_empty() {
        let _ = writeln!(out, "\nDaily forecast");
        for row in &view.daily {
            let _ = writeln!(
                out,
                "  {}  {}  {:>5} / {}",
                row.day_label,
                row.icon.glyph(),
                row.high,
                row.low
            );
        }
    }

    out
}

pub fn render_suggestions(places: &[PlaceCandidate]) -> String {
    if places.is_empty() {
        return "No suggestions.\n".to_string();
    }

    let mut out = String::new();
    for (i, place) in places.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, place.name);
        let region = place.region_line();
        if !region.is_empty() {
            let _ = writeln!(out, "   {region}");
        }
    }
    out
}

pub fn render_json(pipeline: &WeatherPipeline, now: DateTime<Utc>) -> anyhow::Result<String> {
    let state = pipeline.ui_state();
    let value = serde_json::json!({
        "state": state,
        "query": pipeline.state().last_query().map(|q| q.to_string()),
        "message": state.message(),
        "weather": pipeline.view(now),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
