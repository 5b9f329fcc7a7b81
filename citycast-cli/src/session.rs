//! Interactive search loop built on `inquire` prompts.

use chrono::Utc;
use citycast_core::{
    Config, PlaceCandidate, PrecipitationUnit, SearchQuery, TemperatureUnit, UiState,
    UnitPreferences, WeatherPipeline, WindSpeedUnit,
};
use inquire::{InquireError, Select, Text};
use std::fmt;

use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Search,
    Browse,
    ChangeUnits,
    Retry,
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuAction::Search => "Search for a city",
            MenuAction::Browse => "Pick from suggestions",
            MenuAction::ChangeUnits => "Change units",
            MenuAction::Retry => "Retry",
            MenuAction::Quit => "Quit",
        })
    }
}

enum Choice {
    Place(PlaceCandidate),
    AsTyped(String),
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Place(place) => {
                let region = place.region_line();
                if region.is_empty() {
                    f.write_str(&place.name)
                } else {
                    write!(f, "{} ({region})", place.name)
                }
            }
            Choice::AsTyped(text) => write!(f, "Search for \"{text}\""),
        }
    }
}

/// Menu entries offered in `state`. Retry only appears on the error screen.
fn menu_for(state: UiState) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::Search, MenuAction::Browse, MenuAction::ChangeUnits];
    if state == UiState::Error {
        actions.push(MenuAction::Retry);
    }
    actions.push(MenuAction::Quit);
    actions
}

/// `Ok(None)` when the user dismissed the prompt.
fn answered<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn run(config: &Config, preferences: UnitPreferences) -> anyhow::Result<()> {
    let mut pipeline = WeatherPipeline::from_config(config)?;
    pipeline.set_preferences(preferences);

    print!("{}", output::render_state(&pipeline, Utc::now()));

    loop {
        let Some(action) = answered(Select::new("What next?", menu_for(pipeline.ui_state())).prompt())?
        else {
            break;
        };

        match action {
            MenuAction::Search => {
                if let Some(text) = answered(Text::new("City:").prompt())? {
                    print!("{}", output::render_message(UiState::Loading));
                    pipeline.search(SearchQuery::Text(text)).await;
                }
            }
            MenuAction::Browse => {
                if let Some(query) = pick_suggestion(&pipeline).await? {
                    print!("{}", output::render_message(UiState::Loading));
                    pipeline.search(query).await;
                }
            }
            MenuAction::ChangeUnits => {
                if let Some(preferences) = ask_units(pipeline.preferences())? {
                    pipeline.set_preferences(preferences);
                }
            }
            MenuAction::Retry => {
                print!("{}", output::render_message(UiState::Loading));
                pipeline.retry().await;
            }
            MenuAction::Quit => break,
        }

        print!("{}", output::render_state(&pipeline, Utc::now()));
    }

    Ok(())
}

/// Suggestion lookup for partial input, then a pick. Nothing is searched
/// when no suggestions come back.
async fn pick_suggestion(pipeline: &WeatherPipeline) -> anyhow::Result<Option<SearchQuery>> {
    let Some(text) = answered(Text::new("Start typing a city:").prompt())? else {
        return Ok(None);
    };

    let places = pipeline.suggest(&text).await;
    if places.is_empty() {
        print!("{}", output::render_suggestions(&places));
        return Ok(None);
    }

    let mut choices: Vec<Choice> = places.into_iter().map(Choice::Place).collect();
    choices.push(Choice::AsTyped(text));

    let picked = answered(Select::new("Did you mean:", choices).prompt())?;
    Ok(picked.map(|choice| match choice {
        Choice::Place(place) => SearchQuery::Place(place),
        Choice::AsTyped(text) => SearchQuery::Text(text),
    }))
}

fn ask_units(current: UnitPreferences) -> anyhow::Result<Option<UnitPreferences>> {
    let temperature = pick(
        "Temperature:",
        vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit],
        current.temperature,
    )?;
    let Some(temperature) = temperature else {
        return Ok(None);
    };

    let wind = pick(
        "Wind speed:",
        vec![WindSpeedUnit::KmPerHour, WindSpeedUnit::MilesPerHour],
        current.wind,
    )?;
    let Some(wind) = wind else {
        return Ok(None);
    };

    let precipitation = pick(
        "Precipitation:",
        vec![PrecipitationUnit::Millimeters, PrecipitationUnit::Inches],
        current.precipitation,
    )?;
    let Some(precipitation) = precipitation else {
        return Ok(None);
    };

    Ok(Some(UnitPreferences {
        temperature,
        wind,
        precipitation,
    }))
}

fn pick<T: fmt::Display + PartialEq>(
    prompt: &str,
    options: Vec<T>,
    current: T,
) -> anyhow::Result<Option<T>> {
    let cursor = options.iter().position(|o| *o == current).unwrap_or(0);
    answered(Select::new(prompt, options).with_starting_cursor(cursor).prompt())
}
