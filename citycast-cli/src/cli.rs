use anyhow::{Context, bail};
use chrono::Utc;
use citycast_core::{
    Config, PrecipitationUnit, SearchQuery, SuggestionFeed, TemperatureUnit, UnitPreferences,
    WeatherPipeline, WindSpeedUnit, spawn_suggestion_feed,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::{output, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citycast", version, about = "City weather lookup")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions, the next 12 hours and 7 days for a city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[command(flatten)]
        units: UnitArgs,

        /// Print the rendered view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List place suggestions for partial input.
    ///
    /// Without TEXT, each stdin line is treated as the current contents of a
    /// search box and suggestions are printed as input settles.
    Suggest { text: Option<String> },

    /// Interactive search session with suggestions and unit switching.
    Interactive {
        #[command(flatten)]
        units: UnitArgs,
    },

    /// Inspect or create the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Print the configuration file location.
    Path,
    /// Write a configuration file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct UnitArgs {
    /// Temperature unit: celsius or fahrenheit.
    #[arg(long, default_value = "celsius", value_parser = parse_temperature)]
    pub temperature: TemperatureUnit,

    /// Wind speed unit: kmh or mph.
    #[arg(long, default_value = "kmh", value_parser = parse_wind)]
    pub wind: WindSpeedUnit,

    /// Precipitation unit: mm or inch.
    #[arg(long, default_value = "mm", value_parser = parse_precipitation)]
    pub precipitation: PrecipitationUnit,
}

impl From<UnitArgs> for UnitPreferences {
    fn from(args: UnitArgs) -> Self {
        UnitPreferences {
            temperature: args.temperature,
            wind: args.wind,
            precipitation: args.precipitation,
        }
    }
}

fn parse_temperature(s: &str) -> anyhow::Result<TemperatureUnit> {
    TemperatureUnit::try_from(s)
}

fn parse_wind(s: &str) -> anyhow::Result<WindSpeedUnit> {
    WindSpeedUnit::try_from(s)
}

fn parse_precipitation(s: &str) -> anyhow::Result<PrecipitationUnit> {
    PrecipitationUnit::try_from(s)
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { query, units, json } => {
                let config = Config::load()?;
                show(&config, query.join(" "), units.into(), json).await
            }
            Command::Suggest { text } => {
                let config = Config::load()?;
                suggest(&config, text).await
            }
            Command::Interactive { units } => {
                let config = Config::load()?;
                session::run(&config, units.into()).await
            }
            Command::Config { action } => configure(action),
        }
    }
}

async fn show(
    config: &Config,
    query: String,
    preferences: UnitPreferences,
    json: bool,
) -> anyhow::Result<()> {
    let mut pipeline = WeatherPipeline::from_config(config)?;
    pipeline.set_preferences(preferences);
    pipeline.search(SearchQuery::Text(query)).await;

    let now = Utc::now();
    if json {
        println!("{}", output::render_json(&pipeline, now)?);
    } else {
        print!("{}", output::render_state(&pipeline, now));
    }
    Ok(())
}

async fn suggest(config: &Config, text: Option<String>) -> anyhow::Result<()> {
    let pipeline = WeatherPipeline::from_config(config)?;

    if let Some(text) = text {
        info!(%text, "one-shot suggestions");
        print!("{}", output::render_suggestions(&pipeline.suggest(&text).await));
        return Ok(());
    }

    let SuggestionFeed {
        input,
        mut suggestions,
    } = spawn_suggestion_feed(pipeline.geocoding().clone(), config.debounce_delay());

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            if input.send(line).await.is_err() {
                break;
            }
        }
        anyhow::Ok(())
    });

    while let Some(places) = suggestions.recv().await {
        print!("{}", output::render_suggestions(&places));
    }

    reader.await??;
    Ok(())
}

fn configure(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::config_file_path()?.display());
        }
        ConfigAction::Init { force } => {
            let path = Config::config_file_path()?;
            if path.exists() && !force {
                bail!(
                    "Config file already exists at {}.\n\
                     Hint: pass --force to overwrite it with defaults.",
                    path.display()
                );
            }
            let path = Config::default().save()?;
            info!(path = %path.display(), "config written");
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_joins_words_and_defaults_to_metric() {
        let cli = Cli::try_parse_from(["citycast", "show", "New", "York"]).unwrap();
        match cli.command {
            Command::Show { query, units, json } => {
                assert_eq!(query.join(" "), "New York");
                assert!(!json);
                assert_eq!(UnitPreferences::from(units), UnitPreferences::default());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unit_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "citycast",
            "show",
            "Paris",
            "--temperature",
            "f",
            "--wind",
            "mph",
            "--precipitation",
            "inch",
        ])
        .unwrap();
        let Command::Show { units, .. } = cli.command else {
            panic!("expected show");
        };
        let prefs = UnitPreferences::from(units);
        assert_eq!(prefs.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.wind, WindSpeedUnit::MilesPerHour);
        assert_eq!(prefs.precipitation, PrecipitationUnit::Inches);
    }

    #[test]
    fn bad_unit_is_rejected() {
        let err = Cli::try_parse_from(["citycast", "show", "Paris", "--wind", "knots"]).unwrap_err();
        assert!(err.to_string().contains("Unknown wind speed unit"));
    }

    #[test]
    fn show_requires_query() {
        assert!(Cli::try_parse_from(["citycast", "show"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["citycast", "-vv", "suggest", "Pa"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Suggest { text: Some(t) } if t == "Pa"));
    }

    #[test]
    fn config_init_force_flag() {
        let cli = Cli::try_parse_from(["citycast", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
