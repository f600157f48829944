use std::io::{self, BufRead, IsTerminal, Write};

use activity_core::{
    Config, Location, Recommendation, SimpleActivityAdvisor, recommend_for, source_from_config,
};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};

const CITY_PROMPT: &str = "Please enter the city you'd like to see the weather for:";
const REGION_PROMPT: &str =
    "Please also enter the state or country (to avoid confusion with duplicate city names):";
const FAREWELL: &str = "Thank You For Using Our Program! Have A Great Day!";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "activity", version, about = "Weather-based activity suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Weatherstack access key in the config file.
    Configure,

    /// Look up the weather and suggest an activity (the default).
    Suggest {
        /// City name; prompted for when absent.
        #[arg(long)]
        city: Option<String>,

        /// State or country; prompted for when absent.
        #[arg(long)]
        region: Option<String>,

        /// Full location query, e.g. "Paris, France". Replaces --city/--region.
        #[arg(long, conflicts_with_all = ["city", "region"])]
        location: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Suggest { city, region, location }) => {
                suggest(city, region, location).await
            }
            None => suggest(None, None, None).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let access_key = Password::new("Weatherstack access key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read access key")?;
    config.set_access_key(access_key.trim().to_string());

    let endpoint = Text::new("Endpoint (leave empty for the default):")
        .with_default(config.endpoint())
        .prompt()
        .context("Failed to read endpoint")?;
    config.weatherstack.endpoint = match endpoint.trim() {
        "" | activity_core::config::DEFAULT_ENDPOINT => None,
        other => Some(other.to_string()),
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn suggest(
    city: Option<String>,
    region: Option<String>,
    location: Option<String>,
) -> anyhow::Result<()> {
    println!("Welcome to the Weather Activity Recommender!");

    let location = match location {
        Some(query) => Location::from_query(query),
        None => {
            let city = match city {
                Some(city) => city,
                None => ask(CITY_PROMPT).context("Failed to read city")?,
            };
            let region = match region {
                Some(region) => region,
                None => ask(REGION_PROMPT).context("Failed to read state or country")?,
            };
            Location::new(&city, &region)
        }
    };
    println!("Fetching weather information for {location}...");

    let outcome = lookup(&location).await;
    print_outcome(&mut io::stdout(), outcome)?;
    Ok(())
}

/// Prompt with `inquire` on a terminal, fall back to plain lines when stdin is piped.
fn ask(question: &str) -> anyhow::Result<String> {
    if io::stdin().is_terminal() {
        Ok(Text::new(question).prompt()?)
    } else {
        read_answer(&mut io::stdin().lock(), &mut io::stdout(), question)
    }
}

fn read_answer(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
) -> anyhow::Result<String> {
    write!(out, "{question} ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input ended before an answer was given");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn lookup(location: &Location) -> anyhow::Result<Recommendation> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;

    let rec = recommend_for(source.as_ref(), &SimpleActivityAdvisor::new(), location).await?;
    Ok(rec)
}

/// Either the full report or one error line; the farewell follows both.
fn print_outcome(out: &mut impl Write, outcome: anyhow::Result<Recommendation>) -> io::Result<()> {
    match outcome {
        Ok(rec) => write!(out, "{}", render_report(&rec))?,
        Err(err) => {
            tracing::debug!(error = ?err, "lookup failed");
            writeln!(out, "An error occurred: {err:#}")?;
        }
    }
    writeln!(out, "{FAREWELL}")
}

fn render_report(rec: &Recommendation) -> String {
    format!(
        "\nWeather Report:\n\
         Temperature: {} °F\n\
         Weather Condition: {}\n\
         Precipitation: {} inches\n\
         \n\
         Recommended Activity:\n\
         {}\n",
        rec.temperature_f, rec.weather_condition, rec.precip_in, rec.activity,
    )
}
