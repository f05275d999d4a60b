use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wayfinder_agents::DirectionsAgent;
use wayfinder_core::{extract_locations, Extraction, RegionContext, TripRequest};
use wayfinder_observability::{init_tracing, AppMetrics};
use wayfinder_providers::{EntityRecognizer, GazetteerRecognizer, OrsClient};

#[derive(Debug, Parser)]
#[command(name = "wayfinder")]
#[command(about = "Wayfinder driving directions CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch directions for a known origin/destination pair.
    Directions {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
    },
    /// Fetch directions from a free-text prompt.
    Ask { prompt: String },
    /// Show what the extractor reads out of a prompt. No network calls.
    Extract { prompt: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("wayfinder_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Directions {
            origin,
            destination,
        } => {
            let route = build_agent()?
                .handle_directions(TripRequest::Structured {
                    origin,
                    destination,
                })
                .await?;
            println!("{}", serde_json::to_string_pretty(&route)?);
        }
        Command::Ask { prompt } => {
            let route = build_agent()?
                .handle_directions(TripRequest::Prompt { prompt })
                .await?;
            println!("{}", serde_json::to_string_pretty(&route)?);
        }
        Command::Extract { prompt } => {
            let recognizer = GazetteerRecognizer::default();
            let entities = recognizer.recognize_geo_entities(&prompt);

            let payload = match extract_locations(&prompt, &entities) {
                Extraction::Matched {
                    origin,
                    destination,
                } => serde_json::json!({
                    "origin": origin,
                    "destination": destination,
                    "entities": entities,
                }),
                Extraction::NoMatch => serde_json::json!({
                    "error": "no origin/destination pair found",
                    "entities": entities,
                }),
            };

            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

fn build_agent() -> Result<DirectionsAgent<OrsClient, OrsClient, GazetteerRecognizer>> {
    let ors = Arc::new(
        OrsClient::from_env().context("failed to build OpenRouteService client")?,
    );

    Ok(DirectionsAgent::new(
        ors.clone(),
        ors,
        Arc::new(GazetteerRecognizer::default()),
        RegionContext::from_env(),
        AppMetrics::shared(),
    ))
}
