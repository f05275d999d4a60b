use serde::{Deserialize, Serialize};

use crate::extract::normalize_text;

/// Incoming directions request. Clients either send a pre-split
/// origin/destination pair or a single free-text prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TripRequest {
    Structured { origin: String, destination: String },
    Prompt { prompt: String },
}

/// Request after whitespace normalization, with the two accepted input
/// shapes made explicit for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripInput {
    Pair { origin: String, destination: String },
    FreeText(String),
}

impl TripRequest {
    pub fn into_input(self) -> TripInput {
        match self {
            Self::Structured {
                origin,
                destination,
            } => TripInput::Pair {
                origin: normalize_text(&origin),
                destination: normalize_text(&destination),
            },
            Self::Prompt { prompt } => TripInput::FreeText(normalize_text(&prompt)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStep {
    pub instruction: String,
    pub distance_meters: f64,
    pub duration_seconds: Option<f64>,
}

/// Provider route payload, already reduced to the fields the formatter
/// consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoute {
    pub summary: RouteSummary,
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedStep {
    pub step_number: usize,
    pub instruction: String,
    pub distance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Display-ready itinerary returned to clients. Field names are the wire
/// format consumed by the voice frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRoute {
    pub origin: String,
    pub destination: String,
    pub total_distance: String,
    pub total_duration: String,
    pub steps: Vec<FormattedStep>,
}
