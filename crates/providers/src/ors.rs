use std::env;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use wayfinder_core::{Coordinate, DirectionsError, RawRoute, RawStep, RouteSummary};

use crate::{Geocoder, RoutePlanner};

const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
const DRIVING_PROFILE: &str = "driving-car";

/// OpenRouteService client covering both the geocoding and the directions
/// endpoints.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OrsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DirectionsError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DirectionsError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|err| DirectionsError::Provider(err.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url,
        })
    }

    /// Configuration from `WAYFINDER_ORS_API_KEY` / `WAYFINDER_ORS_BASE_URL`.
    /// The key falls back to a dev placeholder so the app still boots for
    /// offline work; requests against the real service will be rejected
    /// until a key is supplied.
    pub fn from_env() -> Result<Self, DirectionsError> {
        let api_key =
            env::var("WAYFINDER_ORS_API_KEY").unwrap_or_else(|_| "dev-ors-key".to_string());
        let base_url =
            env::var("WAYFINDER_ORS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::with_base_url(api_key, base_url)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: FeatureGeometry,
    #[serde(default)]
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    // GeoJSON order: [lng, lat]
    coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    confidence: Option<f64>,
}

impl Geocoder for OrsClient {
    async fn geocode(&self, text: &str) -> Result<Coordinate, DirectionsError> {
        let url = format!("{}/geocode/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("text", text)])
            .send()
            .await
            .map_err(|err| DirectionsError::Provider(err.to_string()))?;

        if !response.status().is_success() {
            return Err(DirectionsError::Provider(format!(
                "geocoding failed with status {}",
                response.status()
            )));
        }

        let payload: GeocodeResponse = response
            .json()
            .await
            .map_err(|err| DirectionsError::Provider(err.to_string()))?;

        // Highest confidence wins; ties keep the earliest candidate.
        let mut best: Option<GeocodeFeature> = None;
        for feature in payload.features {
            let better = match &best {
                Some(current) => {
                    feature.properties.confidence.unwrap_or(0.0)
                        > current.properties.confidence.unwrap_or(0.0)
                }
                None => true,
            };
            if better {
                best = Some(feature);
            }
        }

        let feature =
            best.ok_or_else(|| DirectionsError::LocationNotFound(text.to_string()))?;

        debug!(text = %text, "geocoded location");
        Ok(Coordinate {
            lng: feature.geometry.coordinates[0],
            lat: feature.geometry.coordinates[1],
        })
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<OrsRoute>,
}

#[derive(Debug, Deserialize)]
struct OrsRoute {
    summary: OrsSummary,
    #[serde(default)]
    segments: Vec<OrsSegment>,
}

#[derive(Debug, Deserialize)]
struct OrsSummary {
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OrsSegment {
    #[serde(default)]
    steps: Vec<OrsStep>,
}

#[derive(Debug, Deserialize)]
struct OrsStep {
    instruction: String,
    distance: f64,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OrsErrorResponse {
    error: Option<OrsErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct OrsErrorDetail {
    message: Option<String>,
}

impl RoutePlanner for OrsClient {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RawRoute, DirectionsError> {
        let url = format!("{}/v2/directions/{DRIVING_PROFILE}", self.base_url);
        let body = json!({
            "coordinates": [
                [origin.lng, origin.lat],
                [destination.lng, destination.lat]
            ],
            "instructions": "true",
            "geometry": "true",
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| DirectionsError::Provider(err.to_string()))?;

        if !response.status().is_success() {
            let message = response
                .json::<OrsErrorResponse>()
                .await
                .ok()
                .and_then(|payload| payload.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| "Unknown error".to_string());

            return Err(DirectionsError::Route(message));
        }

        let payload: RouteResponse = response
            .json()
            .await
            .map_err(|err| DirectionsError::Provider(err.to_string()))?;

        let route = payload
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| DirectionsError::Route("no route returned".to_string()))?;

        let steps = route
            .segments
            .into_iter()
            .next()
            .map(|segment| segment.steps)
            .unwrap_or_default()
            .into_iter()
            .map(|step| RawStep {
                instruction: step.instruction,
                distance_meters: step.distance,
                duration_seconds: step.duration,
            })
            .collect();

        Ok(RawRoute {
            summary: RouteSummary {
                distance_meters: route.summary.distance,
                duration_seconds: route.summary.duration,
            },
            steps,
        })
    }
}
