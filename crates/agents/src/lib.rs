use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};
use wayfinder_core::{
    extract_locations, format_route, DirectionsError, Extraction, FormattedRoute, RegionContext,
    TripInput, TripRequest,
};
use wayfinder_observability::AppMetrics;
use wayfinder_providers::{EntityRecognizer, Geocoder, RoutePlanner};

/// The one directions pipeline. Both request forms (structured pair and
/// free-text prompt) flow through the same resolution, geocoding, routing
/// and formatting steps.
#[derive(Clone)]
pub struct DirectionsAgent<G, R, E>
where
    G: Geocoder,
    R: RoutePlanner,
    E: EntityRecognizer,
{
    geocoder: Arc<G>,
    planner: Arc<R>,
    recognizer: Arc<E>,
    region: RegionContext,
    metrics: Arc<AppMetrics>,
}

impl<G, R, E> DirectionsAgent<G, R, E>
where
    G: Geocoder,
    R: RoutePlanner,
    E: EntityRecognizer,
{
    pub fn new(
        geocoder: Arc<G>,
        planner: Arc<R>,
        recognizer: Arc<E>,
        region: RegionContext,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            geocoder,
            planner,
            recognizer,
            region,
            metrics,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn handle_directions(
        &self,
        request: TripRequest,
    ) -> Result<FormattedRoute, DirectionsError> {
        let started = Instant::now();
        self.metrics.inc_request();

        let result = self.run_pipeline(request).await;

        self.metrics.observe_latency(started.elapsed());
        if let Err(error) = &result {
            self.metrics.inc_failed();
            warn!(error = %error, "directions request failed");
        }

        result
    }

    async fn run_pipeline(
        &self,
        request: TripRequest,
    ) -> Result<FormattedRoute, DirectionsError> {
        let (origin, destination) = self.resolve_pair(request.into_input())?;

        let qualified_origin = self.region.qualify(&origin);
        let qualified_destination = self.region.qualify(&destination);

        // Sequential, no retries; the first failure aborts the request.
        self.metrics.inc_provider_call();
        let origin_coords = self.geocoder.geocode(&qualified_origin).await?;
        self.metrics.inc_provider_call();
        let destination_coords = self.geocoder.geocode(&qualified_destination).await?;
        self.metrics.inc_provider_call();
        let raw_route = self.planner.route(origin_coords, destination_coords).await?;

        let formatted = format_route(&qualified_origin, &qualified_destination, &raw_route);

        info!(
            origin = %formatted.origin,
            destination = %formatted.destination,
            steps = formatted.steps.len(),
            total_distance = %formatted.total_distance,
            "directions handled"
        );

        Ok(formatted)
    }

    fn resolve_pair(&self, input: TripInput) -> Result<(String, String), DirectionsError> {
        match input {
            TripInput::Pair {
                origin,
                destination,
            } => {
                if origin.is_empty() || destination.is_empty() {
                    return Err(DirectionsError::Extraction);
                }
                Ok((origin, destination))
            }
            TripInput::FreeText(prompt) => {
                if prompt.is_empty() {
                    return Err(DirectionsError::Extraction);
                }

                let entities = self.recognizer.recognize_geo_entities(&prompt);
                if entities.len() < 2 {
                    self.metrics.inc_extraction_fallback();
                }

                match extract_locations(&prompt, &entities) {
                    Extraction::Matched {
                        origin,
                        destination,
                    } => Ok((origin, destination)),
                    Extraction::NoMatch => Err(DirectionsError::Extraction),
                }
            }
        }
    }
}
