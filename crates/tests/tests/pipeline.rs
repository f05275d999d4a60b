use std::sync::Arc;

use wayfinder_agents::DirectionsAgent;
use wayfinder_core::{
    Coordinate, DirectionsError, RawRoute, RawStep, RegionContext, RouteSummary, TripRequest,
};
use wayfinder_observability::AppMetrics;
use wayfinder_providers::{EntityRecognizer, Geocoder, RoutePlanner};

struct FixedGeocoder;

impl Geocoder for FixedGeocoder {
    async fn geocode(&self, text: &str) -> Result<Coordinate, DirectionsError> {
        let lat = if text.starts_with("Banjara Hills") {
            17.41
        } else {
            17.44
        };
        Ok(Coordinate { lat, lng: 78.4 })
    }
}

struct MissingGeocoder;

impl Geocoder for MissingGeocoder {
    async fn geocode(&self, text: &str) -> Result<Coordinate, DirectionsError> {
        Err(DirectionsError::LocationNotFound(text.to_string()))
    }
}

struct FixedPlanner;

impl RoutePlanner for FixedPlanner {
    async fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<RawRoute, DirectionsError> {
        Ok(sample_route())
    }
}

struct FailingPlanner;

impl RoutePlanner for FailingPlanner {
    async fn route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<RawRoute, DirectionsError> {
        Err(DirectionsError::Route(
            "Could not find routable point".to_string(),
        ))
    }
}

struct StaticRecognizer(Vec<String>);

impl EntityRecognizer for StaticRecognizer {
    fn recognize_geo_entities(&self, _text: &str) -> Vec<String> {
        self.0.clone()
    }
}

fn sample_route() -> RawRoute {
    RawRoute {
        summary: RouteSummary {
            distance_meters: 8200.0,
            duration_seconds: 1140.0,
        },
        steps: vec![
            RawStep {
                instruction: "Head west onto NH65".to_string(),
                distance_meters: 300.0,
                duration_seconds: Some(40.0),
            },
            RawStep {
                instruction: "Destination will be on the left-hand side".to_string(),
                distance_meters: 80.0,
                duration_seconds: None,
            },
        ],
    }
}

fn agent<G, R, E>(
    geocoder: G,
    planner: R,
    recognizer: E,
    metrics: Arc<AppMetrics>,
) -> DirectionsAgent<G, R, E>
where
    G: Geocoder,
    R: RoutePlanner,
    E: EntityRecognizer,
{
    DirectionsAgent::new(
        Arc::new(geocoder),
        Arc::new(planner),
        Arc::new(recognizer),
        RegionContext::default(),
        metrics,
    )
}

#[tokio::test]
async fn structured_request_produces_itinerary() {
    let metrics = AppMetrics::shared();
    let agent = agent(
        FixedGeocoder,
        FixedPlanner,
        StaticRecognizer(Vec::new()),
        metrics.clone(),
    );

    let route = agent
        .handle_directions(TripRequest::Structured {
            origin: "Banjara Hills".to_string(),
            destination: "Gachibowli".to_string(),
        })
        .await
        .expect("pipeline should succeed");

    assert_eq!(route.origin, "Banjara Hills");
    assert_eq!(route.destination, "Gachibowli");
    assert_eq!(route.total_distance, "8.2 km");
    assert_eq!(route.total_duration, "19 minutes");
    assert_eq!(route.steps.len(), 2);
    assert_eq!(route.steps[0].step_number, 1);
    assert_eq!(route.steps[0].instruction, "Drive west onto NH65");
    assert_eq!(
        route.steps[1].instruction,
        "Your destination will be on the left side"
    );

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.requests_total, 1);
    assert_eq!(snapshot.provider_calls_total, 3);
    assert_eq!(snapshot.failed_requests_total, 0);
    assert_eq!(snapshot.extraction_fallback_total, 0);
}

#[tokio::test]
async fn prompt_request_uses_recognized_entities() {
    let metrics = AppMetrics::shared();
    let agent = agent(
        FixedGeocoder,
        FixedPlanner,
        StaticRecognizer(vec!["Charminar".to_string(), "Golconda".to_string()]),
        metrics.clone(),
    );

    let route = agent
        .handle_directions(TripRequest::Prompt {
            prompt: "take me over from Charminar to Golconda".to_string(),
        })
        .await
        .expect("pipeline should succeed");

    assert_eq!(route.origin, "Charminar");
    assert_eq!(route.destination, "Golconda");
    assert_eq!(metrics.snapshot().extraction_fallback_total, 0);
}

#[tokio::test]
async fn prompt_without_entities_uses_pattern_chain() {
    let metrics = AppMetrics::shared();
    let agent = agent(
        FixedGeocoder,
        FixedPlanner,
        StaticRecognizer(Vec::new()),
        metrics.clone(),
    );

    let route = agent
        .handle_directions(TripRequest::Prompt {
            prompt: "navigate from Banjara Hills to Gachibowli".to_string(),
        })
        .await
        .expect("pipeline should succeed");

    assert_eq!(route.origin, "Banjara Hills");
    assert_eq!(route.destination, "Gachibowli");
    assert_eq!(metrics.snapshot().extraction_fallback_total, 1);
}

#[tokio::test]
async fn unintelligible_prompt_is_an_extraction_error() {
    let metrics = AppMetrics::shared();
    let agent = agent(
        FixedGeocoder,
        FixedPlanner,
        StaticRecognizer(Vec::new()),
        metrics.clone(),
    );

    let error = agent
        .handle_directions(TripRequest::Prompt {
            prompt: "hello world".to_string(),
        })
        .await
        .expect_err("pipeline should fail");

    assert_eq!(error, DirectionsError::Extraction);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.failed_requests_total, 1);
    assert_eq!(snapshot.provider_calls_total, 0);
}

#[tokio::test]
async fn empty_structured_field_is_an_extraction_error() {
    let agent = agent(
        FixedGeocoder,
        FixedPlanner,
        StaticRecognizer(Vec::new()),
        AppMetrics::shared(),
    );

    let error = agent
        .handle_directions(TripRequest::Structured {
            origin: "   ".to_string(),
            destination: "Gachibowli".to_string(),
        })
        .await
        .expect_err("pipeline should fail");

    assert_eq!(error, DirectionsError::Extraction);
}

#[tokio::test]
async fn geocoder_failure_aborts_before_routing() {
    let metrics = AppMetrics::shared();
    let agent = agent(
        MissingGeocoder,
        FixedPlanner,
        StaticRecognizer(Vec::new()),
        metrics.clone(),
    );

    let error = agent
        .handle_directions(TripRequest::Structured {
            origin: "Nowhere".to_string(),
            destination: "Gachibowli".to_string(),
        })
        .await
        .expect_err("pipeline should fail");

    assert!(matches!(error, DirectionsError::LocationNotFound(_)));
    assert_eq!(metrics.snapshot().provider_calls_total, 1);
}

#[tokio::test]
async fn planner_failure_surfaces_provider_message() {
    let agent = agent(
        FixedGeocoder,
        FailingPlanner,
        StaticRecognizer(Vec::new()),
        AppMetrics::shared(),
    );

    let error = agent
        .handle_directions(TripRequest::Structured {
            origin: "Banjara Hills".to_string(),
            destination: "Gachibowli".to_string(),
        })
        .await
        .expect_err("pipeline should fail");

    assert_eq!(
        error,
        DirectionsError::Route("Could not find routable point".to_string())
    );
    assert_eq!(error.to_string(), "API Error: Could not find routable point");
}
