use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::error;
use wayfinder_agents::DirectionsAgent;
use wayfinder_core::{DirectionsError, RegionContext, TripRequest};
use wayfinder_observability::{AppMetrics, MetricsSnapshot};
use wayfinder_providers::{GazetteerRecognizer, OrsClient};

pub type AppAgent = DirectionsAgent<OrsClient, OrsClient, GazetteerRecognizer>;

#[derive(Clone)]
pub struct ApiState {
    agent: Arc<AppAgent>,
    metrics: Arc<AppMetrics>,
}

impl ApiState {
    pub fn new(agent: Arc<AppAgent>, metrics: Arc<AppMetrics>) -> Self {
        Self { agent, metrics }
    }
}

pub fn build_app() -> Result<Router> {
    let metrics = AppMetrics::shared();
    let ors = Arc::new(
        OrsClient::from_env().context("failed to build OpenRouteService client")?,
    );
    let recognizer = Arc::new(GazetteerRecognizer::default());

    let agent = Arc::new(DirectionsAgent::new(
        ors.clone(),
        ors,
        recognizer,
        RegionContext::from_env(),
        metrics.clone(),
    ));

    Ok(build_router(ApiState { agent, metrics }))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/get_directions", post(get_directions))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(16 * 1024))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };

    (StatusCode::OK, Json(payload))
}

async fn get_directions(
    State(state): State<ApiState>,
    Json(request): Json<TripRequest>,
) -> Response {
    match state.agent.handle_directions(request).await {
        Ok(route) => (StatusCode::OK, Json(route)).into_response(),
        Err(failure) => failure_response(failure),
    }
}

fn failure_response(failure: DirectionsError) -> Response {
    error!(error = %failure, "directions request rejected");

    if failure.is_user_error() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Could not understand the request",
                "details": "Provide an origin and destination, or a prompt like \
                            \"navigate from Banjara Hills to Gachibowli\".",
            })),
        )
            .into_response();
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Could not calculate directions",
            "details": failure.to_string(),
        })),
    )
        .into_response()
}

fn build_cors_layer() -> CorsLayer {
    let origins = env::var("WAYFINDER_ALLOWED_ORIGINS")
        .ok()
        .map(|value| {
            value
                .split(',')
                .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // The voice frontend may be served from anywhere, so the default stays
    // open.
    if origins.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
