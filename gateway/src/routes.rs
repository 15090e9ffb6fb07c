use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::api::{ActivityForm, PhotoQuery, PhotosResponse, PlacesQuery};
use crate::error::ApiError;
use outing_core::geo::{GeoClient, IpLookupResult};
use outing_core::llm::Brain;
use outing_core::places::PlacesClient;
use outing_core::Config;

// Application State
// One pooled HTTP client shared by the three upstream clients. Nothing here is mutated
// after startup.
#[derive(Clone)]
pub struct AppState {
    places: Arc<PlacesClient>,
    brain: Arc<Brain>,
    geo: Arc<GeoClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            places: Arc::new(PlacesClient::new(http.clone(), config)),
            brain: Arc::new(Brain::new(http.clone(), config)),
            geo: Arc::new(GeoClient::new(http, config)),
        })
    }
}

/// Browsers call us from anywhere.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/places", get(search_places))
        .route("/api/places/image", get(place_photos))
        .route("/api/ai-activities", post(suggest_activities))
        .route("/api/myip", get(my_ip))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- HANDLERS ---

async fn health_check() -> &'static str {
    "Outing Gateway: Operational"
}

async fn search_places(
    State(state): State<AppState>,
    params: Result<Query<PlacesQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    // A query string we can't read (e.g. a repeated key) counts as missing input.
    let Some((query, ll)) = params.ok().and_then(|Query(p)| p.required()) else {
        warn!("Places search rejected: missing query or ll");
        return Err(ApiError::ClientInput("Missing query or ll"));
    };

    let places = state.places.search(&query, &ll).await.map_err(|e| {
        error!("Places search failed: {}", e);
        ApiError::from_upstream(e, "Failed to fetch places", "Failed to fetch places")
    })?;

    Ok(Json(places))
}

async fn place_photos(
    State(state): State<AppState>,
    params: Result<Query<PhotoQuery>, QueryRejection>,
) -> Result<Json<PhotosResponse>, ApiError> {
    let Some(fsq_id) = params.ok().and_then(|Query(p)| p.required()) else {
        warn!("Photo lookup rejected: missing fsq_id");
        return Err(ApiError::ClientInput("Missing fsq_id"));
    };

    let photos = state.places.photos(&fsq_id).await.map_err(|e| {
        error!("Photo lookup for '{}' failed: {}", fsq_id, e);
        ApiError::from_upstream(
            e,
            "Failed to fetch Foursquare photos",
            "Server error fetching photos",
        )
    })?;

    debug!("Photos for '{}': {}", fsq_id, photos);
    Ok(Json(PhotosResponse { photos }))
}

async fn suggest_activities(
    State(state): State<AppState>,
    payload: Result<Json<ActivityForm>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    // An unreadable body is treated the same as an empty one.
    let request = payload
        .ok()
        .and_then(|Json(form)| form.required())
        .ok_or_else(|| {
            warn!("Activity suggestion rejected: missing fields");
            ApiError::ClientInput("Missing one or more required fields")
        })?;

    info!(
        "Suggesting activities for mood '{}' in {}",
        request.mood, request.city
    );

    let suggestions = state.brain.suggest_activities(&request).await.map_err(|e| {
        error!("Activity suggestion failed: {}", e);
        ApiError::from_upstream(e, "AI request failed", "Failed to fetch AI activities")
    })?;

    Ok(Json(suggestions))
}

async fn my_ip(State(state): State<AppState>) -> Result<Json<IpLookupResult>, ApiError> {
    const FAILURE: &str = "Server error fetching IP/location";

    let ip = state.geo.public_ip().await.map_err(|e| {
        error!("Public IP lookup failed: {}", e);
        ApiError::from_upstream(e, "Failed to fetch IP", FAILURE)
    })?;

    let location = state.geo.locate(&ip).await.map_err(|e| {
        error!("Geolocation of {} failed: {}", ip, e);
        ApiError::from_upstream(e, "Failed to fetch location", FAILURE)
    })?;

    Ok(Json(IpLookupResult { ip, location }))
}
