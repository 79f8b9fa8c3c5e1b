//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the search
//! dispatcher or the repository.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::{Local, NaiveDateTime};

use super::dto::{
    AtQuery, HealthResponse, RankedResult, SearchRequest, SearchResponse, VenueAmenitiesResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::VenueId;
use crate::services::{evaluation_instant, with_status, SearchError};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Wall-clock instant used when a request does not pin one.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Search
// =============================================================================

/// GET /v1/search
///
/// Search with query-string parameters.
pub async fn search_get(
    State(state): State<AppState>,
    request: Result<Query<SearchRequest>, QueryRejection>,
) -> HandlerResult<SearchResponse> {
    let Query(request) =
        request.map_err(|e| SearchError::invalid_query(e.body_text()))?;
    run_search(&state, &request).await
}

/// POST /v1/search
///
/// Search with a JSON body carrying the same fields as the query string.
pub async fn search_post(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> HandlerResult<SearchResponse> {
    let Json(request) =
        request.map_err(|e| SearchError::invalid_query(e.body_text()))?;
    run_search(&state, &request).await
}

async fn run_search(state: &AppState, request: &SearchRequest) -> HandlerResult<SearchResponse> {
    let now = evaluation_instant(request, local_now())?;
    let response = state.dispatcher.search(request, &now).await?;
    Ok(Json(response))
}

// =============================================================================
// Venue Lookup
// =============================================================================

/// GET /v1/venues/{venue_id}
///
/// A venue joined with its amenities and their live status.
pub async fn get_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    Query(query): Query<AtQuery>,
) -> HandlerResult<RankedResult> {
    let now = instant_from(&query)?;
    let venue_id = VenueId::new(venue_id);
    let venue = state.repository.get_venue(venue_id).await?;
    let amenities = state.repository.get_amenities_for_venue(venue_id).await?;

    Ok(Json(RankedResult {
        venue,
        amenities: with_status(amenities, &now),
        distance: None,
        distance_label: None,
    }))
}

/// GET /v1/venues/{venue_id}/amenities
///
/// Amenities of a venue with their live status.
pub async fn get_venue_amenities(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    Query(query): Query<AtQuery>,
) -> HandlerResult<VenueAmenitiesResponse> {
    let now = instant_from(&query)?;
    let id = VenueId::new(venue_id);
    // 404 for unknown venues rather than an empty list
    state.repository.get_venue(id).await?;
    let amenities = with_status(state.repository.get_amenities_for_venue(id).await?, &now);

    Ok(Json(VenueAmenitiesResponse {
        venue_id,
        total: amenities.len(),
        amenities,
    }))
}

fn instant_from(query: &AtQuery) -> Result<NaiveDateTime, AppError> {
    let request = SearchRequest {
        at: query.at.clone(),
        ..Default::default()
    };
    Ok(evaluation_instant(&request, local_now())?)
}
