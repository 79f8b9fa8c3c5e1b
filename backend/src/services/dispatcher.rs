//! Search entry point.
//!
//! The dispatcher turns a raw [`SearchRequest`] into a validated
//! [`SearchQuery`], asks the repository for candidates, and hands them to the
//! aggregator. It owns no state besides the injected repository and settings,
//! so concurrent searches need no coordination.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use super::aggregator::aggregate;
use super::error::{SearchError, SearchResult};
use crate::config::SearchSettings;
use crate::db::repository::FullRepository;
use crate::models::{
    AmenityCategory, Coordinates, Filters, RankedResult, SearchMode, SearchQuery, SearchRequest,
    SearchResponse, SearchScope, SearchTarget, VenueId,
};

/// Accepted formats for an explicit evaluation instant.
const INSTANT_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Top-level search service.
#[derive(Clone)]
pub struct SearchDispatcher {
    repository: Arc<dyn FullRepository>,
    settings: SearchSettings,
}

impl SearchDispatcher {
    pub fn new(repository: Arc<dyn FullRepository>, settings: SearchSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Build a [`SearchQuery`] from a raw request.
    ///
    /// # Errors
    /// [`SearchError::InvalidQuery`] when city mode has no text, nearby mode
    /// lacks a coordinate, the radius is zero, or `barType` is unknown.
    pub fn normalize(&self, request: &SearchRequest) -> SearchResult<SearchQuery> {
        let target = match request.mode {
            SearchMode::City => {
                let raw_text = request.text.clone().unwrap_or_default();
                if raw_text.trim().is_empty() {
                    return Err(SearchError::invalid_query(
                        "Query text is required for city search",
                    ));
                }
                SearchTarget::Text { raw_text }
            }
            SearchMode::Nearby => {
                let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude)
                else {
                    return Err(SearchError::invalid_query(
                        "Latitude and longitude are required for nearby search",
                    ));
                };
                SearchTarget::ReferencePoint {
                    latitude,
                    longitude,
                    radius_miles: request.radius.unwrap_or(self.settings.default_radius_miles),
                }
            }
        };

        let bar_type = request.bar_type.trim();
        let category = if bar_type.is_empty() {
            None
        } else {
            Some(
                bar_type
                    .parse::<AmenityCategory>()
                    .map_err(SearchError::InvalidQuery)?,
            )
        };

        Ok(SearchQuery {
            target,
            filters: Filters {
                open_now: request.open_now,
                happy_hour: request.happy_hour,
                serves_food: request.serves_food,
                rooftop: request.rooftop,
                live_music: request.live_music,
                outdoor_seating: request.outdoor_seating,
                category,
                sort_by: request.sort_by,
            },
        })
    }

    /// Run a validated query and return ranked results.
    ///
    /// The repository is asked once for venues and once, in a batch, for
    /// their amenities. Repository failures are surfaced, never turned into
    /// an empty result.
    pub async fn dispatch(
        &self,
        query: &SearchQuery,
        now: &NaiveDateTime,
    ) -> SearchResult<Vec<RankedResult>> {
        let scope = resolve_scope(&query.target)?;
        let reference = match &scope {
            SearchScope::Nearby { center, .. } => Some(*center),
            SearchScope::Text { .. } => None,
        };

        let venues = self
            .repository
            .fetch_venues(&scope, self.settings.max_candidates)
            .await?;
        debug!(candidates = venues.len(), "fetched candidate venues");

        let venue_ids: Vec<VenueId> = venues.iter().map(|venue| venue.id).collect();
        let amenities = if venue_ids.is_empty() {
            Vec::new()
        } else {
            self.repository.fetch_amenities(&venue_ids).await?
        };
        debug!(amenities = amenities.len(), "fetched amenities");

        aggregate(venues, amenities, &query.filters, reference, now)
    }

    /// Normalize, dispatch and wrap the results in a [`SearchResponse`].
    pub async fn search(
        &self,
        request: &SearchRequest,
        now: &NaiveDateTime,
    ) -> SearchResult<SearchResponse> {
        let span = tracing::info_span!("search", search_id = %Uuid::new_v4(), mode = ?request.mode);
        async {
            let query = self.normalize(request)?;
            let results = self.dispatch(&query, now).await?;
            info!(results = results.len(), sort_by = ?query.filters.sort_by, "search completed");
            Ok::<_, SearchError>(SearchResponse::new(results, Utc::now()))
        }
        .instrument(span)
        .await
    }
}

/// Validate a search target and turn it into a repository scope.
///
/// Text is trimmed, whitespace-collapsed and case-folded. Coordinates must be
/// finite and inside the WGS84 ranges, and the radius must be positive.
pub fn resolve_scope(target: &SearchTarget) -> SearchResult<SearchScope> {
    match target {
        SearchTarget::Text { raw_text } => {
            let hint = normalize_location_text(raw_text);
            if hint.is_empty() {
                return Err(SearchError::invalid_query(
                    "Query text is required for city search",
                ));
            }
            Ok(SearchScope::Text { hint })
        }
        SearchTarget::ReferencePoint {
            latitude,
            longitude,
            radius_miles,
        } => {
            let center = Coordinates::new(*latitude, *longitude);
            if !center.is_valid() {
                return Err(SearchError::invalid_query(format!(
                    "Invalid coordinates: ({}, {})",
                    latitude, longitude
                )));
            }
            if *radius_miles == 0 {
                return Err(SearchError::invalid_query("Radius must be greater than zero"));
            }
            Ok(SearchScope::Nearby {
                center,
                radius_miles: *radius_miles,
            })
        }
    }
}

/// Trim, collapse inner whitespace and lowercase a location hint.
pub fn normalize_location_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The instant a request should be evaluated at: its `at` field when given,
/// otherwise `fallback`.
pub fn evaluation_instant(
    request: &SearchRequest,
    fallback: NaiveDateTime,
) -> SearchResult<NaiveDateTime> {
    let Some(raw) = request.at.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(fallback);
    };
    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| {
            SearchError::invalid_query(format!(
                "Invalid 'at' value '{}', expected YYYY-MM-DDTHH:MM[:SS]",
                raw
            ))
        })
}
