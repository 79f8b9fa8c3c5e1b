//! Data Transfer Objects for the HTTP API.
//!
//! Search payloads are the model types themselves; this module adds the
//! shapes that only exist at the HTTP boundary.

use serde::{Deserialize, Serialize};

pub use crate::models::{AmenityResult, RankedResult, SearchRequest, SearchResponse};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}

/// Amenities of a single venue with their live status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueAmenitiesResponse {
    pub venue_id: i64,
    pub amenities: Vec<AmenityResult>,
    pub total: usize,
}

/// Optional evaluation instant for venue lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtQuery {
    #[serde(default)]
    pub at: Option<String>,
}
