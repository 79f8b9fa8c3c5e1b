//! Search request, query and result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::TimeOfDay;
use super::venue::{Amenity, AmenityCategory, Coordinates, Venue};

/// Default search radius in miles when the request does not name one.
pub const DEFAULT_RADIUS_MILES: u32 = 50;

/// Key used to order search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Rating,
    Name,
}

/// Fixed-shape filter set applied to a venue's primary amenity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub open_now: bool,
    pub happy_hour: bool,
    pub serves_food: bool,
    pub rooftop: bool,
    pub live_music: bool,
    pub outdoor_seating: bool,
    /// Category restriction; `None` accepts every category.
    pub category: Option<AmenityCategory>,
    pub sort_by: SortKey,
}

impl Filters {
    /// True when at least one boolean toggle or the category restriction is set.
    pub fn is_restrictive(&self) -> bool {
        self.open_now
            || self.happy_hour
            || self.serves_food
            || self.rooftop
            || self.live_music
            || self.outdoor_seating
            || self.category.is_some()
    }
}

/// Search mode as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Nearby,
    #[default]
    City,
}

/// Raw search request, as received from a client.
///
/// Field names follow the public API (`openNow`, `barType`, `sortBy`, ...).
/// The short aliases `q`, `lat` and `lng` are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default, alias = "q")]
    pub text: Option<String>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default)]
    pub open_now: bool,
    #[serde(default)]
    pub happy_hour: bool,
    #[serde(default)]
    pub serves_food: bool,
    #[serde(default)]
    pub rooftop: bool,
    #[serde(default)]
    pub live_music: bool,
    #[serde(default)]
    pub outdoor_seating: bool,
    #[serde(default)]
    pub bar_type: String,
    #[serde(default)]
    pub sort_by: SortKey,
    /// Venue-local evaluation instant (`YYYY-MM-DDTHH:MM[:SS]`); defaults to now.
    #[serde(default)]
    pub at: Option<String>,
}

/// What a search is scoped by.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchTarget {
    /// Proximity to a coordinate.
    ReferencePoint {
        latitude: f64,
        longitude: f64,
        radius_miles: u32,
    },
    /// Free-text location hint, resolved by the repository.
    Text { raw_text: String },
}

/// A validated search: target plus filters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub target: SearchTarget,
    pub filters: Filters,
}

/// Scope handed to the repository when fetching candidates.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchScope {
    Nearby {
        center: Coordinates,
        radius_miles: u32,
    },
    /// Trimmed, case-folded location hint.
    Text { hint: String },
}

/// Live open/closed state of an amenity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatus {
    pub is_open: bool,
    pub message: String,
    /// Closing time while open; the same-day opening time while not yet open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_time: Option<TimeOfDay>,
}

/// An active promotional window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionStatus {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub description: String,
}

/// Computed live status of one amenity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityStatus {
    pub schedule: ScheduleStatus,
    #[serde(default)]
    pub happy_hour: Option<PromotionStatus>,
}

/// An amenity joined with its live status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityResult {
    #[serde(flatten)]
    pub amenity: Amenity,
    pub status: AmenityStatus,
}

/// A venue joined with its amenities and computed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    #[serde(flatten)]
    pub venue: Venue,
    pub amenities: Vec<AmenityResult>,
    /// Distance in miles from the reference point.
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_label: Option<String>,
}

impl RankedResult {
    /// The first-listed amenity, which the filters are evaluated against.
    pub fn primary_amenity(&self) -> Option<&AmenityResult> {
        self.amenities.first()
    }
}

/// Search response: ranked results plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub venues: Vec<RankedResult>,
    pub total_count: usize,
    pub search_time: DateTime<Utc>,
}

impl SearchResponse {
    pub fn new(venues: Vec<RankedResult>, search_time: DateTime<Utc>) -> Self {
        Self {
            total_count: venues.len(),
            venues,
            search_time,
        }
    }
}
