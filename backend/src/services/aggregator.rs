//! Result aggregation: join, status, distance, filter and sort.
//!
//! The aggregator is a pure transform over records that were already fetched.
//! The evaluation instant and the reference point are parameters so that the
//! same input always yields the same output.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::error::SearchResult;
use super::format::format_distance;
use super::geo::distance_miles;
use super::promotion::evaluate_promotion;
use super::schedule::evaluate_schedule;
use crate::models::{
    Amenity, AmenityCategory, AmenityResult, AmenityStatus, Coordinates, Filters, RankedResult,
    SortKey, Venue, VenueId, FEATURE_LIVE_MUSIC, FEATURE_OUTDOOR_SEATING,
};

/// Compute the live status of one amenity at `now`.
pub fn amenity_status(amenity: &Amenity, now: &NaiveDateTime) -> AmenityStatus {
    AmenityStatus {
        schedule: evaluate_schedule(&amenity.hours, now),
        happy_hour: evaluate_promotion(amenity.happy_hour.as_ref(), now),
    }
}

/// Attach live status to a list of amenities, keeping their order.
pub fn with_status(amenities: Vec<Amenity>, now: &NaiveDateTime) -> Vec<AmenityResult> {
    amenities
        .into_iter()
        .map(|amenity| {
            let status = amenity_status(&amenity, now);
            AmenityResult { amenity, status }
        })
        .collect()
}

/// Join venues with their amenities, compute status and distance, then
/// filter and sort.
///
/// Venues keep the order they were supplied in until the (stable) sort, and
/// each venue's amenities keep their supplied order. A venue without
/// amenities is kept, but fails every amenity filter.
///
/// # Errors
/// [`SearchError::ComputationError`](super::error::SearchError::ComputationError)
/// when a venue or the reference point carries an invalid coordinate.
pub fn aggregate(
    venues: Vec<Venue>,
    amenities: Vec<Amenity>,
    filters: &Filters,
    reference: Option<Coordinates>,
    now: &NaiveDateTime,
) -> SearchResult<Vec<RankedResult>> {
    let mut by_venue: HashMap<VenueId, Vec<Amenity>> = HashMap::new();
    for amenity in amenities {
        by_venue.entry(amenity.venue_id).or_default().push(amenity);
    }

    let mut results = Vec::with_capacity(venues.len());
    for venue in venues {
        let joined = by_venue.remove(&venue.id).unwrap_or_default();
        let distance = match (reference, venue.coordinates()) {
            (Some(reference), Some(location)) => Some(distance_miles(reference, location)?),
            _ => None,
        };

        let result = RankedResult {
            amenities: with_status(joined, now),
            distance_label: distance.map(format_distance),
            distance,
            venue,
        };
        if matches_filters(&result, filters) {
            results.push(result);
        }
    }

    sort_results(&mut results, filters.sort_by);
    Ok(results)
}

/// Whether a result satisfies every enabled filter.
///
/// Filters are tested against the primary (first-listed) amenity only.
pub fn matches_filters(result: &RankedResult, filters: &Filters) -> bool {
    if !filters.is_restrictive() {
        return true;
    }
    let Some(primary) = result.primary_amenity() else {
        return false;
    };
    let amenity = &primary.amenity;

    (!filters.open_now || primary.status.schedule.is_open)
        && (!filters.happy_hour || primary.status.happy_hour.is_some())
        && (!filters.serves_food || amenity.serves_food)
        && (!filters.rooftop || amenity.category == AmenityCategory::Rooftop)
        && (!filters.live_music || amenity.has_feature(FEATURE_LIVE_MUSIC))
        && (!filters.outdoor_seating || amenity.has_feature(FEATURE_OUTDOOR_SEATING))
        && filters.category.map_or(true, |category| amenity.category == category)
}

/// Stable sort by the selected key.
///
/// - `Distance`: ascending, results without a distance last.
/// - `Rating`: descending, a missing rating counts as 0.
/// - `Name`: ascending, case-insensitive with a case-sensitive tie break.
pub fn sort_results(results: &mut [RankedResult], key: SortKey) {
    match key {
        SortKey::Distance => results.sort_by(|a, b| compare_distance(a.distance, b.distance)),
        SortKey::Rating => results.sort_by(|a, b| {
            let a = a.venue.star_rating.unwrap_or(0);
            let b = b.venue.star_rating.unwrap_or(0);
            b.cmp(&a)
        }),
        SortKey::Name => results.sort_by(|a, b| compare_names(&a.venue.name, &b.venue.name)),
    }
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orders names by their accent-folded lowercase form, so "Équinox" sorts
/// with the E's. Accented and case variants then fall back to code points.
fn compare_names(a: &str, b: &str) -> Ordering {
    name_sort_key(a)
        .cmp(&name_sort_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn name_sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod aggregator_tests;
