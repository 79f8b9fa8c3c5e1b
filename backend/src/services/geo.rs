//! Great-circle distance.

use super::error::{SearchError, SearchResult};
use crate::models::Coordinates;

/// Earth radius used for distance computation, in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two points, in statute miles.
///
/// Fails with [`SearchError::ComputationError`] if either point is not a
/// finite coordinate inside the WGS84 ranges, so a malformed record can never
/// be confused with a distant one.
pub fn distance_miles(a: Coordinates, b: Coordinates) -> SearchResult<f64> {
    for point in [a, b] {
        if !point.is_valid() {
            return Err(SearchError::computation(format!(
                "invalid coordinate ({}, {})",
                point.latitude, point.longitude
            )));
        }
    }
    if a == b {
        return Ok(0.0);
    }

    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    Ok(EARTH_RADIUS_MILES * c)
}
