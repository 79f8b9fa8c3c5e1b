//! Display helpers for computed values.

const FEET_PER_MILE: f64 = 5280.0;

/// Render a distance in miles for display: `850 ft` below one mile, `2.4 mi` otherwise.
pub fn format_distance(miles: f64) -> String {
    if miles < 1.0 {
        format!("{} ft", (miles * FEET_PER_MILE).round() as i64)
    } else {
        format!("{:.1} mi", miles)
    }
}
