//! Active/inactive evaluation of a recurring promotional window.
//!
//! This is a pure time gate: it says nothing about whether the amenity is
//! open. Callers that need both must combine it with [`super::schedule`].

use chrono::NaiveDateTime;

use crate::models::{DayOfWeek, PromotionStatus, PromotionalWindow, TimeOfDay, MINUTES_PER_DAY};

/// Evaluate a promotional window at a venue-local instant.
///
/// Returns `None` when there is no window or it is not active. A window
/// crossing midnight stays active into the early hours of the day after one
/// of its listed days.
pub fn evaluate_promotion(
    window: Option<&PromotionalWindow>,
    now: &NaiveDateTime,
) -> Option<PromotionStatus> {
    let window = window?;
    let today = DayOfWeek::of(now);
    let minute = TimeOfDay::of(now).minutes_since_midnight();
    let hours = window.hours();

    let active_today = window.applies_on(today) && hours.contains(minute);
    let spill_from_yesterday = window.applies_on(today.previous())
        && hours.crosses_midnight()
        && hours.contains(minute + MINUTES_PER_DAY);

    if !(active_today || spill_from_yesterday) {
        return None;
    }

    Some(PromotionStatus {
        start: window.start_time,
        end: window.end_time,
        description: describe(window),
    })
}

/// Human-readable label, e.g. `Happy Hour 4:00 PM-6:00 PM`.
pub fn describe(window: &PromotionalWindow) -> String {
    format!(
        "Happy Hour {}-{}",
        window.start_time.to_12h_string(),
        window.end_time.to_12h_string()
    )
}
