//! Open/closed evaluation over a weekly schedule.
//!
//! An instant is open when it falls inside the interval of its own day, or
//! inside the after-midnight part of the previous day's overnight interval.
//! Evaluation never scans further ahead than the current day.

use chrono::NaiveDateTime;

use crate::models::{DayOfWeek, ScheduleStatus, TimeOfDay, WeeklySchedule, MINUTES_PER_DAY};

pub const MESSAGE_HOURS_UNAVAILABLE: &str = "Hours not available";
pub const MESSAGE_CLOSED_TODAY: &str = "Closed today";
pub const MESSAGE_CLOSED: &str = "Closed";
pub const MESSAGE_OPEN_ALL_DAY: &str = "Open 24 hours";

/// Evaluate a weekly schedule at a venue-local instant.
pub fn evaluate_schedule(schedule: &WeeklySchedule, now: &NaiveDateTime) -> ScheduleStatus {
    if schedule.is_empty() {
        return closed(MESSAGE_HOURS_UNAVAILABLE.to_string(), None);
    }

    let today = DayOfWeek::of(now);
    let minute = TimeOfDay::of(now).minutes_since_midnight();

    // Early-morning instants may still belong to last night's opening.
    if let Some(previous) = schedule.hours_on(today.previous()) {
        if previous.crosses_midnight() && previous.contains(minute + MINUTES_PER_DAY) {
            return open_until(previous.close);
        }
    }

    let Some(hours) = schedule.hours_on(today) else {
        return closed(MESSAGE_CLOSED_TODAY.to_string(), None);
    };

    if hours.is_all_day() {
        return ScheduleStatus {
            is_open: true,
            message: MESSAGE_OPEN_ALL_DAY.to_string(),
            boundary_time: None,
        };
    }

    if hours.contains(minute) {
        return open_until(hours.close);
    }

    if minute < hours.open.minutes_since_midnight() {
        closed(
            format!("Closed - Opens at {}", hours.open.to_12h_string()),
            Some(hours.open),
        )
    } else {
        closed(MESSAGE_CLOSED.to_string(), None)
    }
}

/// Shorthand for `evaluate_schedule(..).is_open`.
pub fn is_open(schedule: &WeeklySchedule, now: &NaiveDateTime) -> bool {
    evaluate_schedule(schedule, now).is_open
}

fn open_until(close: TimeOfDay) -> ScheduleStatus {
    ScheduleStatus {
        is_open: true,
        message: format!("Open until {}", close.to_12h_string()),
        boundary_time: Some(close),
    }
}

fn closed(message: String, reopens: Option<TimeOfDay>) -> ScheduleStatus {
    ScheduleStatus {
        is_open: false,
        message,
        boundary_time: reopens,
    }
}
