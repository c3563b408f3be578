//! Display strings derived from an event's stored fields.

use chrono::{Duration, NaiveDateTime};

use crate::types::{CalendarEvent, DATE_TIME_FORMAT, NO_ATTENDEES, NO_DESCRIPTION};

/// `"{start} - {end}"`, taken verbatim from the event.
pub fn format_time_range(event: &CalendarEvent) -> String {
    format!("{} - {}", event.start_time, event.end_time)
}

fn parse_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), DATE_TIME_FORMAT).ok()
}

/// Length of the event, clamped at zero.
///
/// `None` when the date or either time does not parse.
pub fn event_duration(event: &CalendarEvent) -> Option<Duration> {
    let start = parse_instant(&event.date, &event.start_time)?;
    let end = parse_instant(&event.date, &event.end_time)?;
    Some((end - start).max(Duration::zero()))
}

/// `"{H}h {M}m"`, or `"{M}m"` under an hour.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_minutes().max(0);
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Duration label for display; empty when the times are malformed.
pub fn get_duration(event: &CalendarEvent) -> String {
    match event_duration(event) {
        Some(duration) => format_duration(duration),
        None => {
            tracing::debug!(
                date = %event.date,
                start = %event.start_time,
                end = %event.end_time,
                "duration unavailable"
            );
            String::new()
        }
    }
}

/// Hover summary: title and time, attendees, then description.
pub fn event_tooltip(event: &CalendarEvent) -> String {
    let attendees = if event.attendees.is_empty() {
        "None".to_string()
    } else {
        event.attendees.join(", ")
    };
    format!(
        "{} ({})\nAttendees: {}\n{}",
        event.title,
        format_time_range(event),
        attendees,
        event.description.as_deref().unwrap_or("")
    )
}

/// Everything the detail view shows for a selected event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub title: String,
    pub date: String,
    pub time_range: String,
    /// Empty when unavailable.
    pub duration: String,
    pub attendees: Vec<String>,
    pub description: Option<String>,
    pub color: String,
}

impl EventDetail {
    pub fn from_event(event: &CalendarEvent) -> Self {
        EventDetail {
            title: event.title.clone(),
            date: event.date.clone(),
            time_range: format_time_range(event),
            duration: get_duration(event),
            attendees: event.attendees.clone(),
            description: event.description.clone().filter(|d| !d.is_empty()),
            color: event.color.clone(),
        }
    }

    /// Attendee list, or the placeholder when nobody is listed.
    pub fn attendees_line(&self) -> String {
        if self.attendees.is_empty() {
            NO_ATTENDEES.to_string()
        } else {
            self.attendees.join(", ")
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}
