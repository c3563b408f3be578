//! Grouping of events by calendar date.

use std::collections::HashMap;

use crate::types::CalendarEvent;

/// Events bucketed by their `date` string, input order kept per bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsByDate {
    buckets: HashMap<String, Vec<CalendarEvent>>,
}

impl EventsByDate {
    pub fn build(events: &[CalendarEvent]) -> Self {
        let mut buckets: HashMap<String, Vec<CalendarEvent>> = HashMap::new();
        for event in events {
            buckets
                .entry(event.date.clone())
                .or_default()
                .push(event.clone());
        }
        tracing::debug!(
            events = events.len(),
            dates = buckets.len(),
            "indexed events"
        );
        EventsByDate { buckets }
    }

    /// Events on `date`; empty when there are none.
    pub fn get(&self, date: &str) -> &[CalendarEvent] {
        self.buckets.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of dates with at least one event.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Populated dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        let mut dates: Vec<&str> = self.buckets.keys().map(String::as_str).collect();
        dates.sort_unstable();
        dates.into_iter()
    }
}

impl From<&[CalendarEvent]> for EventsByDate {
    fn from(events: &[CalendarEvent]) -> Self {
        EventsByDate::build(events)
    }
}
