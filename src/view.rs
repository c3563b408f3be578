//! Calendar session state and its transitions.

use chrono::NaiveDate;

use crate::args::get_today_date;
use crate::calendar::{Navigation, navigate};
use crate::events::EventsByDate;
use crate::types::{CalendarEvent, MonthGrid};

/// Whether the detail view is showing an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    NoSelection,
    EventSelected(CalendarEvent),
}

/// User input and load completion, as seen by the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Navigation),
    ClickEvent(CalendarEvent),
    /// Click on the overlay around the detail view.
    ClickBackdrop,
    ClickClose,
    /// Click inside the detail view itself.
    ClickDialog,
    EventsLoaded(Vec<CalendarEvent>),
}

/// Current month, loaded events and selection.
///
/// `today` is the date highlighted in the grid. `Navigation::Today` reads
/// `clock` instead, so a long session jumps to the real current date.
#[derive(Debug, Clone)]
pub struct CalendarView {
    current_month: NaiveDate,
    today: NaiveDate,
    clock: fn() -> NaiveDate,
    events: Vec<CalendarEvent>,
    index: EventsByDate,
    selection: Selection,
}

impl CalendarView {
    /// Empty view showing the month of `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::at(today, today)
    }

    /// Empty view showing the month of `reference`.
    pub fn at(reference: NaiveDate, today: NaiveDate) -> Self {
        CalendarView {
            current_month: reference,
            today,
            clock: get_today_date,
            events: Vec::new(),
            index: EventsByDate::default(),
            selection: Selection::NoSelection,
        }
    }

    pub fn with_events(mut self, events: Vec<CalendarEvent>) -> Self {
        self.index = EventsByDate::build(&events);
        self.events = events;
        self
    }

    /// Replace the clock consulted by `Navigation::Today`.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn index(&self) -> &EventsByDate {
        &self.index
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        match &self.selection {
            Selection::EventSelected(event) => Some(event),
            Selection::NoSelection => None,
        }
    }

    pub fn grid(&self) -> MonthGrid<'_> {
        MonthGrid::new(self.current_month, &self.index)
    }

    /// Apply one action and return the resulting view.
    ///
    /// While an event is selected the grid sits under the overlay, so
    /// navigation and event clicks are ignored until it is dismissed.
    pub fn apply(self, action: Action) -> Self {
        let selected = self.selected_event().is_some();
        match action {
            Action::EventsLoaded(events) => self.with_events(events),
            Action::Navigate(nav) if !selected => {
                let now = match nav {
                    Navigation::Today => (self.clock)(),
                    _ => self.today,
                };
                CalendarView {
                    current_month: navigate(self.current_month, nav, now),
                    ..self
                }
            }
            Action::ClickEvent(event) if !selected => CalendarView {
                selection: Selection::EventSelected(event),
                ..self
            },
            Action::ClickBackdrop | Action::ClickClose if selected => CalendarView {
                selection: Selection::NoSelection,
                ..self
            },
            action => {
                tracing::trace!(selected, ?action, "action ignored in current state");
                self
            }
        }
    }
}
