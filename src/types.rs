//! Type definitions and constants for the event calendar.

use serde::Deserialize;

/// A single calendar event as supplied by the event source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time of day, `HH:mm`.
    pub start_time: String,
    /// End time of day, `HH:mm`.
    pub end_time: String,
    pub title: String,
    /// Display color token (`#rgb` or `#rrggbb` is rendered in color).
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A day cell in the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    /// Day of month, starting at 1.
    pub day: u32,
    /// Full date string, `YYYY-MM-DD`.
    pub date: String,
    /// Events on this date in source order.
    pub events: &'a [CalendarEvent],
}

/// One square of the month view.
#[derive(Debug, Clone, PartialEq)]
pub enum GridCell<'a> {
    /// Leading padding before the first day of the month.
    Empty,
    Day(DayCell<'a>),
}

impl<'a> GridCell<'a> {
    pub fn day(&self) -> Option<&DayCell<'a>> {
        match self {
            GridCell::Empty => None,
            GridCell::Day(cell) => Some(cell),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GridCell::Empty)
    }
}

/// Grid data for a single month.
#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub year: i32,
    pub month: u32,
    /// Weekday of the 1st, 0 = Sunday .. 6 = Saturday.
    pub start_day: u32,
    pub days_in_month: u32,
    pub cells: Vec<GridCell<'a>>,
}

/// Cell width mode for the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellWidth {
    /// Fixed number of terminal columns per cell.
    Fixed(usize),
    /// Derive from terminal width.
    Auto,
}

/// Rendering and session options.
#[derive(Clone, Debug)]
pub struct ViewContext {
    /// Today's date for highlighting and the "today" navigation.
    pub today: chrono::NaiveDate,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    pub cell_width: CellWidth,
    /// Where events are read from (path or http(s) URL).
    pub events_location: String,
}

pub const DAYS_PER_WEEK: usize = 7;
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const DEFAULT_EVENTS_LOCATION: &str = "events.json";

pub const CELL_WIDTH_MIN: usize = 10;
pub const CELL_WIDTH_MAX: usize = 24;
pub const CELL_WIDTH_FALLBACK: usize = 14;

pub const NO_ATTENDEES: &str = "No attendees listed";
pub const NO_DESCRIPTION: &str = "No description provided.";

pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_BOLD: &str = "\x1b[1m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
