//! Month-view event calendar for the terminal.
//!
//! Features:
//! - Sunday-first month grid with per-day event lists
//! - Month and year navigation with month-end clamping
//! - Event details with time range and duration
//! - Events from a JSON file or an HTTP resource, empty on failure

pub mod args;
pub mod calendar;
pub mod error;
pub mod event;
pub mod events;
pub mod formatter;
pub mod interactive;
pub mod logging;
pub mod source;
pub mod types;
pub mod view;
