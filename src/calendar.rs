//! Month grid layout plus month and year navigation.

use chrono::{Datelike, Months, NaiveDate};

use crate::events::EventsByDate;
use crate::types::{DATE_FORMAT, DayCell, GridCell, MonthGrid};

/// Check if a year is a leap year under Gregorian rules.
pub fn is_leap_year(year: i32) -> bool {
    // Divisible by 4, except centuries unless divisible by 400
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// First day of the month containing `reference`.
pub fn month_start(reference: NaiveDate) -> NaiveDate {
    reference.with_day(1).unwrap_or(reference)
}

/// Column of the first day of the reference month (Sunday = 0).
pub fn start_day(reference: NaiveDate) -> u32 {
    month_start(reference).weekday().num_days_from_sunday()
}

/// Format a date the way grid cells and event records key it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl<'a> MonthGrid<'a> {
    /// Build the grid for the month containing `reference`.
    ///
    /// Leading empty cells align day 1 with its weekday column. No
    /// trailing padding is added.
    pub fn new(reference: NaiveDate, events: &'a EventsByDate) -> Self {
        let year = reference.year();
        let month = reference.month();
        let days_in_month = days_in_month(year, month);
        let start_day = start_day(reference);

        let mut cells = Vec::with_capacity((start_day + days_in_month) as usize);

        // Empty cells before first day
        for _ in 0..start_day {
            cells.push(GridCell::Empty);
        }

        for date in month_start(reference).iter_days().take(days_in_month as usize) {
            let day = date.day();
            let date = format_date(date);
            let events = events.get(&date);
            cells.push(GridCell::Day(DayCell { day, date, events }));
        }

        tracing::debug!(
            year,
            month,
            start_day,
            days_in_month,
            cells = cells.len(),
            "built month grid"
        );

        MonthGrid {
            year,
            month,
            start_day,
            days_in_month,
            cells,
        }
    }

    /// Day cells only, in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell<'a>> {
        self.cells.iter().filter_map(GridCell::day)
    }
}

/// Navigation step applied to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    NextMonth,
    PrevMonth,
    NextYear,
    PrevYear,
    Today,
}

/// Produce a new reference date.
///
/// Month and year steps clamp the day of month to the last valid day of
/// the target month: Jan 31 + 1 month is Feb 28 (or 29), Feb 29 + 1 year
/// is Feb 28. A step outside chrono's date range keeps `reference`.
pub fn navigate(reference: NaiveDate, nav: Navigation, today: NaiveDate) -> NaiveDate {
    let next = match nav {
        Navigation::NextMonth => reference.checked_add_months(Months::new(1)),
        Navigation::PrevMonth => reference.checked_sub_months(Months::new(1)),
        Navigation::NextYear => reference.checked_add_months(Months::new(12)),
        Navigation::PrevYear => reference.checked_sub_months(Months::new(12)),
        Navigation::Today => Some(today),
    };
    next.unwrap_or_else(|| {
        tracing::warn!(%reference, ?nav, "navigation out of range, keeping current month");
        reference
    })
}
