//! Command-line argument parsing using clap.
//!
//! Positional arguments follow the cal convention: `[month] [year]`

use chrono::{Datelike, NaiveDate};
use clap::{ArgAction, Parser, ValueHint};
use std::io::IsTerminal;

use crate::error::{Error, Result};
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, CellWidth, DATE_FORMAT, DEFAULT_EVENTS_LOCATION, ViewContext,
};

#[derive(Parser, Debug)]
#[command(name = "evcal")]
#[command(about = "Displays a month calendar with events", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Event source: path to a JSON file or an http(s) URL.
    #[arg(
        short = 'e',
        long = "events",
        env = "EVCAL_EVENTS",
        default_value = DEFAULT_EVENTS_LOCATION,
        value_name = "location",
        value_hint = ValueHint::AnyPath,
        help_heading = "Event options"
    )]
    pub events: String,

    /// Show the detail view of an event: DATE or DATE:N (Nth event that day).
    #[arg(
        short = 's',
        long = "select",
        value_name = "date[:n]",
        help_heading = "Event options"
    )]
    pub select: Option<String>,

    /// Run an interactive prompt instead of printing once.
    #[arg(short = 'i', long, help_heading = "Display options")]
    pub interactive: bool,

    /// Width of each day cell (or "auto" for terminal width).
    #[arg(
        short = 'w',
        long = "width",
        value_name = "width",
        help_heading = "Output options"
    )]
    pub width: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long, action = ArgAction::Count, help_heading = "Output options")]
    pub verbose: u8,

    /// Month (1-12 or name), or a four-digit year when given alone.
    #[arg(index = 1, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display a month calendar with events from a JSON resource.

Without any arguments, display the current month with events from ./events.json.

Examples:
  evcal                          Display current month
  evcal 2 2026                   Display February 2026
  evcal 2026                     Display the current month of 2026
  evcal -e ~/events.json march   Display March with events from a file
  evcal -e https://host/events.json
  evcal -s 2026-10-18:2          Show details of the second event on that day
  evcal -i                       Interactive mode (type h for commands)";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl ViewContext {
    pub fn new(args: &Args) -> Result<Self> {
        let today = get_today_date();

        let color = !args.no_color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        let cell_width = match args.width.as_deref() {
            Some("auto") | None => CellWidth::Auto,
            Some(s) => {
                let n = s
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidArgs(format!("Invalid width value: {}", s)))?;
                if n == 0 {
                    return Err(Error::InvalidArgs("Width must be positive".to_string()));
                }
                CellWidth::Fixed(n)
            }
        };

        Ok(ViewContext {
            today,
            color,
            cell_width,
            events_location: args.events.clone(),
        })
    }
}

/// Get today's date, respecting EVCAL_TEST_TIME environment variable for testing.
pub fn get_today_date() -> NaiveDate {
    if let Ok(test_time) = std::env::var("EVCAL_TEST_TIME")
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, DATE_FORMAT)
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

fn parse_year(s: &str) -> Result<i32> {
    let year = s
        .parse::<i32>()
        .map_err(|_| Error::InvalidArgs(format!("Invalid year: {}", s)))?;
    if !(1..=9999).contains(&year) {
        return Err(Error::InvalidArgs(format!(
            "Invalid year: {} (must be 1-9999)",
            year
        )));
    }
    Ok(year)
}

/// Calculate the reference date from positional arguments.
///
/// Argument patterns:
/// - none: today
/// - 1 arg: year (4 digits) or month (number or name)
/// - 2 args: month year
///
/// Today is kept as the reference when the requested month is the
/// current one; otherwise the 1st of the requested month is used.
pub fn get_display_date(args: &Args, today: NaiveDate) -> Result<NaiveDate> {
    let (year, month) = match (args.month_arg.as_deref(), args.year_arg.as_deref()) {
        (None, None) => return Ok(today),
        (Some(val), None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                (num, today.month())
            } else if let Some(month) = crate::formatter::parse_month(val) {
                (today.year(), month)
            } else {
                return Err(Error::InvalidArgs(format!("Invalid argument: {}", val)));
            }
        }
        (Some(month), Some(year)) => {
            let month = crate::formatter::parse_month(month)
                .ok_or_else(|| Error::InvalidArgs(format!("Invalid month: {}", month)))?;
            (parse_year(year)?, month)
        }
        (None, Some(_)) => {
            return Err(Error::InvalidArgs(
                "Invalid argument combination".to_string(),
            ));
        }
    };

    if year == today.year() && month == today.month() {
        return Ok(today);
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidArgs(format!("Invalid date: {}-{}", year, month)))
}

/// Parse a `DATE` or `DATE:N` selector into a date and a 0-based index.
pub fn parse_selector(s: &str) -> Result<(NaiveDate, usize)> {
    let (date, nth) = match s.split_once(':') {
        Some((date, nth)) => {
            let nth = nth
                .parse::<usize>()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| Error::InvalidArgs(format!("Invalid event number: {}", nth)))?;
            (date, nth)
        }
        None => (s, 1),
    };
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        Error::InvalidArgs(format!("Invalid date: {} (expected YYYY-MM-DD)", date))
    })?;
    Ok((date, nth - 1))
}
