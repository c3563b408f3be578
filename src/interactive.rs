//! Line-oriented interactive session.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;

use crate::calendar::Navigation;
use crate::formatter::render_view;
use crate::types::{CalendarEvent, ViewContext};
use crate::view::{Action, CalendarView};

const COMMANDS_HELP: &str = "\
Commands:
  n, next          next month
  p, prev          previous month
  N, next-year     next year
  P, prev-year     previous year
  t, today         back to the current month
  o DATE [N]       open the Nth event (default 1) on DATE (YYYY-MM-DD)
  x, close         close the event details
  b, backdrop      click outside the event details
  h, help          show this help
  q, quit          exit";

/// A parsed prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(Navigation),
    /// Open an event by date and 0-based position within that day.
    Open { date: String, index: usize },
    Close,
    Backdrop,
    Help,
    Quit,
    /// Empty input; just redraw.
    Redraw,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Redraw);
    };
    let command = match head {
        "n" | "next" => Command::Navigate(Navigation::NextMonth),
        "p" | "prev" => Command::Navigate(Navigation::PrevMonth),
        "N" | "next-year" => Command::Navigate(Navigation::NextYear),
        "P" | "prev-year" => Command::Navigate(Navigation::PrevYear),
        "t" | "today" => Command::Navigate(Navigation::Today),
        "x" | "close" => Command::Close,
        "b" | "backdrop" => Command::Backdrop,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        "o" | "open" => {
            let date = words
                .next()
                .ok_or_else(|| "usage: o DATE [N]".to_string())?
                .to_string();
            let index = match words.next() {
                Some(n) => n
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n >= 1)
                    .map(|n| n - 1)
                    .ok_or_else(|| format!("invalid event number: {}", n))?,
                None => 0,
            };
            Command::Open { date, index }
        }
        other => return Err(format!("unknown command: {} (type h for help)", other)),
    };
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {}", extra));
    }
    Ok(command)
}

/// Find the event a selector points at among the days on the current grid.
pub fn find_event(view: &CalendarView, date: &str, index: usize) -> Option<CalendarEvent> {
    let grid = view.grid();
    let day = grid.days().find(|day| day.date == date)?;
    day.events.get(index).cloned()
}

/// Run the prompt until `quit` or end of input, returning the final view.
///
/// `loader` is polled before each command; its events replace the
/// (initially empty) list once they arrive.
pub fn run_interactive<R: BufRead, W: Write>(
    ctx: &ViewContext,
    mut view: CalendarView,
    loader: Option<Receiver<Vec<CalendarEvent>>>,
    input: R,
    mut out: W,
) -> io::Result<CalendarView> {
    let mut loader = loader;
    let mut lines = input.lines();

    loop {
        let loaded = loader.as_ref().and_then(|rx| rx.try_recv().ok());
        if let Some(events) = loaded {
            view = view.apply(Action::EventsLoaded(events));
            loader = None;
        }

        for line in render_view(ctx, &view) {
            writeln!(out, "{}", line)?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };

        let action = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Redraw) => None,
            Ok(Command::Help) => {
                writeln!(out, "{}", COMMANDS_HELP)?;
                None
            }
            Ok(Command::Navigate(nav)) => Some(Action::Navigate(nav)),
            Ok(Command::Close) => Some(Action::ClickClose),
            Ok(Command::Backdrop) => Some(Action::ClickBackdrop),
            Ok(Command::Open { date, index }) => match find_event(&view, &date, index) {
                Some(event) => Some(Action::ClickEvent(event)),
                None => {
                    writeln!(out, "no event #{} on {}", index + 1, date)?;
                    None
                }
            },
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                None
            }
        };

        if let Some(action) = action {
            tracing::debug!(?action, "applying");
            view = view.apply(action);
        }
    }

    Ok(view)
}
