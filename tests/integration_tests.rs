//! Integration tests for event sources, rendering and the interactive session.

use std::io::{Cursor, Write};
use std::sync::mpsc;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use evcal::error::{Error, Result};
use evcal::formatter::{format_event_detail, format_event_entry, format_month_grid, render_view};
use evcal::event::EventDetail;
use evcal::interactive::run_interactive;
use evcal::source::{EventSource, FileSource, load_events, source_for, spawn_loader};
use evcal::types::{CalendarEvent, CellWidth, ViewContext};
use evcal::view::CalendarView;

const EVENTS_JSON: &str = r##"[
  {"date":"2026-02-03","startTime":"09:00","endTime":"10:30","title":"Standup",
   "color":"#3b82f6","attendees":["Ann","Bo"],"description":"Daily sync"},
  {"date":"2026-02-03","startTime":"13:00","endTime":"14:00","title":"Review","color":"#10b981"},
  {"date":"2026-03-01","startTime":"08:00","endTime":"08:15","title":"Coffee","color":"#f59e0b"}
]"##;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_context() -> ViewContext {
    ViewContext {
        today: date(2026, 2, 18),
        color: false,
        cell_width: CellWidth::Fixed(12),
        events_location: "events.json".to_string(),
    }
}

fn events_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

struct FailingSource;

impl EventSource for FailingSource {
    fn describe(&self) -> String {
        "failing".to_string()
    }

    fn fetch(&self) -> Result<Vec<CalendarEvent>> {
        Err(Error::UnsupportedSource("always fails".to_string()))
    }
}

mod sources {
    use super::*;

    #[test]
    fn file_source_reads_events() {
        let file = events_file(EVENTS_JSON);
        let source = FileSource::new(file.path().to_str().unwrap());
        let events = source.fetch().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].title, "Standup");
        assert_eq!(load_events(&source).len(), 3);
    }

    #[test]
    fn missing_file_is_io_error_and_loads_empty() {
        let source = FileSource::new("/nonexistent/evcal/events.json");
        assert!(matches!(source.fetch(), Err(Error::Io { .. })));
        assert!(load_events(&source).is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let file = events_file("{ not an array");
        let source = FileSource::new(file.path().to_str().unwrap());
        assert!(matches!(source.fetch(), Err(Error::Json(_))));
        assert!(load_events(&source).is_empty());
    }

    #[test]
    fn failing_source_renders_empty_grid() {
        let events = load_events(&FailingSource);
        assert!(events.is_empty());

        let view = CalendarView::new(date(2026, 2, 18)).with_events(events);
        let grid = view.grid();
        assert_eq!(grid.days().count(), 28);
        assert!(grid.days().all(|d| d.events.is_empty()));
    }

    #[test]
    fn location_picks_source_kind() {
        assert_eq!(
            source_for("https://example.com/events.json").describe(),
            "https://example.com/events.json"
        );
        assert_eq!(source_for("/tmp/events.json").describe(), "/tmp/events.json");
    }

    #[test]
    fn tilde_is_expanded() {
        let source = FileSource::new("~/events.json");
        assert!(!source.describe().starts_with('~'));
    }

    #[test]
    fn background_loader_delivers_once() {
        let file = events_file(EVENTS_JSON);
        let rx = spawn_loader(source_for(file.path().to_str().unwrap()));
        let events = rx.recv().unwrap();
        assert_eq!(events.len(), 3);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn background_loader_failure_is_empty() {
        let rx = spawn_loader(Box::new(FailingSource));
        assert!(rx.recv().unwrap().is_empty());
    }
}

mod rendering {
    use super::*;

    fn february_view() -> CalendarView {
        let events = evcal::source::parse_events(EVENTS_JSON).unwrap();
        CalendarView::at(date(2026, 2, 10), date(2026, 2, 18)).with_events(events)
    }

    #[test]
    fn grid_has_header_weekdays_and_weeks() {
        let ctx = test_context();
        let view = february_view();
        let lines = format_month_grid(&ctx, &view.grid());

        assert_eq!(lines[0].trim(), "February 2026");
        assert_eq!(
            lines[1].split_whitespace().collect::<Vec<_>>(),
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        // Four week rows; the first week holds two event slots
        assert_eq!(lines.len(), 2 + 4 + 2);
        assert!(lines[2].starts_with(" 1"));
        assert!(lines[2].ends_with(" 7"));
    }

    #[test]
    fn events_are_placed_in_their_column() {
        let ctx = test_context();
        let view = february_view();
        let lines = format_month_grid(&ctx, &view.grid());

        // Tuesday is the third column: two blank cells of 12 plus separators
        let offset = 2 * 13;
        assert_eq!(&lines[3][offset..], "09:00 S… [2]");
        assert_eq!(&lines[4][offset..], "13:00 Review");
    }

    #[test]
    fn event_entry_truncates_and_badges() {
        let events = evcal::source::parse_events(EVENTS_JSON).unwrap();
        assert_eq!(format_event_entry(&events[0], 20), "09:00 Standup [2]   ");
        assert_eq!(format_event_entry(&events[0], 12), "09:00 S… [2]");
        assert_eq!(format_event_entry(&events[1], 10), "13:00 Rev…");
    }

    #[test]
    fn short_last_week_is_padded_for_display_only() {
        let ctx = test_context();
        let view = CalendarView::at(date(2026, 3, 10), date(2026, 2, 18));
        let grid = view.grid();
        assert_eq!(grid.cells.len(), 31);
        let lines = format_month_grid(&ctx, &grid);
        assert_eq!(lines.len(), 2 + 5);
        let last_week = &lines[lines.len() - 1];
        assert!(last_week.starts_with("29"));
        assert!(last_week.ends_with("31"));
    }

    #[test]
    fn detail_view_lines() {
        let ctx = test_context();
        let events = evcal::source::parse_events(EVENTS_JSON).unwrap();
        let lines = format_event_detail(&ctx, &EventDetail::from_event(&events[1]));
        assert_eq!(lines[0], "■ Review");
        assert_eq!(lines[1].trim(), "2026-02-03");
        assert_eq!(lines[2].trim(), "13:00 - 14:00");
        assert!(lines.iter().any(|l| l.contains("Duration") && l.ends_with("1h 0m")));
        assert!(lines.iter().any(|l| l.ends_with("No attendees listed")));
        assert!(lines.iter().any(|l| l.ends_with("No description provided.")));
    }

    #[test]
    fn render_view_appends_detail_when_selected() {
        let ctx = test_context();
        let view = february_view();
        let plain = render_view(&ctx, &view).len();

        let event = view.index().get("2026-02-03")[0].clone();
        let view = view.apply(evcal::view::Action::ClickEvent(event));
        let lines = render_view(&ctx, &view);
        assert!(lines.len() > plain);
        assert!(lines.iter().any(|l| l == "■ Standup"));
        assert!(lines.iter().any(|l| l.ends_with("Ann, Bo")));
    }

    #[test]
    fn color_highlights_today() {
        let ctx = ViewContext {
            color: true,
            ..test_context()
        };
        let view = february_view();
        let lines = format_month_grid(&ctx, &view.grid());
        assert!(lines.iter().any(|l| l.contains("\x1b[7m18")));
        assert!(lines.iter().any(|l| l.contains("\x1b[38;2;59;130;246m09:00")));
    }

    #[test]
    fn color_highlights_today_before_common_era() {
        let ctx = ViewContext {
            today: date(-1, 3, 5),
            color: true,
            ..test_context()
        };
        let view = CalendarView::at(date(-1, 3, 20), ctx.today);
        let lines = format_month_grid(&ctx, &view.grid());
        assert!(lines.iter().any(|l| l.contains("\x1b[7m 5")));
    }
}

mod interactive {
    use super::*;

    fn run(view: CalendarView, input: &str) -> (CalendarView, String) {
        let mut out = Vec::new();
        let view = run_interactive(&test_context(), view, None, Cursor::new(input), &mut out).unwrap();
        (view, String::from_utf8(out).unwrap())
    }

    #[test]
    fn navigates_and_quits() {
        let view = CalendarView::at(date(2026, 2, 10), date(2026, 2, 18));
        let (view, out) = run(view, "n\nn\np\nq\nn\n");
        assert_eq!(view.current_month(), date(2026, 3, 10));
        // Feb, Mar, Apr, Mar; quitting does not redraw
        assert_eq!(out.matches("March 2026").count(), 2);
        assert_eq!(out.matches("April 2026").count(), 1);
    }

    #[test]
    fn opens_and_closes_events() {
        let events = evcal::source::parse_events(EVENTS_JSON).unwrap();
        let view = CalendarView::at(date(2026, 2, 10), date(2026, 2, 18)).with_events(events);

        let (opened, out) = run(view.clone(), "o 2026-02-03 2\n");
        assert_eq!(opened.selected_event().map(|e| e.title.as_str()), Some("Review"));
        assert!(out.contains("13:00 - 14:00"));

        let (closed, _) = run(view, "o 2026-02-03\nx\n");
        assert!(closed.selected_event().is_none());
    }

    #[test]
    fn reports_bad_input() {
        let view = CalendarView::new(date(2026, 2, 18));
        let (_, out) = run(view, "jump\no 2026-02-03\n");
        assert!(out.contains("unknown command: jump"));
        assert!(out.contains("no event #1 on 2026-02-03"));
    }

    #[test]
    fn applies_loaded_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(evcal::source::parse_events(EVENTS_JSON).unwrap()).unwrap();

        let view = CalendarView::at(date(2026, 2, 10), date(2026, 2, 18));
        let mut out = Vec::new();
        let view = run_interactive(
            &test_context(),
            view,
            Some(rx),
            Cursor::new("n\no 2026-03-01\n"),
            &mut out,
        )
        .unwrap();
        assert_eq!(view.events().len(), 3);
        assert_eq!(view.selected_event().map(|e| e.title.as_str()), Some("Coffee"));
    }

    #[test]
    fn refuses_events_outside_the_shown_month() {
        let events = evcal::source::parse_events(EVENTS_JSON).unwrap();
        let view = CalendarView::at(date(2026, 2, 10), date(2026, 2, 18)).with_events(events);
        assert!(evcal::interactive::find_event(&view, "2026-03-01", 0).is_none());
        assert!(evcal::interactive::find_event(&view, "2026-02-03", 1).is_some());

        let (view, out) = run(view, "o 2026-03-01\n");
        assert!(view.selected_event().is_none());
        assert!(out.contains("no event #1 on 2026-03-01"));
        assert!(!out.contains("08:00 - 08:15"));
    }
}
