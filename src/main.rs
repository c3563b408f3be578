//! Event calendar CLI application.
//!
//! # Usage
//! ```ignore
//! evcal                        // Current month, events from ./events.json
//! evcal 2 2026                 // February 2026
//! evcal -e ~/events.json       // Events from another file
//! evcal -s 2026-10-18:2        // Details of the second event that day
//! evcal -i                     // Interactive prompt
//! ```

use evcal::args::{Args, get_display_date, parse_selector};
use evcal::error::{Error, Result};
use evcal::formatter::print_view;
use evcal::interactive::{find_event, run_interactive};
use evcal::logging::init_tracing;
use evcal::source::{load_events, source_for, spawn_loader};
use evcal::types::{DATE_FORMAT, ViewContext};
use evcal::view::{Action, CalendarView};

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("evcal: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let ctx = ViewContext::new(args)?;
    let selector = args.select.as_deref().map(parse_selector).transpose()?;
    // A selected event's month is shown unless a month was given explicitly
    let reference = match selector {
        Some((date, _)) if args.month_arg.is_none() => date,
        _ => get_display_date(args, ctx.today)?,
    };
    let source = source_for(&ctx.events_location);

    if args.interactive {
        let view = CalendarView::at(reference, ctx.today);
        let loader = spawn_loader(source);
        let stdin = std::io::stdin();
        run_interactive(&ctx, view, Some(loader), stdin.lock(), std::io::stdout()).map_err(
            |source| Error::Io {
                path: "<terminal>".to_string(),
                source,
            },
        )?;
        return Ok(());
    }

    let mut view = CalendarView::at(reference, ctx.today).with_events(load_events(&*source));

    if let Some((date, index)) = selector {
        let date = date.format(DATE_FORMAT).to_string();
        match find_event(&view, &date, index) {
            Some(event) => view = view.apply(Action::ClickEvent(event)),
            None => tracing::warn!(%date, n = index + 1, "no such event to select"),
        }
    }

    print_view(&ctx, &view);
    Ok(())
}
