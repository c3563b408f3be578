//! Terminal rendering of the month grid and the event detail view.

use chrono::NaiveDate;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::event::EventDetail;
use crate::types::{
    CELL_WIDTH_FALLBACK, CELL_WIDTH_MAX, CELL_WIDTH_MIN, COLOR_BOLD, COLOR_DIM, COLOR_RESET,
    COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, CalendarEvent, CellWidth, DATE_FORMAT,
    DAYS_PER_WEEK, GridCell, MonthGrid, ViewContext,
};
use crate::view::CalendarView;

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// English month name.
pub fn get_month_name(month: u32) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|date| date.format("%B").to_string())
        .unwrap_or_default()
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_lowercase();
    (1..=12).find(|&month| {
        let name = get_month_name(month).to_lowercase();
        name == s_lower || (s_lower.len() == 3 && name.starts_with(&s_lower))
    })
}

/// Center text within a specified width, accounting for Unicode character widths.
pub fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Cut text to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Left-align text in exactly `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let cut = truncate_to_width(text, width);
    let padding = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(padding))
}

/// Parse a `#rgb` or `#rrggbb` color token.
pub fn parse_color(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&format!("{c}{c}")));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Wrap text in a 24-bit foreground color, if the token parses.
fn paint(text: &str, token: &str) -> String {
    match parse_color(token) {
        Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m{}{}", r, g, b, text, COLOR_RESET),
        None => text.to_string(),
    }
}

/// Columns per cell for this context.
pub fn resolve_cell_width(ctx: &ViewContext) -> usize {
    match ctx.cell_width {
        CellWidth::Fixed(n) => n.max(CELL_WIDTH_MIN),
        CellWidth::Auto => match get_terminal_width() {
            // Seven cells with one column between them
            Some(width) => (width.saturating_sub(DAYS_PER_WEEK - 1) / DAYS_PER_WEEK)
                .clamp(CELL_WIDTH_MIN, CELL_WIDTH_MAX),
            None => CELL_WIDTH_FALLBACK,
        },
    }
}

/// Total width of a grid line for a given cell width.
pub fn grid_width(cell_width: usize) -> usize {
    cell_width * DAYS_PER_WEEK + (DAYS_PER_WEEK - 1)
}

/// Format the `"{Month} {YYYY}"` header with optional color.
pub fn format_month_header(year: i32, month: u32, width: usize, color: bool) -> String {
    let header = format!("{} {}", get_month_name(month), year);
    let centered = center_text(&header, width);
    if color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Weekday header row, Sunday first.
pub fn format_weekday_headers(cell_width: usize, color: bool) -> String {
    let names: Vec<String> = WEEKDAY_NAMES
        .iter()
        .map(|name| center_text(name, cell_width))
        .collect();
    let row = names.join(" ");
    if color {
        format!("{}{}{}", COLOR_SAND_YELLOW, row, COLOR_RESET)
    } else {
        row
    }
}

/// One event inside a day cell: start time, title and attendee badge.
pub fn format_event_entry(event: &CalendarEvent, width: usize) -> String {
    let badge = if event.attendees.is_empty() {
        String::new()
    } else {
        format!(" [{}]", event.attendees.len())
    };
    let label = format!("{} {}", event.start_time, event.title);
    let label_width = width.saturating_sub(badge.width());
    if label_width == 0 {
        return pad_to_width(&label, width);
    }
    let label = truncate_to_width(&label, label_width);
    pad_to_width(&format!("{}{}", label, badge), width)
}

/// Format month as grid of lines.
///
/// The last week is padded to a full row here; the grid data itself
/// carries no trailing cells.
pub fn format_month_grid(ctx: &ViewContext, grid: &MonthGrid) -> Vec<String> {
    let width = resolve_cell_width(ctx);
    let blank = " ".repeat(width);
    let empty = GridCell::Empty;
    let mut lines = Vec::with_capacity(16);

    lines.push(format_month_header(
        grid.year,
        grid.month,
        grid_width(width),
        ctx.color,
    ));
    lines.push(format_weekday_headers(width, ctx.color));

    for week in grid.cells.chunks(DAYS_PER_WEEK) {
        let mut row: Vec<&GridCell> = week.iter().collect();
        while row.len() < DAYS_PER_WEEK {
            row.push(&empty);
        }

        let day_line: Vec<String> = row
            .iter()
            .map(|cell| match cell.day() {
                None => blank.clone(),
                Some(day) => {
                    let number = pad_to_width(&format!("{:>2}", day.day), width);
                    let is_today = NaiveDate::parse_from_str(&day.date, DATE_FORMAT)
                        .is_ok_and(|date| date == ctx.today);
                    if ctx.color && is_today {
                        format!("{}{}{}", COLOR_REVERSE, number, COLOR_RESET)
                    } else if ctx.color {
                        format!("{}{}{}", COLOR_BOLD, number, COLOR_RESET)
                    } else {
                        number
                    }
                }
            })
            .collect();
        lines.push(day_line.join(" ").trim_end().to_string());

        let slots = row
            .iter()
            .filter_map(|cell| cell.day())
            .map(|day| day.events.len())
            .max()
            .unwrap_or(0);

        for slot in 0..slots {
            let slot_line: Vec<String> = row
                .iter()
                .map(|cell| {
                    match cell.day().and_then(|day| day.events.get(slot)) {
                        Some(event) => {
                            let entry = format_event_entry(event, width);
                            if ctx.color {
                                paint(&entry, &event.color)
                            } else {
                                entry
                            }
                        }
                        None => blank.clone(),
                    }
                })
                .collect();
            lines.push(slot_line.join(" ").trim_end().to_string());
        }
    }

    lines
}

/// Format the detail view of a selected event.
pub fn format_event_detail(ctx: &ViewContext, detail: &EventDetail) -> Vec<String> {
    let swatch = if ctx.color {
        paint("■", &detail.color)
    } else {
        "■".to_string()
    };
    let title = if ctx.color {
        format!("{}{}{}", COLOR_BOLD, detail.title, COLOR_RESET)
    } else {
        detail.title.clone()
    };
    let label = |name: &str| {
        let padded = format!("{:<12}", name);
        if ctx.color {
            format!("{}{}{}", COLOR_DIM, padded, COLOR_RESET)
        } else {
            padded
        }
    };

    vec![
        format!("{} {}", swatch, title),
        format!("  {}", detail.date),
        format!("  {}", detail.time_range),
        String::new(),
        format!("  {}{}", label("Duration"), detail.duration),
        format!("  {}{}", label("Attendees"), detail.attendees_line()),
        format!("  {}{}", label("Description"), detail.description_text()),
    ]
}

/// Everything currently on screen: the grid, and the detail view when an
/// event is selected.
pub fn render_view(ctx: &ViewContext, view: &CalendarView) -> Vec<String> {
    let grid = view.grid();
    let mut lines = format_month_grid(ctx, &grid);
    if let Some(event) = view.selected_event() {
        lines.push(String::new());
        lines.extend(format_event_detail(ctx, &EventDetail::from_event(event)));
    }
    lines
}

pub fn print_view(ctx: &ViewContext, view: &CalendarView) {
    for line in render_view(ctx, view) {
        println!("{}", line);
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}
