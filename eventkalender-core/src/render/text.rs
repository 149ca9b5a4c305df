use chrono::NaiveDate;

use crate::date;
use crate::structs::{Event, EventCollection};

/// Renders a plain listing: one block of `key: value` lines per event,
/// blocks separated by an empty line.
pub fn render(events: &EventCollection) -> String {
    events
        .iter()
        .map(block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn block(event: &Event) -> String {
    let show = |day: Option<NaiveDate>| day.map_or_else(|| "unknown".to_string(), date::format);

    let mut lines = vec![format!("name: {}", one_line(event.name()))];
    lines.extend(event.short_name().map(|short_name| format!("short_name: {}", one_line(short_name))));
    lines.push(format!("location: {}", one_line(event.location())));
    lines.push(format!("start_date: {}", show(event.start_date())));
    lines.push(format!("end_date: {}", show(event.end_date())));

    for (key, value) in [
        ("description", event.description()),
        ("wiki_path", event.wiki_path()),
        ("streaming", event.streaming()),
    ] {
        lines.extend(value.map(|value| format!("{key}: {}", one_line(value))));
    }

    lines.into_iter().map(|line| line + "\n").collect()
}

/// Joins the lines of a multi-line value with single spaces, so a value can
/// never end its block early.
fn one_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
