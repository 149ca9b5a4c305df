use ::ics::{
    components::Property,
    escape_text,
    parameters::Value,
    properties::{Description, DtEnd, DtStart, Location, Summary},
    ICalendar,
};

use crate::render::event_key;
use crate::structs::{CalendarEvent, EventCollection};

pub const PRODUCT_ID: &str = "-//eventkalender//events//EN";
pub const CALENDAR_NAME: &str = "Eventkalender";

/// Renders the collection as an iCalendar document.
///
/// Events without a start date have no place on a calendar and are left out.
pub fn render(events: &EventCollection) -> String {
    let mut icalendar = ICalendar::new("2.0", PRODUCT_ID);
    icalendar.push(Property::new("X-WR-CALNAME", CALENDAR_NAME));

    for (position, event) in events.iter().enumerate() {
        match event.to_calendar_event() {
            Some(calendar_event) => {
                icalendar.add_event(to_ics(event_key(position, event), calendar_event));
            }
            None => tracing::debug!(event = event.name(), "skipping undated event"),
        }
    }

    icalendar.to_string()
}

fn to_ics(key: String, event: CalendarEvent<'_>) -> ::ics::Event<'_> {
    let start = event.start.format("%Y%m%d").to_string();
    let end = event.end.format("%Y%m%d").to_string();

    let id = format!("{key}@eventkalender");
    let stamp = format!("{start}T000000Z");

    let mut ics_event = ::ics::Event::new(id, stamp);

    let mut dtstart = DtStart::new(start);
    dtstart.add(Value::new("DATE"));
    ics_event.push(dtstart);

    let mut dtend = DtEnd::new(end);
    dtend.add(Value::new("DATE"));
    ics_event.push(dtend);

    ics_event.push(Summary::new(escape_text(event.title)));
    ics_event.push(Location::new(escape_text(event.location)));

    if let Some(description) = event.description {
        ics_event.push(Description::new(escape_text(description)));
    }

    ics_event
}
