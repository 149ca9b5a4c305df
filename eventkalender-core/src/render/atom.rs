use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::Writer;

use crate::date;
use crate::error::RenderError;
use crate::render::event_key;
use crate::structs::{Event, EventCollection};

pub const FEED_ID: &str = "urn:eventkalender:events";
pub const FEED_TITLE: &str = "Eventkalender";
pub const FEED_AUTHOR: &str = "Eventkalender";

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Renders the collection as an Atom feed with one entry per event.
///
/// The feed's `updated` stamp is the latest start date in the collection, so
/// the same events always produce the same document.
pub fn render(events: &EventCollection) -> Result<String, RenderError> {
    let updated = events
        .iter()
        .filter_map(Event::start_date)
        .max()
        .map_or_else(|| "1970-01-01T00:00:00Z".to_string(), timestamp);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_feed(&mut writer, events, &updated)?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_feed<W: std::io::Write>(
    writer: &mut Writer<W>,
    events: &EventCollection,
    updated: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(XmlEvent::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut feed = BytesStart::new("feed");
    feed.push_attribute(("xmlns", ATOM_NAMESPACE));
    writer.write_event(XmlEvent::Start(feed))?;

    write_text_element(writer, "id", FEED_ID)?;
    write_text_element(writer, "title", FEED_TITLE)?;
    write_text_element(writer, "updated", updated)?;

    writer.write_event(XmlEvent::Start(BytesStart::new("author")))?;
    write_text_element(writer, "name", FEED_AUTHOR)?;
    writer.write_event(XmlEvent::End(BytesEnd::new("author")))?;

    for (position, event) in events.iter().enumerate() {
        write_entry(writer, &event_key(position, event), event, updated)?;
    }

    writer.write_event(XmlEvent::End(BytesEnd::new("feed")))?;
    Ok(())
}

fn write_entry<W: std::io::Write>(
    writer: &mut Writer<W>,
    key: &str,
    event: &Event,
    feed_updated: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(XmlEvent::Start(BytesStart::new("entry")))?;

    write_text_element(writer, "id", &format!("urn:eventkalender:{key}"))?;
    write_text_element(writer, "title", event.name())?;

    let updated = event.start_date().map(timestamp);
    write_text_element(writer, "updated", updated.as_deref().unwrap_or(feed_updated))?;

    if let Some(description) = event.description() {
        let mut link = BytesStart::new("link");
        link.push_attribute(("href", description));
        writer.write_event(XmlEvent::Empty(link))?;
    }

    write_text_element(writer, "summary", &summary(event))?;

    writer.write_event(XmlEvent::End(BytesEnd::new("entry")))?;
    Ok(())
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(XmlEvent::Start(BytesStart::new(name)))?;
    writer.write_event(XmlEvent::Text(BytesText::new(text)))?;
    writer.write_event(XmlEvent::End(BytesEnd::new(name)))?;
    Ok(())
}

fn timestamp(day: NaiveDate) -> String {
    format!("{}T00:00:00Z", date::format(day))
}

fn summary(event: &Event) -> String {
    let show = |day: Option<NaiveDate>| day.map_or_else(|| "unknown".to_string(), date::format);

    let mut lines = vec![
        format!("{} - {}", show(event.start_date()), show(event.end_date())),
        event.location().to_string(),
    ];
    lines.extend(event.description().map(str::to_string));
    lines.join("\n")
}
