//! Output documents built from an [`EventCollection`].
//!
//! Every renderer is a plain function over a borrowed collection, so the same
//! collection can be rendered from several threads at once.

#[cfg(feature = "atom")]
pub mod atom;
#[cfg(feature = "ics")]
pub mod ics;
#[cfg(feature = "json")]
pub mod json;
pub mod text;

use crate::error::RenderError;
use crate::structs::{Event, EventCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Ics,
    Atom,
    Text,
    Json,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Ics, Format::Atom, Format::Text, Format::Json];

    pub fn content_type(self) -> &'static str {
        match self {
            Format::Ics => "text/calendar",
            Format::Atom => "application/atom+xml",
            Format::Text => "text/plain",
            Format::Json => "application/json",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Ics => "ics",
            Format::Atom => "atom",
            Format::Text => "text",
            Format::Json => "json",
        }
    }
}

/// Lowercase alphanumeric runs of `name` joined by `-`. Safe inside iCalendar
/// UIDs and URNs whatever the name contains.
pub(crate) fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Identifier of the event at `position` (zero-based) in its collection.
///
/// Name and dates may repeat across events, so the position keeps ids apart.
pub(crate) fn event_key(position: usize, event: &Event) -> String {
    let day = |date: Option<chrono::NaiveDate>| {
        date.map_or_else(|| "undated".to_string(), |date| date.format("%Y%m%d").to_string())
    };
    format!(
        "{}-{}-{}-{}",
        position + 1,
        slug(event.name()),
        day(event.start_date()),
        day(event.end_date())
    )
}

/// A finished document together with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

impl EventCollection {
    pub fn render(&self, format: Format) -> Result<Rendered, RenderError> {
        let body = match format {
            #[cfg(feature = "ics")]
            Format::Ics => ics::render(self),
            #[cfg(feature = "atom")]
            Format::Atom => atom::render(self)?,
            Format::Text => text::render(self),
            #[cfg(feature = "json")]
            Format::Json => json::render(self)?,
            #[allow(unreachable_patterns)]
            disabled => return Err(RenderError::Disabled(disabled.name())),
        };

        Ok(Rendered {
            content_type: format.content_type(),
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::structs::EventFields;

    pub(crate) fn camp() -> Event {
        Event::new(EventFields {
            name: "Camp".to_string(),
            location: "Field".to_string(),
            start_date: Some("2015-08-13".to_string()),
            end_date: Some("2015-08-17".to_string()),
            description: Some("https://example.org".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    pub(crate) fn named(name: &str, start_date: &str, end_date: &str) -> Event {
        Event::new(EventFields {
            name: name.to_string(),
            location: format!("{name} venue"),
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    pub(crate) fn abc() -> EventCollection {
        EventCollection::new(vec![
            named("Alpha", "2014-05-23", "2014-05-25"),
            named("Bravo", "2013-12-27", "2013-12-30"),
            named("Charlie", "2015-08-13", "2015-08-17"),
        ])
    }

    fn assert_in_order(body: &str, needles: &[&str]) {
        let positions = needles
            .iter()
            .map(|needle| body.find(needle).unwrap_or_else(|| panic!("{needle} missing")))
            .collect::<Vec<_>>();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{body}");
    }

    #[test]
    fn slug_collapses_punctuation() {
        assert_eq!(slug("  GPN 14 -- Karlsruhe! "), "gpn-14-karlsruhe");
        assert_eq!(slug("Evil\nBEGIN:VEVENT;x,y"), "evil-begin-vevent-x-y");
        assert_eq!(slug("!!!"), "");
    }

    #[test]
    fn event_keys_differ_for_repeated_events() {
        let first = named("Talk", "2015-08-13", "2015-08-13");
        let second = named("Talk", "2015-08-13", "2015-08-13");

        assert_eq!(event_key(0, &first), "1-talk-20150813-20150813");
        assert_eq!(event_key(1, &second), "2-talk-20150813-20150813");
    }

    #[test]
    fn content_types_match_formats() {
        let collection = EventCollection::new(vec![camp()]);

        for format in Format::ALL {
            let rendered = collection.render(format).unwrap();
            assert_eq!(rendered.content_type, format.content_type());
        }
    }

    #[test]
    fn every_format_preserves_collection_order() {
        let collection = abc();

        for format in Format::ALL {
            let rendered = collection.render(format).unwrap();
            assert_in_order(&rendered.body, &["Alpha", "Bravo", "Charlie"]);
        }
    }

    #[test]
    fn rendering_is_repeatable() {
        let collection = abc();

        for format in Format::ALL {
            assert_eq!(collection.render(format).unwrap(), collection.render(format).unwrap());
        }
    }

    #[test]
    fn rendering_leaves_collection_untouched() {
        let collection = abc();
        let before = collection.clone();

        for format in Format::ALL {
            collection.render(format).unwrap();
        }

        assert_eq!(collection, before);
    }
}
