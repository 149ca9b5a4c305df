use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::structs::{Event, EventCollection, EventFields};

#[derive(Deserialize)]
struct Catalog {
    #[serde(default)]
    events: Vec<EventFields>,
}

/// Builds a collection from a TOML catalog of `[[events]]` tables, keeping
/// the order in which they are listed.
///
/// Dates are given as `"YYYY-MM-DD"` strings. Unparsable dates load as
/// absent; a missing `name` or `location`, or an event ending before it
/// starts, fails the whole catalog.
pub fn parse_events<S: AsRef<str>>(s: S) -> Result<EventCollection, LoadError> {
    let catalog: Catalog = toml::from_str(s.as_ref())?;

    catalog
        .events
        .into_iter()
        .map(|fields| {
            let name = fields.name.clone();
            Event::new(fields).map_err(|source| LoadError::Event { name, source })
        })
        .collect()
}

pub fn load_events<P: AsRef<Path>>(path: P) -> Result<EventCollection, LoadError> {
    let path = path.as_ref();
    let events = parse_events(fs::read_to_string(path)?)?;
    tracing::debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(events)
}
