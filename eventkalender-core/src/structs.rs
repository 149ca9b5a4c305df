use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

use crate::date;
use crate::error::EventError;

fn serialize_date<S: Serializer>(day: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match day {
        Some(day) => serializer.serialize_str(&date::format(*day)),
        None => serializer.serialize_none(),
    }
}

/// Raw field set an event is built from, as written by whoever maintains the
/// catalog. Dates are still text at this point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventFields {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub wiki_path: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub streaming: Option<String>,
}

/// A scheduled talk.
///
/// Dates are either valid calendar dates or absent, and when both are present
/// the end never lies before the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    name: String,
    location: String,
    #[serde(serialize_with = "serialize_date")]
    start_date: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_date")]
    end_date: Option<NaiveDate>,
    description: Option<String>,
    short_name: Option<String>,
    wiki_path: Option<String>,
    streaming: Option<String>,
}

/// Calendar-ready view of an [`Event`]: an all-day range with an exclusive
/// end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEvent<'a> {
    pub title: &'a str,
    pub location: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: Option<&'a str>,
}

impl Event {
    pub fn new(fields: EventFields) -> Result<Self, EventError> {
        let start_date = date::normalize(fields.start_date.as_deref());
        let end_date = date::normalize(fields.end_date.as_deref());
        check_order(start_date, end_date)?;

        Ok(Self {
            name: fields.name,
            location: fields.location,
            start_date,
            end_date,
            description: fields.description,
            short_name: fields.short_name,
            wiki_path: fields.wiki_path,
            streaming: fields.streaming,
        })
    }

    /// Replaces the start date and returns what was stored.
    ///
    /// Unparsable input stores an absent date. A start after the current end
    /// date is rejected and leaves the event untouched.
    pub fn set_start_date(&mut self, input: Option<&str>) -> Result<Option<NaiveDate>, EventError> {
        let start_date = date::normalize(input);
        check_order(start_date, self.end_date)?;
        self.start_date = start_date;
        Ok(start_date)
    }

    /// Replaces the end date and returns what was stored. Same rules as
    /// [`Event::set_start_date`].
    pub fn set_end_date(&mut self, input: Option<&str>) -> Result<Option<NaiveDate>, EventError> {
        let end_date = date::normalize(input);
        check_order(self.start_date, end_date)?;
        self.end_date = end_date;
        Ok(end_date)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn wiki_path(&self) -> Option<&str> {
        self.wiki_path.as_deref()
    }

    pub fn streaming(&self) -> Option<&str> {
        self.streaming.as_deref()
    }

    /// Converts the event into an all-day calendar range.
    ///
    /// Calendars treat the end bound as exclusive, so the last day of the
    /// event is moved one day forward. Without a start date the event cannot
    /// be placed and `None` is returned; without an end date it is taken as a
    /// single-day event. An event running through 9999-12-31 has no
    /// four-digit exclusive end and is also `None`.
    #[must_use]
    pub fn to_calendar_event(&self) -> Option<CalendarEvent<'_>> {
        let start = self.start_date?;
        let last_day = self.end_date.unwrap_or(start);
        let end = last_day
            .checked_add_days(Days::new(1))
            .filter(|end| end.year() <= 9999)?;

        Some(CalendarEvent {
            title: &self.name,
            location: &self.location,
            start,
            end,
            description: self.description.as_deref(),
        })
    }
}

fn check_order(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), EventError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(EventError::EndBeforeStart { start, end }),
        _ => Ok(()),
    }
}

/// Events in the order they were listed by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCollection {
    events: Vec<Event>,
}

impl EventCollection {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for EventCollection {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
