pub mod date;
mod error;
pub mod render;
mod structs;

#[cfg(feature = "toml")]
mod parser;

pub use date::normalize;
pub use error::{EventError, LoadError, RenderError};
#[cfg(feature = "toml")]
pub use parser::{load_events, parse_events};
pub use render::{Format, Rendered};
pub use structs::{CalendarEvent, Event, EventCollection, EventFields};
