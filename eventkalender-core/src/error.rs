use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event ends on {end} before it starts on {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Failure while producing one output document. Only that render call fails.
#[derive(Debug, Error)]
pub enum RenderError {
    #[cfg(feature = "atom")]
    #[error("failed to write feed: {0}")]
    Xml(#[from] quick_xml::Error),
    #[cfg(feature = "json")]
    #[error("failed to serialize events: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("{0} output is not enabled in this build")]
    Disabled(&'static str),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read events file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "toml")]
    #[error("failed to parse events file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid event `{name}`: {source}")]
    Event {
        name: String,
        #[source]
        source: EventError,
    },
}
