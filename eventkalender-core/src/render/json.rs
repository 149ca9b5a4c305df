use crate::error::RenderError;
use crate::structs::EventCollection;

/// Renders the collection as a JSON array. Absent values are written as
/// `null`, never left out.
pub fn render(events: &EventCollection) -> Result<String, RenderError> {
    Ok(serde_json::to_string(events.events())?)
}
