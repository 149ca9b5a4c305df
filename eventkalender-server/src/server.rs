use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use eventkalender_core::{parse_events, Format, LoadError, RenderError, Rendered};
use thiserror::Error;

use crate::cache::DocumentCache;

#[derive(Debug, Error)]
enum ServeError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub struct AppState {
    events: PathBuf,
    cache: Arc<DocumentCache>,
}

impl AppState {
    pub fn new(events: PathBuf, cache: Arc<DocumentCache>) -> Arc<Self> {
        Arc::new(Self { events, cache })
    }

    /// Returns the cached document for `format`, or reads the events file
    /// afresh and renders it. Every miss builds its own collection, so a
    /// file edited between requests never changes a render in flight.
    async fn document(&self, format: Format) -> Result<Arc<Rendered>, ServeError> {
        if let Some(rendered) = self.cache.get(format).await {
            return Ok(rendered);
        }

        let raw = tokio::fs::read_to_string(&self.events)
            .await
            .map_err(LoadError::from)?;
        let events = parse_events(raw)?;
        tracing::debug!(format = format.name(), count = events.len(), "rendering events");

        let rendered = events.render(format)?;
        Ok(self.cache.insert(format, rendered).await)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/events.ical",
            get(|State(state): State<Arc<AppState>>| handle_events(state, Format::Ics)),
        )
        .route(
            "/events.atom",
            get(|State(state): State<Arc<AppState>>| handle_events(state, Format::Atom)),
        )
        .route(
            "/events.txt",
            get(|State(state): State<Arc<AppState>>| handle_events(state, Format::Text)),
        )
        .route(
            "/events.json",
            get(|State(state): State<Arc<AppState>>| handle_events(state, Format::Json)),
        )
        .with_state(state)
}

async fn handle_events(state: Arc<AppState>, format: Format) -> Response {
    match state.document(format).await {
        Ok(rendered) => (
            [(header::CONTENT_TYPE, rendered.content_type)],
            rendered.body.clone(),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(format = format.name(), "failed to serve events: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render events").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;
    use tokio::time::Duration;
    use tower::ServiceExt;

    use super::*;
    use crate::cache::Config;

    const CATALOG: &str = r#"
        [[events]]
        name = "Camp"
        location = "Field"
        start_date = "2015-08-13"
        end_date = "2015-08-17"
        description = "https://example.org"
    "#;

    fn events_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn app(file: &NamedTempFile, enabled: bool) -> Router {
        let cache = DocumentCache::new(Config {
            enabled,
            ttl: Duration::from_secs(3600),
        });
        router(AppState::new(file.path().to_path_buf(), cache))
    }

    async fn get_path(app: Router, path: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn serves_every_format() {
        let file = events_file(CATALOG);

        for (path, content_type, needle) in [
            ("/events.ical", "text/calendar", "SUMMARY:Camp"),
            ("/events.atom", "application/atom+xml", "<title>Camp</title>"),
            ("/events.txt", "text/plain", "name: Camp"),
            ("/events.json", "application/json", r#""name":"Camp""#),
        ] {
            let (status, actual_type, body) = get_path(app(&file, false), path).await;

            assert_eq!(status, StatusCode::OK, "{path}");
            assert_eq!(actual_type.as_deref(), Some(content_type), "{path}");
            assert!(body.contains(needle), "{path}: {body}");
        }
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let file = events_file(CATALOG);
        let (status, _, _) = get_path(app(&file, false), "/events.html").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn broken_catalog_is_server_error() {
        let file = events_file("[[events]]\nname = \"Camp\"\n");
        let (status, _, body) = get_path(app(&file, false), "/events.json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Failed to render events");
    }

    #[tokio::test]
    async fn cached_document_survives_file_changes() {
        let mut file = events_file(CATALOG);
        let app = app(&file, true);

        let (_, _, first) = get_path(app.clone(), "/events.txt").await;

        file.as_file_mut().set_len(0).unwrap();
        let (status, _, second) = get_path(app, "/events.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn uncached_requests_reload_the_file() {
        let mut file = events_file(CATALOG);
        let app = app(&file, false);

        let (_, _, first) = get_path(app.clone(), "/events.txt").await;
        assert!(first.contains("name: Camp"));

        file.as_file_mut().set_len(0).unwrap();
        let (status, _, second) = get_path(app, "/events.txt").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(second, "");
    }
}
