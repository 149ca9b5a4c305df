use std::collections::HashMap;
use std::sync::Arc;

use eventkalender_core::{Format, Rendered};
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

pub struct Config {
    pub enabled: bool,
    pub ttl: Duration,
}

struct Entry {
    stored_at: Instant,
    rendered: Arc<Rendered>,
}

/// Rendered documents per output format.
///
/// An entry is served until its time-to-live has passed since it was stored.
/// After that `get` misses and the caller renders a fresh document, which
/// replaces the stale entry on insert.
pub struct DocumentCache {
    enabled: bool,
    ttl: Duration,
    entries: RwLock<HashMap<Format, Entry>>,
}

impl DocumentCache {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            enabled: config.enabled,
            ttl: config.ttl,
            entries: RwLock::default(),
        })
    }

    pub async fn insert(&self, format: Format, rendered: Rendered) -> Arc<Rendered> {
        let rendered = Arc::new(rendered);
        if !self.enabled {
            return rendered;
        }

        let entry = Entry {
            stored_at: Instant::now(),
            rendered: Arc::clone(&rendered),
        };
        self.entries.write().await.insert(format, entry);

        rendered
    }

    pub async fn get(&self, format: Format) -> Option<Arc<Rendered>> {
        if !self.enabled {
            return None;
        }

        let entries = self.entries.read().await;
        let entry = entries.get(&format)?;
        if entry.stored_at.elapsed() >= self.ttl {
            tracing::debug!(format = format.name(), "cached document expired");
            return None;
        }

        Some(Arc::clone(&entry.rendered))
    }
}
