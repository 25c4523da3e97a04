//! Tag-addressable store for rendered read responses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::sync::RwLock;
use tracing::debug;

/// Tag attached to every cached movie read
pub const MOVIES_TAG: &str = "movies";

/// Header marking a response served from the store
pub const CACHE_HIT_HEADER: &str = "x-output-cache";

/// Expired entries are swept on insert once the store holds this many
const SWEEP_THRESHOLD: usize = 1024;

/// Hard cap; while full of live entries, new responses are not stored
pub const MAX_ENTRIES: usize = 4096;

#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            response.headers_mut().insert(header::CONTENT_TYPE, content_type);
        }
        response
            .headers_mut()
            .insert(CACHE_HIT_HEADER, HeaderValue::from_static("hit"));
        response
    }
}

struct Entry {
    response: CachedResponse,
    tags: Vec<String>,
    expires_at: Instant,
}

#[derive(Clone)]
pub struct OutputCacheStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl OutputCacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        // Fast path: read lock
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if entry.expires_at > Instant::now() => return Some(entry.response.clone()),
                Some(_) => {}
            }
        }

        // Expired: drop it so the next read goes through
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.expires_at <= Instant::now()) {
            entries.remove(key);
        }
        None
    }

    pub async fn set(&self, key: impl Into<String>, tags: &[&str], response: CachedResponse) {
        let entry = Entry {
            response,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            expires_at: Instant::now() + self.ttl,
        };
        let key = key.into();

        let mut entries = self.entries.write().await;
        if entries.len() >= SWEEP_THRESHOLD {
            let now = Instant::now();
            let before = entries.len();
            entries.retain(|_, e| e.expires_at > now);
            debug!("Swept {} expired cached responses", before - entries.len());
        }
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(&key) {
            debug!("Output cache full; not storing {}", key);
            return;
        }
        entries.insert(key, entry);
    }

    /// Remove every entry carrying `tag`; returns how many were evicted
    pub async fn evict_by_tag(&self, tag: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| t == tag));
        let evicted = before - entries.len();
        debug!("Evicted {} cached responses tagged '{}'", evicted, tag);
        evicted
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
