// src/services/cache.rs
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct CachedResponse {
    body: String,
    stored_at: Instant,
}

/// Single-entry response cache with a fixed TTL.
///
/// Stores the serialized response body, so every read inside the TTL window
/// returns byte-identical output regardless of writes happening underneath.
#[derive(Debug)]
pub struct ResponseCache {
    entry: RwLock<Option<CachedResponse>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
        }
    }

    pub async fn get(&self) -> Option<String> {
        let entry = self.entry.read().await;
        match entry.as_ref() {
            Some(cached) if cached.stored_at.elapsed() <= self.ttl => {
                debug!("Response cache hit");
                Some(cached.body.clone())
            }
            _ => None,
        }
    }

    pub async fn put(&self, body: String) {
        let mut entry = self.entry.write().await;
        *entry = Some(CachedResponse {
            body,
            stored_at: Instant::now(),
        });
    }
}
