use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::AppError;
use crate::session::SessionStore;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process session store. Expired entries are dropped on access and on
/// every write.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }
}

/// Returns the live value for `key`, removing the entry if it has expired.
fn take_live(entries: &mut HashMap<String, Entry>, key: &str, now: Instant) -> Option<String> {
    if entries.get(key)?.expires_at <= now {
        entries.remove(key);
        return None;
    }
    entries.get(key).map(|entry| entry.value.clone())
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        // Re-check under the write lock: a put may have refreshed the entry.
        let mut entries = self.entries.write().await;
        Ok(take_live(&mut entries, key, Instant::now()))
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), AppError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
