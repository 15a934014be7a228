use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

/// Short-lived, keyed state that spans more than one request: the selection
/// handed from the details page to checkout, and open checkout sessions.
///
/// Entries expire after the store's TTL; expired entries are swept on insert.
pub struct SessionStore<T> {
    name: &'static str,
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, Entry<T>>>,
}

impl<T: Send + Sync> SessionStore<T> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, value: T) -> Uuid {
        let id = Uuid::new_v4();
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        if entries.len() < before {
            debug!("{} store swept {} expired entries", self.name, before - entries.len());
        }

        entries.insert(
            id,
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
        id
    }

    /// Remove and return an entry; a second `take` of the same id yields `None`.
    pub async fn take(&self, id: &Uuid) -> Option<T> {
        let entry = self.entries.write().await.remove(id)?;
        (entry.expires_at > Instant::now()).then_some(entry.value)
    }

    /// Put a taken entry back under its old id with a fresh expiry.
    pub async fn restore(&self, id: Uuid, value: T) {
        let expires_at = Instant::now() + self.ttl;
        self.entries
            .write()
            .await
            .insert(id, Entry { value, expires_at });
    }

    /// Mutate a live entry in place under the write lock. `None` if it is gone.
    pub async fn update<R>(&self, id: &Uuid, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(id) {
            Some(entry) if entry.expires_at > Instant::now() => Some(f(&mut entry.value)),
            _ => None,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_take_consumes_once() {
        let store = SessionStore::new("handoff", Duration::from_secs(60));
        let id = store.insert("draft".to_string()).await;

        assert_eq!(store.take(&id).await.as_deref(), Some("draft"));
        assert_eq!(store.take(&id).await, None);
    }

    #[tokio::test]
    async fn test_expired_entries_are_invisible_and_swept() {
        let store = SessionStore::new("checkout", Duration::ZERO);
        let id = store.insert(1u32).await;

        assert_eq!(store.update(&id, |v| *v = 2).await, None);
        assert_eq!(store.take(&id).await, None);

        store.insert(3u32).await;
        store.insert(4u32).await;
        assert_eq!(store.entries.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_mutates_live_entry() {
        let store = SessionStore::new("checkout", Duration::from_secs(60));
        let id = store.insert(1u32).await;
        assert_eq!(store.update(&id, |v| { *v += 1; *v }).await, Some(2));
        assert_eq!(store.take(&id).await, Some(2));
    }

    #[tokio::test]
    async fn test_taken_entry_is_invisible_until_restored() {
        let store = SessionStore::new("checkout", Duration::from_secs(60));
        let id = store.insert(5u32).await;

        let value = store.take(&id).await.unwrap();
        assert_eq!(store.take(&id).await, None);
        assert_eq!(store.update(&id, |v| *v = 6).await, None);

        store.restore(id, value).await;
        assert_eq!(store.update(&id, |v| *v).await, Some(5));
    }
}
