//! Short-lived storage bridging the OAuth redirect to the frontend's poll.
//!
//! Handlers only see the [`RoastStore`] trait, so the in-memory map can be
//! replaced by an external cache without touching the request flow.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
    time::{Duration, Instant},
};

use uuid::Uuid;

use crate::types::RoastRecord;

/// Narrow get/put interface over wherever roasts are kept.
///
/// Implementations must tolerate concurrent readers and writers; handlers share
/// one store through an `Arc<dyn RoastStore>`.
pub trait RoastStore: Send + Sync {
    /// Stores `record` under `id`, replacing any previous record with that id.
    fn put(&self, id: String, record: RoastRecord);

    /// Returns the record stored under `id`, leaving it in place.
    fn get(&self, id: &str) -> Option<RoastRecord>;
}

/// Fresh identifier for a stored roast.
pub fn new_roast_id() -> String {
    Uuid::new_v4().to_string()
}

struct Entry {
    record: RoastRecord,
    stored_at: Instant,
}

/// Process-local store. Without a TTL, records live until the process exits.
pub struct MemoryRoastStore {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Option<Duration>,
}

impl MemoryRoastStore {
    /// Creates an empty store.
    ///
    /// # Arguments
    ///
    /// * `ttl` - How long a record stays readable. `None` disables expiry.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use roastify::store::MemoryRoastStore;
    ///
    /// let store = MemoryRoastStore::new(Some(Duration::from_secs(600)));
    /// assert!(store.is_empty());
    /// ```
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of records held, expired ones included until the next write.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(entry.stored_at) < ttl,
            None => true,
        }
    }
}

impl Default for MemoryRoastStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RoastStore for MemoryRoastStore {
    fn put(&self, id: String, record: RoastRecord) {
        let now = Instant::now();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if self.ttl.is_some() {
            entries.retain(|_, entry| self.is_live(entry, now));
        }

        entries.insert(
            id,
            Entry {
                record,
                stored_at: now,
            },
        );
    }

    fn get(&self, id: &str) -> Option<RoastRecord> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(id)
            .filter(|entry| self.is_live(entry, Instant::now()))
            .map(|entry| entry.record.clone())
    }
}
