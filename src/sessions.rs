//! Per-session record stores.
//!
//! Each interactive session owns exactly one [`RecordStore`]. Handlers look the
//! store up by session id instead of sharing one global list.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::DEFAULT_SESSION_IDLE;
use crate::store::RecordStore;

#[derive(Debug)]
struct SessionEntry {
    store: RecordStore,
    last_touched: Instant,
}

/// Registry of live sessions. A session that goes untouched for longer than
/// the idle timeout ends as if it had been ended explicitly.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    stores: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    idle_timeout: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_SESSION_IDLE)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            stores: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Start a session with an empty store.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut stores = self.stores.lock().expect("session registry lock poisoned");
        self.evict_idle(&mut stores);
        stores.insert(
            id,
            SessionEntry {
                store: RecordStore::new(),
                last_touched: Instant::now(),
            },
        );
        tracing::debug!(session = %id, active = stores.len(), "Session started");
        id
    }

    /// Run `f` against the session's store. Returns `None` for unknown or
    /// expired sessions.
    pub fn with_store<R>(&self, id: Uuid, f: impl FnOnce(&mut RecordStore) -> R) -> Option<R> {
        let mut stores = self.stores.lock().expect("session registry lock poisoned");
        self.evict_idle(&mut stores);
        stores.get_mut(&id).map(|entry| {
            entry.last_touched = Instant::now();
            f(&mut entry.store)
        })
    }

    /// End a session, dropping its records. Returns false if it did not exist.
    pub fn end(&self, id: Uuid) -> bool {
        let mut stores = self.stores.lock().expect("session registry lock poisoned");
        let removed = stores.remove(&id).is_some();
        if removed {
            tracing::debug!(session = %id, active = stores.len(), "Session ended");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.stores.lock().expect("session registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_idle(&self, stores: &mut HashMap<Uuid, SessionEntry>) {
        let before = stores.len();
        stores.retain(|_, entry| entry.last_touched.elapsed() < self.idle_timeout);
        let evicted = before - stores.len();
        if evicted > 0 {
            tracing::debug!(evicted, active = stores.len(), "Idle sessions expired");
        }
    }
}
