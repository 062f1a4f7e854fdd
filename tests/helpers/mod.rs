#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use daycapsule::backend::{KvBackend, MemoryBackend, SqliteBackend};
use daycapsule::capsule::{CapsuleDate, DayCapsuleStore};
use daycapsule::error::BackendError;

pub fn date(s: &str) -> CapsuleDate {
    s.parse().unwrap()
}

/// Fresh store over an in-memory backend, plus the backend for raw inspection.
pub fn memory_store() -> (DayCapsuleStore, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    (DayCapsuleStore::new(backend.clone()), backend)
}

/// Fresh store over an in-memory SQLite database with schema and migrations applied.
pub fn sqlite_store() -> (DayCapsuleStore, SqliteBackend) {
    let conn = daycapsule::db::open_memory_database().unwrap();
    let backend = SqliteBackend::from_connection(conn);
    (DayCapsuleStore::new(Arc::new(backend.clone())), backend)
}

/// In-memory backend that can be told to fail, and counts writes per key.
#[derive(Default)]
pub struct FlakyBackend {
    inner: MemoryBackend,
    fail_all: AtomicBool,
    fail_writes_to: Mutex<HashSet<String>>,
    writes: Mutex<HashMap<String, usize>>,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails while set.
    pub fn fail_everything(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    /// `set` and `delete` on `key` fail; reads still work.
    pub fn fail_writes_to(&self, key: &str) {
        self.fail_writes_to.lock().unwrap().insert(key.to_string());
    }

    pub fn heal(&self) {
        self.fail_all.store(false, Ordering::SeqCst);
        self.fail_writes_to.lock().unwrap().clear();
    }

    /// Number of successful `set` calls on `key`.
    pub fn writes(&self, key: &str) -> usize {
        self.writes.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.unwrap()
    }

    fn check(&self, key: &str, write: bool) -> Result<(), BackendError> {
        if self.fail_all.load(Ordering::SeqCst)
            || (write && self.fail_writes_to.lock().unwrap().contains(key))
        {
            return Err(BackendError::Unavailable(format!("injected failure on {key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl KvBackend for FlakyBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.check(key, false)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.check(key, true)?;
        self.inner.set(key, value).await?;
        *self.writes.lock().unwrap().entry(key.to_string()).or_default() += 1;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        self.check(key, true)?;
        self.inner.delete(key).await
    }
}

pub fn flaky_store() -> (DayCapsuleStore, Arc<FlakyBackend>) {
    let backend = Arc::new(FlakyBackend::new());
    (DayCapsuleStore::new(backend.clone()), backend)
}
