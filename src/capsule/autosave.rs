//! Debounced writes from continuous editing.
//!
//! The store writes immediately on every call; screens that save on each
//! keystroke go through [`Autosave`] instead, which holds back the write until
//! edits have been quiet for the window. Each date gets its own debouncer per
//! namespace, so an edit only ever replaces a pending save of the same record.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::capsule::store::DayCapsuleStore;
use crate::capsule::types::{CapsuleDate, DayCapsule, QuickNote};
use crate::config::AutosaveConfig;
use crate::debounce::Debouncer;

/// One debouncer per date, created on first edit and dropped once idle.
struct DatedDebouncers {
    window: Duration,
    slots: Mutex<HashMap<CapsuleDate, Debouncer>>,
}

impl DatedDebouncers {
    fn new(window: Duration) -> Self {
        Self {
            window,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn schedule<F>(&self, date: CapsuleDate, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slots = self.lock();
        slots.retain(|d, debouncer| *d == date || debouncer.is_pending());
        slots
            .entry(date)
            .or_insert_with(|| Debouncer::new(self.window))
            .schedule(job);
    }

    fn cancel(&self) {
        // Dropping a debouncer aborts its waiting job.
        self.lock().clear();
    }

    fn is_pending(&self) -> bool {
        self.lock().values().any(Debouncer::is_pending)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CapsuleDate, Debouncer>> {
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

pub struct Autosave {
    store: Arc<DayCapsuleStore>,
    capsules: DatedDebouncers,
    notes: DatedDebouncers,
}

impl Autosave {
    pub fn new(store: Arc<DayCapsuleStore>, window: Duration) -> Self {
        Self {
            store,
            capsules: DatedDebouncers::new(window),
            notes: DatedDebouncers::new(window),
        }
    }

    pub fn from_config(store: Arc<DayCapsuleStore>, config: &AutosaveConfig) -> Self {
        Self::new(store, config.window())
    }

    /// Queue a save of the full capsule for `date`. A later edit of the same
    /// date within the window replaces this one.
    pub fn edit_capsule(&self, date: CapsuleDate, capsule: DayCapsule) {
        let store = Arc::clone(&self.store);
        self.capsules.schedule(date, async move {
            store
                .put_capsule(date, capsule.image_ref, &capsule.text, capsule.mood)
                .await;
        });
    }

    /// Queue a save of the full note list for `date`.
    pub fn edit_notes(&self, date: CapsuleDate, notes: Vec<QuickNote>) {
        let store = Arc::clone(&self.store);
        self.notes.schedule(date, async move {
            store.put_notes(date, &notes).await;
        });
    }

    /// Drop any edits still waiting out the window.
    pub fn discard_pending(&self) {
        self.capsules.cancel();
        self.notes.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.capsules.is_pending() || self.notes.is_pending()
    }
}
