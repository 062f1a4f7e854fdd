//! The day capsule store facade.
//!
//! [`DayCapsuleStore`] is the single entry point for reading and writing
//! capsules and quick-note lists. Each write is a whole-record replace (or a
//! delete when the record would be empty) followed by the matching content
//! index update. The index is only touched after the record write commits, so
//! a failure in between leaves a record unindexed until that date is written
//! again.
//!
//! The plain methods never fail: backend and decode errors are logged and
//! degrade to "no effect" / "no record". The `try_*` methods expose the same
//! operations with errors for callers that need to know.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::backend::KvBackend;
use crate::capsule::codec;
use crate::capsule::index::ContentIndex;
use crate::capsule::keys::{capsule_key, notes_key, CAPSULE_INDEX_KEY, NOTES_INDEX_KEY};
use crate::capsule::types::{CapsuleDate, DayCapsule, Mood, QuickNote};
use crate::error::StoreError;

/// Outcome of a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The record was written and the date marked.
    Saved,
    /// The record was empty, so it was deleted and the date unmarked.
    Deleted,
}

#[derive(Clone)]
pub struct DayCapsuleStore {
    backend: Arc<dyn KvBackend>,
    capsule_index: ContentIndex,
    notes_index: ContentIndex,
}

impl DayCapsuleStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            capsule_index: ContentIndex::new(Arc::clone(&backend), CAPSULE_INDEX_KEY),
            notes_index: ContentIndex::new(Arc::clone(&backend), NOTES_INDEX_KEY),
            backend,
        }
    }

    pub fn capsule_index(&self) -> &ContentIndex {
        &self.capsule_index
    }

    pub fn notes_index(&self) -> &ContentIndex {
        &self.notes_index
    }

    // ── Capsules ────────────────────────────────────────────────────

    /// The capsule for `date`, or an empty one if there is none or it is unreadable.
    pub async fn get_capsule(&self, date: CapsuleDate) -> DayCapsule {
        self.try_get_capsule(date).await.unwrap_or_else(|e| {
            tracing::warn!(date = %date, error = %e, "failed to load capsule");
            DayCapsule::default()
        })
    }

    /// Like [`get_capsule`](Self::get_capsule) but reports backend and decode
    /// failures. A missing record is `Ok` with an empty capsule.
    pub async fn try_get_capsule(&self, date: CapsuleDate) -> Result<DayCapsule, StoreError> {
        match self.backend.get(&capsule_key(date)).await? {
            Some(raw) => Ok(codec::decode_capsule(&raw)?),
            None => Ok(DayCapsule::default()),
        }
    }

    /// Save a day's capsule, deleting it instead if every field is empty.
    pub async fn put_capsule(
        &self,
        date: CapsuleDate,
        image_ref: Option<String>,
        text: &str,
        mood: Option<Mood>,
    ) {
        let capsule = DayCapsule::new(image_ref, text, mood);
        if let Err(e) = self.try_put_capsule(date, &capsule).await {
            tracing::error!(date = %date, error = %e, "failed to save capsule");
        }
    }

    pub async fn try_put_capsule(
        &self,
        date: CapsuleDate,
        capsule: &DayCapsule,
    ) -> Result<WriteOutcome, StoreError> {
        let key = capsule_key(date);

        if capsule.is_empty() {
            self.backend.delete(&key).await?;
            self.capsule_index.mark_date(date, false).await?;
            tracing::debug!(date = %date, "capsule empty, deleted");
            return Ok(WriteOutcome::Deleted);
        }

        self.backend.set(&key, &codec::encode_capsule(capsule)).await?;
        self.capsule_index.mark_date(date, true).await?;
        tracing::debug!(
            date = %date,
            has_image = capsule.image_ref.is_some(),
            text_len = capsule.text.len(),
            mood = ?capsule.mood,
            "capsule saved"
        );
        Ok(WriteOutcome::Saved)
    }

    /// Delete and unmark the capsule for `date`, whatever it held.
    pub async fn clear_capsule(&self, date: CapsuleDate) {
        self.put_capsule(date, None, "", None).await;
    }

    pub async fn try_clear_capsule(&self, date: CapsuleDate) -> Result<(), StoreError> {
        self.try_put_capsule(date, &DayCapsule::default()).await?;
        Ok(())
    }

    // ── Quick notes ─────────────────────────────────────────────────

    pub async fn get_notes(&self, date: CapsuleDate) -> Vec<QuickNote> {
        self.try_get_notes(date).await.unwrap_or_else(|e| {
            tracing::warn!(date = %date, error = %e, "failed to load notes");
            Vec::new()
        })
    }

    pub async fn try_get_notes(&self, date: CapsuleDate) -> Result<Vec<QuickNote>, StoreError> {
        match self.backend.get(&notes_key(date)).await? {
            Some(raw) => Ok(codec::decode_notes(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Save a day's notes in the order given, deleting the record if the list is empty.
    pub async fn put_notes(&self, date: CapsuleDate, notes: &[QuickNote]) {
        if let Err(e) = self.try_put_notes(date, notes).await {
            tracing::error!(date = %date, error = %e, "failed to save notes");
        }
    }

    pub async fn try_put_notes(
        &self,
        date: CapsuleDate,
        notes: &[QuickNote],
    ) -> Result<WriteOutcome, StoreError> {
        let key = notes_key(date);

        if notes.is_empty() {
            self.backend.delete(&key).await?;
            self.notes_index.mark_date(date, false).await?;
            return Ok(WriteOutcome::Deleted);
        }

        self.backend.set(&key, &codec::encode_notes(notes)).await?;
        self.notes_index.mark_date(date, true).await?;
        tracing::debug!(date = %date, count = notes.len(), "notes saved");
        Ok(WriteOutcome::Saved)
    }

    // ── Index queries ───────────────────────────────────────────────

    pub async fn is_capsule_marked(&self, date: CapsuleDate) -> bool {
        self.capsule_index.is_marked(date).await.unwrap_or_else(|e| {
            tracing::warn!(date = %date, error = %e, "failed to read capsule index");
            false
        })
    }

    pub async fn is_notes_marked(&self, date: CapsuleDate) -> bool {
        self.notes_index.is_marked(date).await.unwrap_or_else(|e| {
            tracing::warn!(date = %date, error = %e, "failed to read notes index");
            false
        })
    }

    /// Dates with a non-empty capsule, for calendar highlighting.
    pub async fn capsule_dates(&self) -> BTreeSet<CapsuleDate> {
        self.capsule_index.all_marked().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read capsule index");
            BTreeSet::new()
        })
    }

    /// Dates with a non-empty quick-note list.
    pub async fn note_dates(&self) -> BTreeSet<CapsuleDate> {
        self.notes_index.all_marked().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read notes index");
            BTreeSet::new()
        })
    }
}
