//! Content index: the set of dates that currently have content in one namespace.
//!
//! The whole set lives in a single backend record. Every mutation reads the
//! record, changes the in-memory set, and writes the whole record back. Two
//! concurrent marks for different dates can therefore lose one update; the
//! backend offers no locking and this is accepted.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::backend::KvBackend;
use crate::capsule::codec::{self, DecodedIndex};
use crate::capsule::types::CapsuleDate;
use crate::error::StoreError;

#[derive(Clone)]
pub struct ContentIndex {
    backend: Arc<dyn KvBackend>,
    key: &'static str,
}

impl ContentIndex {
    pub fn new(backend: Arc<dyn KvBackend>, key: &'static str) -> Self {
        Self { backend, key }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Read the index record. A missing or undecodable record reads as empty;
    /// the undecodable case is reported non-canonical so the next mark rewrites it.
    async fn load(&self) -> Result<DecodedIndex, StoreError> {
        let Some(raw) = self.backend.get(self.key).await? else {
            return Ok(DecodedIndex {
                dates: BTreeSet::new(),
                canonical: true,
            });
        };
        Ok(codec::decode_index(&raw).unwrap_or_else(|e| {
            tracing::warn!(key = self.key, error = %e, "content index unreadable, treating as empty");
            DecodedIndex::default()
        }))
    }

    /// Add or remove `date`. Returns whether a write was issued.
    ///
    /// Marking a present date present (or an absent date absent) writes
    /// nothing, unless the stored record needs rewriting into canonical form.
    pub async fn mark_date(&self, date: CapsuleDate, present: bool) -> Result<bool, StoreError> {
        let DecodedIndex {
            mut dates,
            canonical,
        } = self.load().await?;

        let changed = if present {
            dates.insert(date)
        } else {
            dates.remove(&date)
        };

        if !changed && canonical {
            return Ok(false);
        }

        self.backend.set(self.key, &codec::encode_index(&dates)).await?;
        tracing::debug!(key = self.key, date = %date, present, "content index updated");
        Ok(true)
    }

    pub async fn is_marked(&self, date: CapsuleDate) -> Result<bool, StoreError> {
        Ok(self.load().await?.dates.contains(&date))
    }

    pub async fn all_marked(&self) -> Result<BTreeSet<CapsuleDate>, StoreError> {
        Ok(self.load().await?.dates)
    }
}
