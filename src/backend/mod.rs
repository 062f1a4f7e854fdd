//! Key-value persistence backends.
//!
//! Provides the [`KvBackend`] trait (exact-key `get`/`set`/`delete`, no queries,
//! no transactions) and two implementations: [`memory::MemoryBackend`] for tests
//! and throwaway sessions, and [`sqlite::SqliteBackend`] for durable storage.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::BackendError;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// String-keyed, string-valued durable store.
///
/// Every call is an independent unit of I/O. Implementations must not hold
/// state across calls that would make two separate calls atomic.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Remove `key`. Deleting an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), BackendError>;
}
