//! Day capsule records, quick-note lists, and their content indexes.

pub mod autosave;
pub mod codec;
pub mod index;
pub mod keys;
pub mod notes;
pub mod store;
pub mod types;

pub use store::{DayCapsuleStore, WriteOutcome};
pub use types::{CapsuleDate, DayCapsule, Mood, QuickNote};
