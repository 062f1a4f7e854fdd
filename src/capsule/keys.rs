//! Backend key naming. These strings are the on-disk contract and must not change.

use super::types::CapsuleDate;

/// Prefix of per-day capsule records: `capsule-YYYY-MM-DD`.
pub const CAPSULE_PREFIX: &str = "capsule-";

/// Prefix of per-day quick-note lists: `notes_YYYY-MM-DD`.
pub const NOTES_PREFIX: &str = "notes_";

/// Dates with a non-empty capsule.
pub const CAPSULE_INDEX_KEY: &str = "marked-dates";

/// Dates with a non-empty quick-note list.
pub const NOTES_INDEX_KEY: &str = "dates_with_content";

pub fn capsule_key(date: CapsuleDate) -> String {
    format!("{CAPSULE_PREFIX}{date}")
}

pub fn notes_key(date: CapsuleDate) -> String {
    format!("{NOTES_PREFIX}{date}")
}
