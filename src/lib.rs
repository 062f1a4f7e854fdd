//! Day capsule journal store — date-keyed diary entries, quick notes, and
//! calendar content markers over a plain key-value backend.
//!
//! Each calendar day can hold a **capsule** (photo reference, free text, mood)
//! and, independently, a list of **quick notes**. Both live in a string-keyed
//! store under date-derived keys, and each namespace keeps a **content index**
//! (the set of dates with something in them) that drives calendar highlighting.
//!
//! | Record | Key | Value |
//! |--------|-----|-------|
//! | Capsule | `capsule-YYYY-MM-DD` | `{"image", "text", "mood"}` |
//! | Quick notes | `notes_YYYY-MM-DD` | `[{"id", "text"}, ..]` |
//! | Capsule index | `marked-dates` | `["YYYY-MM-DD", ..]` |
//! | Notes index | `dates_with_content` | `["YYYY-MM-DD", ..]` |
//!
//! Empty records are never stored: writing an empty capsule or note list
//! deletes the record and unmarks the date.
//!
//! # Modules
//!
//! - [`backend`] — The [`KvBackend`](backend::KvBackend) trait with in-memory and SQLite implementations
//! - [`capsule`] — Record types, codec, content index, and the [`DayCapsuleStore`](capsule::DayCapsuleStore) facade
//! - [`debounce`] — Cancel-and-restart delay used for autosave
//! - [`insight`] — AI-generated daily insight from quick notes
//! - [`calendar`] — Text month view with content markers
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite initialization, schema, migrations, and health checks
//! - [`error`] — Error types for decoding, backends, capabilities, and insights
//! - [`image`] — Resolving local photo paths into stored image references

pub mod backend;
pub mod calendar;
pub mod capsule;
pub mod config;
pub mod db;
pub mod debounce;
pub mod error;
pub mod image;
pub mod insight;
