pub mod migrations;
pub mod schema;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::capsule::codec;
use crate::capsule::keys::{CAPSULE_INDEX_KEY, CAPSULE_PREFIX, NOTES_INDEX_KEY, NOTES_PREFIX};
use crate::capsule::types::CapsuleDate;

/// Milliseconds SQLite waits on a locked database before failing a call.
pub const BUSY_TIMEOUT_MS: u64 = 5000;

/// Open (or create) the capsule database at the given path with schema and
/// migrations applied.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.busy_timeout(std::time::Duration::from_millis(BUSY_TIMEOUT_MS))?;

    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Open an in-memory database with schema and migrations applied.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;
    Ok(conn)
}

/// Result of [`check_database_health`].
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub integrity_ok: bool,
    pub integrity_details: String,
    pub schema_version: u32,
    pub capsule_count: usize,
    pub note_list_count: usize,
    /// Capsule records whose date is missing from the capsule index.
    pub unindexed_capsules: Vec<String>,
    /// Capsule index entries with no record behind them.
    pub stale_capsule_marks: Vec<String>,
    pub unindexed_notes: Vec<String>,
    pub stale_note_marks: Vec<String>,
    /// Index keys whose value could not be decoded.
    pub unreadable_indexes: Vec<String>,
}

/// Run integrity checks and compare each content index with the records it
/// describes. This is the only place that scans record keys.
pub fn check_database_health(conn: &Connection) -> Result<HealthReport> {
    let integrity: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    let integrity_ok = integrity == "ok";

    let schema_version = migrations::get_schema_version(conn)?;

    let capsule_dates = record_dates(conn, CAPSULE_PREFIX)?;
    let note_dates = record_dates(conn, NOTES_PREFIX)?;

    let mut unreadable_indexes = Vec::new();
    let capsule_marks = index_dates(conn, CAPSULE_INDEX_KEY, &mut unreadable_indexes)?;
    let note_marks = index_dates(conn, NOTES_INDEX_KEY, &mut unreadable_indexes)?;

    let diff = |a: &BTreeSet<CapsuleDate>, b: &BTreeSet<CapsuleDate>| -> Vec<String> {
        a.difference(b).map(|d| d.to_string()).collect()
    };

    Ok(HealthReport {
        integrity_ok,
        integrity_details: integrity,
        schema_version,
        capsule_count: capsule_dates.len(),
        note_list_count: note_dates.len(),
        unindexed_capsules: diff(&capsule_dates, &capsule_marks),
        stale_capsule_marks: diff(&capsule_marks, &capsule_dates),
        unindexed_notes: diff(&note_dates, &note_marks),
        stale_note_marks: diff(&note_marks, &note_dates),
        unreadable_indexes,
    })
}

fn record_dates(conn: &Connection, prefix: &str) -> Result<BTreeSet<CapsuleDate>> {
    let mut stmt = conn.prepare("SELECT key FROM kv_store WHERE substr(key, 1, ?1) = ?2")?;
    let keys: Vec<String> = stmt
        .query_map(params![prefix.len() as i64, prefix], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(keys
        .iter()
        .filter_map(|k| k.strip_prefix(prefix))
        .filter_map(|d| d.parse().ok())
        .collect())
}

fn index_dates(
    conn: &Connection,
    key: &str,
    unreadable: &mut Vec<String>,
) -> Result<BTreeSet<CapsuleDate>> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()?;

    Ok(match raw.as_deref().map(codec::decode_index) {
        None => BTreeSet::new(),
        Some(Ok(decoded)) => decoded.dates,
        Some(Err(e)) => {
            tracing::warn!(key, error = %e, "content index unreadable");
            unreadable.push(key.to_string());
            BTreeSet::new()
        }
    })
}
