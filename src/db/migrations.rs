//! Forward-only schema migration framework.
//!
//! Tracks the schema version in `schema_meta` and runs sequential migrations
//! to bring the database up to [`CURRENT_SCHEMA_VERSION`].

use rusqlite::{params, Connection, OptionalExtension};

use crate::capsule::codec;
use crate::capsule::keys::CAPSULE_INDEX_KEY;

/// The schema version that the current binary expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Get the current schema version from the database.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'schema_version'",
        [],
        |row| {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().unwrap_or(0))
        },
    )
}

fn update_schema_version(conn: &Connection, version: u32) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE schema_meta SET value = ?1 WHERE key = 'schema_version'",
        [version.to_string()],
    )?;
    Ok(())
}

/// Run any pending forward-only migrations. Each migration runs in a transaction.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    let mut version = get_schema_version(conn)?;
    tracing::debug!(schema_version = version, target = CURRENT_SCHEMA_VERSION, "checking migrations");

    while version < CURRENT_SCHEMA_VERSION {
        let next = version + 1;
        tracing::info!(from = version, to = next, "running migration");

        let tx = conn.unchecked_transaction()?;
        match next {
            2 => migrate_v1_to_v2(&tx)?,
            _ => {
                tracing::error!(version = next, "unknown migration target");
                break;
            }
        }
        update_schema_version(&tx, next)?;
        tx.commit()?;

        version = next;
    }

    Ok(())
}

/// Migration v1 → v2: rewrite an object-map `marked-dates` record as the
/// canonical sorted array of dates.
fn migrate_v1_to_v2(conn: &Connection) -> rusqlite::Result<()> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![CAPSULE_INDEX_KEY],
            |row| row.get(0),
        )
        .optional()?;

    let Some(raw) = raw else {
        return Ok(());
    };

    match codec::decode_index(&raw) {
        Ok(decoded) if !decoded.canonical => {
            let now = chrono::Utc::now().to_rfc3339();
            conn.execute(
                "UPDATE kv_store SET value = ?1, updated_at = ?2 WHERE key = ?3",
                params![codec::encode_index(&decoded.dates), now, CAPSULE_INDEX_KEY],
            )?;
            tracing::info!(dates = decoded.dates.len(), "normalized capsule content index");
        }
        Ok(_) => {}
        Err(e) => {
            // Left in place; the store treats an unreadable index as empty and
            // overwrites it on the next mark.
            tracing::warn!(error = %e, "capsule content index unreadable, skipping normalization");
        }
    }
    Ok(())
}
