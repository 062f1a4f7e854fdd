use anyhow::Result;
use serde::Serialize;

use daycapsule::capsule::codec::{decode_capsule, decode_notes};
use daycapsule::capsule::keys::{CAPSULE_PREFIX, NOTES_PREFIX};
use daycapsule::capsule::QuickNote;
use daycapsule::config::CapsuleConfig;

#[derive(Debug, Serialize)]
struct ExportCapsule {
    date: String,
    image: Option<String>,
    text: String,
    mood: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportNotes {
    date: String,
    notes: Vec<QuickNote>,
}

/// Export format — every readable capsule and note list, oldest date first.
#[derive(Debug, Serialize)]
struct ExportData {
    capsules: Vec<ExportCapsule>,
    notes: Vec<ExportNotes>,
    /// Keys whose value could not be decoded and were left out.
    skipped: Vec<String>,
}

/// Export all capsules and note lists as JSON to stdout.
pub fn export(config: &CapsuleConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = daycapsule::db::open_database(&db_path)?;

    let mut stmt = conn.prepare("SELECT key, value FROM kv_store ORDER BY key")?;
    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut data = ExportData {
        capsules: Vec::new(),
        notes: Vec::new(),
        skipped: Vec::new(),
    };

    for (key, value) in rows {
        if let Some(date) = key.strip_prefix(CAPSULE_PREFIX) {
            match decode_capsule(&value) {
                Ok(c) => data.capsules.push(ExportCapsule {
                    date: date.to_string(),
                    image: c.image_ref,
                    text: c.text,
                    mood: c.mood.map(|m| m.glyph().to_string()),
                }),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "skipping unreadable capsule");
                    data.skipped.push(key.clone());
                }
            }
        } else if let Some(date) = key.strip_prefix(NOTES_PREFIX) {
            match decode_notes(&value) {
                Ok(notes) => data.notes.push(ExportNotes {
                    date: date.to_string(),
                    notes,
                }),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "skipping unreadable note list");
                    data.skipped.push(key.clone());
                }
            }
        }
    }

    let json = serde_json::to_string_pretty(&data)?;
    println!("{json}");

    eprintln!(
        "Exported {} capsules and {} note lists ({} skipped).",
        data.capsules.len(),
        data.notes.len(),
        data.skipped.len()
    );

    Ok(())
}
