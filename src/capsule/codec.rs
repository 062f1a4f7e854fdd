//! JSON encoding of capsule records, quick-note lists, and content indexes.
//!
//! Capsules are stored as `{"image": .., "text": .., "mood": ..}` with nulls
//! written out. Content indexes are canonically an ascending array of date
//! strings; the older object-map shape is still accepted on read.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capsule::types::{CapsuleDate, DayCapsule, Mood, QuickNote};
use crate::error::DecodeError;

#[derive(Serialize)]
struct CapsuleRecordOut<'a> {
    image: Option<&'a str>,
    text: &'a str,
    mood: Option<&'static str>,
}

#[derive(Deserialize)]
struct CapsuleRecordIn {
    image: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    mood: Option<String>,
}

pub fn encode_capsule(capsule: &DayCapsule) -> String {
    let record = CapsuleRecordOut {
        image: capsule.image_ref.as_deref().filter(|s| !s.is_empty()),
        text: &capsule.text,
        mood: capsule.mood.map(|m| m.glyph()),
    };
    // A struct of strings and options cannot fail to serialize.
    serde_json::to_string(&record).unwrap_or_default()
}

pub fn decode_capsule(raw: &str) -> Result<DayCapsule, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(DecodeError::RecordShape);
    }
    let record: CapsuleRecordIn = serde_json::from_value(value)?;
    let mood = match record.mood.as_deref() {
        None | Some("") => None,
        Some(glyph) => {
            Some(Mood::from_glyph(glyph).ok_or_else(|| DecodeError::UnknownMood(glyph.into()))?)
        }
    };
    Ok(DayCapsule {
        image_ref: record.image.filter(|s| !s.is_empty()),
        text: record.text.unwrap_or_default(),
        mood,
    })
}

pub fn encode_notes(notes: &[QuickNote]) -> String {
    serde_json::to_string(notes).unwrap_or_else(|_| "[]".into())
}

/// Decode a note list. Notes with blank text are dropped with a warning.
pub fn decode_notes(raw: &str) -> Result<Vec<QuickNote>, DecodeError> {
    let mut notes: Vec<QuickNote> = serde_json::from_str(raw)?;
    notes.retain(|note| {
        let keep = !note.text.trim().is_empty();
        if !keep {
            tracing::warn!(id = %note.id, "skipping quick note with blank text");
        }
        keep
    });
    Ok(notes)
}

/// A decoded content index plus whether it was already in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedIndex {
    pub dates: BTreeSet<CapsuleDate>,
    pub canonical: bool,
}

pub fn encode_index(dates: &BTreeSet<CapsuleDate>) -> String {
    let list: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
    serde_json::to_string(&list).unwrap_or_else(|_| "[]".into())
}

/// Decode either `["2024-03-01", ..]` or `{"2024-03-01": {..}, ..}`.
///
/// Entries that are not valid dates are skipped with a warning and mark the
/// record non-canonical so the next write cleans them out.
pub fn decode_index(raw: &str) -> Result<DecodedIndex, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let (candidates, mut canonical): (Vec<String>, bool) = match value {
        serde_json::Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            let mut clean = true;
            for item in items {
                match item {
                    serde_json::Value::String(s) => out.push(s),
                    other => {
                        tracing::warn!(entry = %other, "skipping non-string content index entry");
                        clean = false;
                    }
                }
            }
            (out, clean)
        }
        serde_json::Value::Object(map) => (map.into_iter().map(|(k, _)| k).collect(), false),
        _ => return Err(DecodeError::IndexShape),
    };

    let mut dates = BTreeSet::new();
    for raw_date in &candidates {
        match raw_date.parse::<CapsuleDate>() {
            Ok(d) => {
                if !dates.insert(d) {
                    canonical = false;
                }
            }
            Err(e) => {
                tracing::warn!(entry = %raw_date, error = %e, "skipping invalid date in content index");
                canonical = false;
            }
        }
    }

    // Canonical form is sorted ascending; anything else is rewritten on next write.
    if canonical {
        let sorted: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
        canonical = sorted == candidates;
    }

    Ok(DecodedIndex { dates, canonical })
}
