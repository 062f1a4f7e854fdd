//! In-memory editing of a day's quick-note list.
//!
//! These helpers mutate the caller's copy; persisting it is a separate
//! [`put_notes`](crate::capsule::store::DayCapsuleStore::put_notes) call.

use crate::capsule::types::QuickNote;

/// Prepend a note with `text` trimmed. Blank input is ignored.
///
/// The id is the current Unix time in milliseconds, bumped past any id already
/// in the list so that two notes added in the same millisecond stay distinct.
pub fn add_note<'a>(notes: &'a mut Vec<QuickNote>, text: &str) -> Option<&'a QuickNote> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut id = chrono::Utc::now().timestamp_millis();
    while notes.iter().any(|n| n.id == id.to_string()) {
        id += 1;
    }

    notes.insert(0, QuickNote::new(id.to_string(), text));
    notes.first()
}

/// Replace the text of the note with `id`. Returns false if the id is unknown
/// or the new text is blank, leaving the list untouched.
pub fn edit_note(notes: &mut [QuickNote], id: &str, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    match notes.iter_mut().find(|n| n.id == id) {
        Some(note) => {
            note.text = text.to_string();
            true
        }
        None => false,
    }
}

/// Remove the note with `id`. Returns false if there was none.
pub fn delete_note(notes: &mut Vec<QuickNote>, id: &str) -> bool {
    let before = notes.len();
    notes.retain(|n| n.id != id);
    notes.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_prepends_trimmed() {
        let mut notes = vec![QuickNote::new("1", "older")];
        let added = add_note(&mut notes, "  Buy milk \n").cloned().unwrap();

        assert_eq!(added.text, "Buy milk");
        assert_eq!(notes[0], added);
        assert_eq!(notes[1].text, "older");
    }

    #[test]
    fn add_ignores_blank() {
        let mut notes = Vec::new();
        assert!(add_note(&mut notes, "   ").is_none());
        assert!(notes.is_empty());
    }

    #[test]
    fn rapid_adds_get_distinct_ids() {
        let mut notes = Vec::new();
        for i in 0..5 {
            add_note(&mut notes, &format!("note {i}"));
        }
        let mut ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert_eq!(notes[0].text, "note 4");
    }

    #[test]
    fn edit_by_id() {
        let mut notes = vec![QuickNote::new("1", "a"), QuickNote::new("2", "b")];
        assert!(edit_note(&mut notes, "2", " B "));
        assert_eq!(notes[1].text, "B");
        assert!(!edit_note(&mut notes, "3", "c"));
        assert!(!edit_note(&mut notes, "1", "   "));
        assert_eq!(notes[0].text, "a");
    }

    #[test]
    fn delete_by_id() {
        let mut notes = vec![QuickNote::new("1", "a"), QuickNote::new("2", "b")];
        assert!(delete_note(&mut notes, "1"));
        assert!(!delete_note(&mut notes, "1"));
        assert_eq!(notes, vec![QuickNote::new("2", "b")]);
    }
}
