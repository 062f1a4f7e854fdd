mod helpers;

use std::sync::Arc;
use std::time::Duration;

use daycapsule::capsule::autosave::Autosave;
use daycapsule::capsule::{DayCapsule, DayCapsuleStore, Mood, QuickNote};
use daycapsule::config::AutosaveConfig;
use helpers::{date, FlakyBackend};

const WINDOW: Duration = Duration::from_millis(100);

fn autosave() -> (Autosave, Arc<DayCapsuleStore>, Arc<FlakyBackend>) {
    let backend = Arc::new(FlakyBackend::new());
    let store = Arc::new(DayCapsuleStore::new(backend.clone()));
    let config = AutosaveConfig {
        debounce_ms: WINDOW.as_millis() as u64,
    };
    (Autosave::from_config(Arc::clone(&store), &config), store, backend)
}

#[tokio::test]
async fn typing_burst_becomes_one_write() {
    let (autosave, store, backend) = autosave();
    let d = date("2024-03-01");

    let mut text = String::new();
    for ch in "Hello".chars() {
        text.push(ch);
        autosave.edit_capsule(d, DayCapsule::new(None, text.clone(), None));
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(autosave.is_pending());
    assert_eq!(backend.writes("capsule-2024-03-01"), 0);

    tokio::time::sleep(WINDOW * 4).await;

    assert!(!autosave.is_pending());
    assert_eq!(backend.writes("capsule-2024-03-01"), 1);
    assert_eq!(store.get_capsule(d).await.text, "Hello");
    assert!(store.is_capsule_marked(d).await);
}

#[tokio::test]
async fn note_edits_do_not_cancel_capsule_edits() {
    let (autosave, store, _) = autosave();
    let d = date("2024-03-01");

    autosave.edit_capsule(d, DayCapsule::new(None, "", Some(Mood::Happy)));
    autosave.edit_notes(d, vec![QuickNote::new("1", "Buy milk")]);

    tokio::time::sleep(WINDOW * 4).await;

    assert_eq!(store.get_capsule(d).await.mood, Some(Mood::Happy));
    assert_eq!(store.get_notes(d).await.len(), 1);
}

#[tokio::test]
async fn discarded_edits_never_reach_the_store() {
    let (autosave, store, backend) = autosave();
    let d = date("2024-03-01");

    autosave.edit_capsule(d, DayCapsule::new(None, "draft", None));
    autosave.discard_pending();

    tokio::time::sleep(WINDOW * 3).await;

    assert_eq!(backend.writes("capsule-2024-03-01"), 0);
    assert!(store.get_capsule(d).await.is_empty());
}

#[tokio::test]
async fn edits_to_different_days_each_persist() {
    let (autosave, store, _) = autosave();
    let a = date("2024-03-01");
    let b = date("2024-03-02");

    autosave.edit_capsule(a, DayCapsule::new(None, "day A entry", None));
    autosave.edit_capsule(b, DayCapsule::new(None, "day B entry", None));
    autosave.edit_notes(a, vec![QuickNote::new("1", "A note")]);
    autosave.edit_notes(b, vec![QuickNote::new("2", "B note")]);

    tokio::time::sleep(WINDOW * 4).await;

    assert_eq!(store.get_capsule(a).await.text, "day A entry");
    assert_eq!(store.get_capsule(b).await.text, "day B entry");
    assert_eq!(store.get_notes(a).await, vec![QuickNote::new("1", "A note")]);
    assert_eq!(store.get_notes(b).await, vec![QuickNote::new("2", "B note")]);
}

#[tokio::test]
async fn same_day_burst_still_coalesces_alongside_other_days() {
    let (autosave, store, backend) = autosave();
    let a = date("2024-03-01");
    let b = date("2024-03-02");

    autosave.edit_capsule(a, DayCapsule::new(None, "A1", None));
    autosave.edit_capsule(b, DayCapsule::new(None, "B1", None));
    autosave.edit_capsule(a, DayCapsule::new(None, "A2", None));

    tokio::time::sleep(WINDOW * 4).await;

    assert_eq!(backend.writes("capsule-2024-03-01"), 1);
    assert_eq!(backend.writes("capsule-2024-03-02"), 1);
    assert_eq!(store.get_capsule(a).await.text, "A2");
}
