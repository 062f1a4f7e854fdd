mod helpers;

use daycapsule::backend::KvBackend;
use daycapsule::capsule::codec::{decode_capsule, decode_notes};
use daycapsule::capsule::{DayCapsule, Mood, QuickNote};
use daycapsule::error::StoreError;
use helpers::{date, flaky_store, memory_store};

#[test]
fn corrupted_capsule_strings_decode_to_errors() {
    let inputs = [
        "",
        "null",
        "{",
        "{\"image\":null,\"text\":\"x\",\"mood\":\"not a mood\"}",
        "{\"image\":[],\"text\":\"x\"}",
        "\u{0}\u{1}\u{2}",
        "[\"2024-03-01\"]",
    ];
    for input in inputs {
        assert!(decode_capsule(input).is_err(), "expected error for {input:?}");
    }
    assert!(decode_notes("{").is_err());
}

#[tokio::test]
async fn corrupted_records_read_as_empty() {
    let (store, backend) = memory_store();
    backend.set("capsule-2024-03-01", "{garbage").await.unwrap();
    backend.set("notes_2024-03-01", "[{\"id\":").await.unwrap();

    assert_eq!(store.get_capsule(date("2024-03-01")).await, DayCapsule::default());
    assert!(store.get_notes(date("2024-03-01")).await.is_empty());
}

#[tokio::test]
async fn corrupted_record_is_replaced_by_next_put() {
    let (store, backend) = memory_store();
    let d = date("2024-03-01");
    backend.set("capsule-2024-03-01", "{garbage").await.unwrap();

    store.put_capsule(d, None, "fresh", None).await;

    assert_eq!(store.get_capsule(d).await.text, "fresh");
}

#[tokio::test]
async fn backend_outage_is_a_no_op() {
    let (store, backend) = flaky_store();
    let d = date("2024-03-01");
    store.put_capsule(d, None, "before", Some(Mood::Happy)).await;
    store.put_notes(d, &[QuickNote::new("1", "kept")]).await;

    backend.fail_everything(true);
    store.put_capsule(d, None, "during outage", None).await;
    store.clear_capsule(d).await;
    store.put_notes(d, &[]).await;
    assert_eq!(store.get_capsule(d).await, DayCapsule::default());
    assert!(store.capsule_dates().await.is_empty());

    backend.heal();
    assert_eq!(
        store.get_capsule(d).await,
        DayCapsule::new(None, "before", Some(Mood::Happy))
    );
    assert!(store.is_capsule_marked(d).await);
    assert_eq!(store.get_notes(d).await, vec![QuickNote::new("1", "kept")]);
    assert!(store.is_notes_marked(d).await);
}

#[tokio::test]
async fn failed_record_write_does_not_touch_index() {
    let (store, backend) = flaky_store();
    let d = date("2024-03-01");
    backend.fail_writes_to("capsule-2024-03-01");

    let result = store
        .try_put_capsule(d, &DayCapsule::new(None, "lost", None))
        .await;

    assert!(matches!(result, Err(StoreError::Backend(_))));
    assert_eq!(backend.raw("marked-dates").await, None);
    assert!(!store.is_capsule_marked(d).await);
}

#[tokio::test]
async fn failed_index_write_leaves_record_unindexed_until_next_put() {
    let (store, backend) = flaky_store();
    let d = date("2024-03-01");
    backend.fail_writes_to("marked-dates");

    store.put_capsule(d, None, "written", None).await;

    // Record committed, mark did not.
    assert_eq!(store.get_capsule(d).await.text, "written");
    assert!(!store.is_capsule_marked(d).await);

    backend.heal();
    store.put_capsule(d, None, "written", None).await;
    assert!(store.is_capsule_marked(d).await);
}

#[tokio::test]
async fn repeated_marks_write_index_once() {
    let (store, backend) = flaky_store();
    let d = date("2024-03-01");

    store.put_capsule(d, None, "a", None).await;
    store.put_capsule(d, None, "ab", None).await;
    store.put_capsule(d, None, "abc", None).await;

    assert_eq!(backend.writes("capsule-2024-03-01"), 3);
    assert_eq!(backend.writes("marked-dates"), 1);
}
