mod helpers;

use std::sync::Arc;

use daycapsule::backend::{KvBackend, SqliteBackend};
use daycapsule::capsule::{DayCapsuleStore, Mood, QuickNote};
use daycapsule::db;
use helpers::date;
use rusqlite::params;
use tempfile::TempDir;

#[test]
fn open_creates_new_db_at_nonexistent_path() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("subdir").join("capsules.db");

    assert!(!db_path.exists());

    let conn = db::open_database(&db_path).unwrap();

    assert!(db_path.exists());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(
        db::migrations::get_schema_version(&conn).unwrap(),
        db::migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn busy_timeout_is_set() {
    let tmp = TempDir::new().unwrap();
    let conn = db::open_database(tmp.path().join("test.db")).unwrap();

    let timeout: i64 = conn
        .pragma_query_value(None, "busy_timeout", |row| row.get(0))
        .unwrap();
    assert_eq!(timeout, db::BUSY_TIMEOUT_MS as i64);
}

#[tokio::test]
async fn records_survive_reopen() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("capsules.db");
    let d = date("2024-03-01");

    {
        let store = DayCapsuleStore::new(Arc::new(SqliteBackend::open(&db_path).unwrap()));
        store.put_capsule(d, None, "Hello", Some(Mood::Neutral)).await;
        store.put_notes(d, &[QuickNote::new("1", "Buy milk")]).await;
    }

    let store = DayCapsuleStore::new(Arc::new(SqliteBackend::open(&db_path).unwrap()));
    assert_eq!(store.get_capsule(d).await.text, "Hello");
    assert_eq!(store.get_capsule(d).await.mood, Some(Mood::Neutral));
    assert_eq!(store.get_notes(d).await, vec![QuickNote::new("1", "Buy milk")]);
    assert!(store.is_capsule_marked(d).await);
    assert!(store.is_notes_marked(d).await);
}

#[test]
fn legacy_index_is_normalized_on_open() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("capsules.db");

    // A version-1 database written by an older build.
    {
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        db::schema::init_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ('marked-dates', ?1, 'then')",
            params![r##"{"2023-07-04":{"selected":true,"marked":true,"selectedColor":"#5cb85c"}}"##],
        )
        .unwrap();
    }

    let conn = db::open_database(&db_path).unwrap();
    let value: String = conn
        .query_row("SELECT value FROM kv_store WHERE key = 'marked-dates'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(value, r#"["2023-07-04"]"#);
}

#[tokio::test]
async fn health_report_finds_index_drift() {
    let (store, backend) = helpers::sqlite_store();
    store.put_capsule(date("2024-03-01"), None, "indexed", None).await;
    store.put_notes(date("2024-03-02"), &[QuickNote::new("1", "n")]).await;

    // A capsule written behind the index's back, and a mark with nothing behind it.
    backend
        .set("capsule-2024-03-05", r#"{"image":null,"text":"orphan","mood":null}"#)
        .await
        .unwrap();
    backend
        .set("dates_with_content", r#"["2024-03-02","2024-03-09"]"#)
        .await
        .unwrap();

    let conn = backend.connection();
    let conn = conn.lock().unwrap();
    let report = db::check_database_health(&conn).unwrap();

    assert!(report.integrity_ok);
    assert_eq!(report.capsule_count, 2);
    assert_eq!(report.note_list_count, 1);
    assert_eq!(report.unindexed_capsules, vec!["2024-03-05".to_string()]);
    assert!(report.stale_capsule_marks.is_empty());
    assert!(report.unindexed_notes.is_empty());
    assert_eq!(report.stale_note_marks, vec!["2024-03-09".to_string()]);
    assert!(report.unreadable_indexes.is_empty());
}
