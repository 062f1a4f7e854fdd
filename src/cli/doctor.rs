//! CLI `doctor` command — run database diagnostics and print a health report.

use anyhow::{Context, Result};

use daycapsule::config::CapsuleConfig;
use daycapsule::db;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &CapsuleConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("It is created on the first `daycapsule day set` or `notes add`.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

    let conn = db::open_database(&db_path).context("failed to open database (may be corrupt)")?;

    let report = db::check_database_health(&conn).context("failed to run health check")?;

    println!("Day Capsule Health Report");
    println!("=========================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!();
    println!("Records:");
    println!("  Capsules:        {}", report.capsule_count);
    println!("  Note lists:      {}", report.note_list_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
    }

    print_dates("Capsules missing from calendar index", &report.unindexed_capsules);
    print_dates("Calendar marks with no capsule", &report.stale_capsule_marks);
    print_dates("Note lists missing from notes index", &report.unindexed_notes);
    print_dates("Notes marks with no note list", &report.stale_note_marks);
    if !report.unreadable_indexes.is_empty() {
        println!();
        println!("Unreadable index records: {}", report.unreadable_indexes.join(", "));
    }

    let drift = report.unindexed_capsules.len()
        + report.stale_capsule_marks.len()
        + report.unindexed_notes.len()
        + report.stale_note_marks.len();
    if drift > 0 {
        println!();
        println!("Re-saving a day (`daycapsule day set <date>` with no changes) repairs its mark.");
    } else {
        println!("Content indexes:   consistent");
    }

    Ok(())
}

fn print_dates(label: &str, dates: &[String]) {
    if dates.is_empty() {
        return;
    }
    println!();
    println!("{label} ({}):", dates.len());
    for d in dates {
        println!("  {d}");
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
