use anyhow::{Context, Result};
use chrono::Datelike;

use daycapsule::calendar::render_month;
use daycapsule::capsule::{CapsuleDate, DayCapsuleStore};

/// Parse `YYYY-MM`.
fn parse_month(s: &str) -> Result<(i32, u32)> {
    let (year, month) = s
        .split_once('-')
        .with_context(|| format!("invalid month {s:?} (expected YYYY-MM)"))?;
    let year: i32 = year.parse().with_context(|| format!("invalid year in {s:?}"))?;
    let month: u32 = month.parse().with_context(|| format!("invalid month in {s:?}"))?;
    Ok((year, month))
}

pub async fn calendar(store: &DayCapsuleStore, month: Option<&str>, today: CapsuleDate) -> Result<()> {
    let (year, month) = match month {
        Some(m) => parse_month(m)?,
        None => (today.naive().year(), today.naive().month()),
    };

    let capsules = store.capsule_dates().await;
    let notes = store.note_dates().await;

    let grid = render_month(year, month, &capsules, &notes)
        .with_context(|| format!("no such month: {year}-{month:02}"))?;
    print!("{grid}");
    Ok(())
}

pub async fn marked(store: &DayCapsuleStore, notes: bool) {
    let dates = if notes {
        store.note_dates().await
    } else {
        store.capsule_dates().await
    };
    for date in &dates {
        println!("{date}");
    }
    eprintln!("{} dates.", dates.len());
}
