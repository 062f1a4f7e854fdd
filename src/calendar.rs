//! Text month view with content markers.
//!
//! Days with a capsule get `*`, days with quick notes get `+`, days with both
//! get `#`. Weeks start on Monday.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::capsule::CapsuleDate;

const WEEKDAY_HEADER: &str = "Mo  Tu  We  Th  Fr  Sa  Su";

pub fn marker(has_capsule: bool, has_notes: bool) -> char {
    match (has_capsule, has_notes) {
        (true, true) => '#',
        (true, false) => '*',
        (false, true) => '+',
        (false, false) => ' ',
    }
}

/// Render one month. Returns `None` for an invalid year/month.
pub fn render_month(
    year: i32,
    month: u32,
    capsules: &BTreeSet<CapsuleDate>,
    notes: &BTreeSet<CapsuleDate>,
) -> Option<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_monday() as usize;

    let mut out = String::new();
    out.push_str(&format!("{}\n", first.format("%B %Y")));
    out.push_str(WEEKDAY_HEADER);
    out.push('\n');

    let mut cells: Vec<String> = vec!["   ".to_string(); offset];
    let mut day = first;
    while day.month() == month {
        let date = CapsuleDate::new(day);
        let mark = marker(capsules.contains(&date), notes.contains(&date));
        cells.push(format!("{:>2}{}", day.day(), mark));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    for week in cells.chunks(7) {
        out.push_str(week.join(" ").trim_end());
        out.push('\n');
    }
    Some(out)
}
