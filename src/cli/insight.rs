//! CLI `insight` command — generate the daily insight for a day's notes.

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use daycapsule::capsule::{CapsuleDate, DayCapsuleStore};
use daycapsule::config::InsightConfig;
use daycapsule::insight::{create_provider, daily_insight};

fn thinking_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .context("invalid spinner template")?,
    );
    spinner.set_message("Thinking about your day...");
    Ok(spinner)
}

pub async fn insight(store: &DayCapsuleStore, config: &InsightConfig, date: CapsuleDate) -> Result<()> {
    let provider = create_provider(config)?;
    let notes = store.get_notes(date).await;

    let spinner = thinking_spinner()?;
    spinner.enable_steady_tick(Duration::from_millis(100));

    let text = daily_insight(provider.as_ref(), &notes).await;

    spinner.finish_and_clear();
    println!("Insight for {} ({} notes)", date.display_long(), notes.len());
    println!("  {text}");
    Ok(())
}
