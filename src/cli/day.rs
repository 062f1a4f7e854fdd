//! CLI `day` commands — show, edit, and clear a day's capsule.

use anyhow::{Context, Result};

use daycapsule::capsule::{CapsuleDate, DayCapsuleStore, Mood, WriteOutcome};
use daycapsule::error::CapabilityError;
use daycapsule::image::{FileImageSource, ImageSource};

/// Field changes for `day set`. `None` keeps the stored value; `Some(None)`
/// removes it.
pub struct CapsuleEdit {
    pub text: Option<String>,
    pub image: Option<Option<String>>,
    pub mood: Option<Option<Mood>>,
}

pub async fn show(store: &DayCapsuleStore, date: CapsuleDate) -> Result<()> {
    let capsule = store
        .try_get_capsule(date)
        .await
        .with_context(|| format!("failed to read capsule for {date}"))?;

    println!("{} ({date})", date.display_long());
    println!("{}", "=".repeat(40));
    if capsule.is_empty() {
        println!("  (empty)");
        return Ok(());
    }
    if let Some(ref image) = capsule.image_ref {
        println!("  Photo:  {image}");
    }
    if let Some(mood) = capsule.mood {
        println!("  Mood:   {mood} ({})", mood.name());
    }
    if !capsule.text.is_empty() {
        println!();
        for line in capsule.text.lines() {
            println!("  {line}");
        }
    }
    Ok(())
}

pub async fn set(store: &DayCapsuleStore, date: CapsuleDate, edit: CapsuleEdit) -> Result<()> {
    let mut capsule = store.try_get_capsule(date).await.with_context(|| {
        format!("existing capsule for {date} is unreadable; run `daycapsule day clear {date}` first")
    })?;

    if let Some(text) = edit.text {
        capsule.text = text;
    }
    if let Some(mood) = edit.mood {
        capsule.mood = mood;
    }
    match edit.image {
        Some(Some(path)) => {
            capsule.image_ref = Some(FileImageSource.resolve(&path).map_err(|e| match e {
                CapabilityError::PermissionDenied(p) => {
                    anyhow::anyhow!("cannot read photo {p}: permission denied")
                }
                other => anyhow::anyhow!("cannot attach photo: {other}"),
            })?);
        }
        Some(None) => capsule.image_ref = None,
        None => {}
    }

    match store.try_put_capsule(date, &capsule).await? {
        WriteOutcome::Saved => println!("Saved capsule for {date}."),
        WriteOutcome::Deleted => println!("Capsule for {date} is empty; removed."),
    }
    Ok(())
}

pub async fn clear(store: &DayCapsuleStore, date: CapsuleDate) -> Result<()> {
    store.try_clear_capsule(date).await?;
    println!("Cleared {date}; it is no longer highlighted.");
    Ok(())
}
