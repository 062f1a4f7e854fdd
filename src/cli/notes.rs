use anyhow::{bail, Context, Result};

use daycapsule::capsule::notes::{add_note, delete_note, edit_note};
use daycapsule::capsule::{CapsuleDate, DayCapsuleStore, QuickNote};

async fn load(store: &DayCapsuleStore, date: CapsuleDate) -> Result<Vec<QuickNote>> {
    store
        .try_get_notes(date)
        .await
        .with_context(|| format!("failed to read notes for {date}"))
}

pub async fn list(store: &DayCapsuleStore, date: CapsuleDate) -> Result<()> {
    let notes = load(store, date).await?;
    println!("Notes for {}", date.display_long());
    if notes.is_empty() {
        println!("  (none)");
    }
    for note in &notes {
        println!("  [{}] {}", note.id, note.text);
    }
    Ok(())
}

pub async fn add(store: &DayCapsuleStore, date: CapsuleDate, text: &str) -> Result<()> {
    let mut notes = load(store, date).await?;
    let id = match add_note(&mut notes, text) {
        Some(note) => note.id.clone(),
        None => bail!("note text must not be blank"),
    };
    store.try_put_notes(date, &notes).await?;
    println!("Added note {id}.");
    Ok(())
}

pub async fn edit(store: &DayCapsuleStore, date: CapsuleDate, id: &str, text: &str) -> Result<()> {
    let mut notes = load(store, date).await?;
    if !edit_note(&mut notes, id, text) {
        bail!("no note {id} on {date}, or the new text is blank");
    }
    store.try_put_notes(date, &notes).await?;
    println!("Updated note {id}.");
    Ok(())
}

pub async fn delete(store: &DayCapsuleStore, date: CapsuleDate, id: &str) -> Result<()> {
    let mut notes = load(store, date).await?;
    if !delete_note(&mut notes, id) {
        bail!("no note {id} on {date}");
    }
    store.try_put_notes(date, &notes).await?;
    println!("Deleted note {id}.");
    Ok(())
}
