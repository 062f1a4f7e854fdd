mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use daycapsule::backend::SqliteBackend;
use daycapsule::capsule::{CapsuleDate, DayCapsuleStore, Mood};
use daycapsule::config::CapsuleConfig;

#[derive(Parser)]
#[command(name = "daycapsule", version, about = "Calendar diary: day capsules, quick notes, and daily insights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read or edit a day's capsule
    Day {
        #[command(subcommand)]
        action: DayAction,
    },
    /// Manage a day's quick notes
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
    /// Show a month with content markers (* capsule, + notes, # both)
    Calendar {
        /// Month as YYYY-MM (defaults to the current month)
        month: Option<String>,
    },
    /// List dates that have content
    Marked {
        /// List quick-note dates instead of capsule dates
        #[arg(long)]
        notes: bool,
    },
    /// Generate the AI insight for a day's quick notes
    Insight {
        /// Date as YYYY-MM-DD (defaults to today)
        date: Option<CapsuleDate>,
    },
    /// Check database integrity and content index consistency
    Doctor,
    /// Export every capsule and note list as JSON to stdout
    Export,
}

#[derive(Subcommand)]
enum DayAction {
    /// Print a day's capsule
    Show { date: Option<CapsuleDate> },
    /// Update fields of a day's capsule; unspecified fields are kept
    Set {
        date: Option<CapsuleDate>,
        #[arg(long)]
        text: Option<String>,
        /// Path to a photo to attach
        #[arg(long)]
        image: Option<String>,
        /// Mood glyph or name (happy, neutral, sad, angry, tired, celebrating)
        #[arg(long)]
        mood: Option<Mood>,
        #[arg(long, conflicts_with = "image")]
        no_image: bool,
        #[arg(long, conflicts_with = "mood")]
        no_mood: bool,
    },
    /// Erase a day's capsule and unmark it
    Clear { date: Option<CapsuleDate> },
}

#[derive(Subcommand)]
enum NotesAction {
    /// List a day's notes, newest first
    List { date: Option<CapsuleDate> },
    /// Add a note to the top of the list
    Add {
        text: String,
        #[arg(long)]
        date: Option<CapsuleDate>,
    },
    /// Replace a note's text
    Edit {
        id: String,
        text: String,
        #[arg(long)]
        date: Option<CapsuleDate>,
    },
    /// Delete a note
    Delete {
        id: String,
        #[arg(long)]
        date: Option<CapsuleDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CapsuleConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let open_store = || -> Result<DayCapsuleStore> {
        let backend = SqliteBackend::open(config.resolved_db_path())?;
        Ok(DayCapsuleStore::new(Arc::new(backend)))
    };
    let today = CapsuleDate::today();

    match cli.command {
        Command::Day { action } => match action {
            DayAction::Show { date } => cli::day::show(&open_store()?, date.unwrap_or(today)).await?,
            DayAction::Set {
                date,
                text,
                image,
                mood,
                no_image,
                no_mood,
            } => {
                let edit = cli::day::CapsuleEdit {
                    text,
                    image: if no_image { Some(None) } else { image.map(Some) },
                    mood: if no_mood { Some(None) } else { mood.map(Some) },
                };
                cli::day::set(&open_store()?, date.unwrap_or(today), edit).await?
            }
            DayAction::Clear { date } => cli::day::clear(&open_store()?, date.unwrap_or(today)).await?,
        },
        Command::Notes { action } => match action {
            NotesAction::List { date } => cli::notes::list(&open_store()?, date.unwrap_or(today)).await?,
            NotesAction::Add { text, date } => {
                cli::notes::add(&open_store()?, date.unwrap_or(today), &text).await?
            }
            NotesAction::Edit { id, text, date } => {
                cli::notes::edit(&open_store()?, date.unwrap_or(today), &id, &text).await?
            }
            NotesAction::Delete { id, date } => {
                cli::notes::delete(&open_store()?, date.unwrap_or(today), &id).await?
            }
        },
        Command::Calendar { month } => {
            cli::calendar::calendar(&open_store()?, month.as_deref(), today).await?
        }
        Command::Marked { notes } => cli::calendar::marked(&open_store()?, notes).await,
        Command::Insight { date } => {
            cli::insight::insight(&open_store()?, &config.insight, date.unwrap_or(today)).await?
        }
        Command::Doctor => cli::doctor::doctor(&config)?,
        Command::Export => cli::export::export(&config)?,
    }

    Ok(())
}
