//! Daily insight: a one-to-two sentence reflection generated from a day's notes.
//!
//! Provides the [`InsightProvider`] trait, prompt construction, and
//! [`daily_insight`], which never fails and maps every error to a short line
//! suitable for display. Insights are display-only and never persisted.

pub mod gemini;

use anyhow::Result;
use async_trait::async_trait;

use crate::capsule::QuickNote;
use crate::config::InsightConfig;
use crate::error::InsightError;

pub const MSG_NOT_CONFIGURED: &str = "AI is offline: API key not configured.";
pub const MSG_AUTH: &str = "AI is offline: Invalid API key. Please check your settings.";
pub const MSG_SAFETY: &str = "AI insight blocked due to safety guidelines.";
pub const MSG_UNAVAILABLE: &str =
    "Couldn't load AI insight. Try adding a note or check your internet connection!";

/// A generative-text capability: prompt in, free text out.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

/// Create the insight provider named in config.
///
/// Currently only `"gemini"` is supported. A missing API key is not an error
/// here; the provider reports [`InsightError::NotConfigured`] when called.
pub fn create_provider(config: &InsightConfig) -> Result<Box<dyn InsightProvider>> {
    match config.provider.as_str() {
        "gemini" => Ok(Box::new(gemini::GeminiProvider::new(config)?)),
        other => anyhow::bail!("unknown insight provider: {other}. Supported: gemini"),
    }
}

/// Prompt for a day's notes, or a generic journaling prompt when there are none.
pub fn build_prompt(notes: &[QuickNote]) -> String {
    if notes.is_empty() {
        return "Generate a very short, positive, and encouraging 1-2 sentence thought or \
                prompt for a daily journaling app. Example: 'What's one small win you \
                celebrated today?'"
            .to_string();
    }

    let listed: Vec<String> = notes.iter().map(|n| format!("- {}", n.text)).collect();
    format!(
        "Analyze the following daily notes and provide a very concise, inspiring, or \
         reflective 1-2 sentence insight or summary. Focus on key themes or future actions \
         based on the notes. Example: \"You focused on work tasks today. Don't forget to \
         relax!\"\n\nNotes:\n{}",
        listed.join("\n")
    )
}

/// The line shown in place of an insight when generation fails.
pub fn fallback_message(error: &InsightError) -> &'static str {
    match error {
        InsightError::NotConfigured => MSG_NOT_CONFIGURED,
        InsightError::Auth(_) => MSG_AUTH,
        InsightError::SafetyBlocked => MSG_SAFETY,
        InsightError::Network(_) | InsightError::Http { .. } | InsightError::EmptyResponse => {
            MSG_UNAVAILABLE
        }
    }
}

/// Generate the insight for `notes`, falling back to a fixed message on error.
pub async fn daily_insight(provider: &dyn InsightProvider, notes: &[QuickNote]) -> String {
    let prompt = build_prompt(notes);
    match provider.generate(&prompt).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, notes = notes.len(), "insight generation failed");
            fallback_message(&e).to_string()
        }
    }
}
