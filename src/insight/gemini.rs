//! Gemini `generateContent` provider over the REST API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::InsightProvider;
use crate::config::InsightConfig;
use crate::error::InsightError;

pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &InsightConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.trim().to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl InsightProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        if self.api_key.is_empty() {
            return Err(InsightError::NotConfigured);
        }

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "requesting insight");

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        parse_response(status, &text)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Turn an HTTP status and body into the generated text or a classified error.
pub fn parse_response(status: u16, body: &str) -> Result<String, InsightError> {
    if body.contains("API_KEY_INVALID") || body.contains("API key not valid") {
        return Err(InsightError::Auth(error_message(body)));
    }
    match status {
        200..=299 => {}
        401 | 403 => return Err(InsightError::Auth(error_message(body))),
        _ => {
            return Err(InsightError::Http {
                status,
                body: error_message(body),
            })
        }
    }

    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| InsightError::Http {
        status,
        body: format!("unreadable response: {e}"),
    })?;

    if parsed
        .prompt_feedback
        .as_ref()
        .is_some_and(|f| f.block_reason.is_some())
    {
        return Err(InsightError::SafetyBlocked);
    }

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return Err(InsightError::EmptyResponse);
    };
    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(InsightError::SafetyBlocked);
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(InsightError::EmptyResponse);
    }
    Ok(text.to_string())
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}
