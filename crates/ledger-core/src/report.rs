//! Chat-completion client for the financial health report
//!
//! One POST per request, no retries. Failures come back as distinct
//! `ReportError` kinds so the caller can show them without guessing.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ReportSettings;
use crate::error::ReportError;
use crate::prompt::build_report_prompt;
use crate::transactions::Transaction;

// =============================================================================
// Chat Completion API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

// =============================================================================
// Client
// =============================================================================

/// Sends report prompts to the configured chat-completion endpoint
#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    settings: ReportSettings,
}

impl ReportClient {
    pub fn new(settings: ReportSettings) -> Result<Self, ReportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ReportError::Network)?;
        Ok(Self { http, settings })
    }

    /// Build the prompt for `transactions` and request a report
    pub async fn generate(&self, transactions: &[Transaction]) -> Result<String, ReportError> {
        let prompt = build_report_prompt(transactions);
        info!(
            records = transactions.len(),
            prompt_chars = prompt.chars().count(),
            model = %self.settings.model,
            "Requesting financial health report"
        );

        let result = self.complete(&prompt).await;
        match &result {
            Ok(report) => info!(report_chars = report.chars().count(), "Report received"),
            Err(ReportError::Status { status, body }) => {
                warn!(status, body = %body, "Report service rejected the request")
            }
            Err(e) => warn!(error = %e, "Report request failed"),
        }
        result
    }

    /// Send a single user message and return the first completion
    pub async fn complete(&self, prompt: &str) -> Result<String, ReportError> {
        let api_key = self
            .settings
            .api_key
            .resolve()
            .ok_or_else(|| ReportError::MissingApiKey {
                env_var: self.settings.api_key.describe(),
            })?;

        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.settings.temperature,
        };

        let response = self
            .http
            .post(&self.settings.endpoint)
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(ReportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_completion(&text)
    }
}

/// Extract `choices[0].message.content` from a response body
fn parse_completion(body: &str) -> Result<String, ReportError> {
    let data: ChatResponse =
        serde_json::from_str(body).map_err(|e| ReportError::Decode(e.to_string()))?;

    data.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(ReportError::EmptyChoices)
}
