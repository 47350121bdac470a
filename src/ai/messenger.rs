// src/ai/messenger.rs
//! Messenger - talks to the Gemini `generateContent` REST endpoint.
//!
//! The request asks for `application/json` output constrained by a response
//! schema matching `GlobalSummary`. The raw text of the first candidate is
//! handed back for parsing.

use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use super::parser::GenerateContentResponse;
use super::payload::SummaryPayload;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("No AI API key configured")]
    MissingApiKey,
    #[error("AI request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI service responded with {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("AI response malformed: {0}")]
    MalformedResponse(String),
    #[error("Failed to encode AI payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Configuration for one summary request.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub endpoint: String,
    pub model_id: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Messenger {
    client: reqwest::Client,
    config: RequestConfig,
}

const PROMPT_HEADER: &str = "You are the operations analyst for a buyer help team. \
Analyze the following dashboard data across social-media escalations, proxy investigations, \
legal compliance and priority threads. Produce an executive summary, an overall health \
status color (green, amber or red), one short deep-dive per department and the key \
priorities for the team.";

pub fn build_prompt(payload: &SummaryPayload) -> Result<String, AiError> {
    Ok(format!("{}\n\nData: {}", PROMPT_HEADER, serde_json::to_string(payload)?))
}

/// Schema the model output must follow.
pub fn response_schema() -> Value {
    let string = json!({ "type": "STRING" });
    json!({
        "type": "OBJECT",
        "properties": {
            "executiveSummary": { "type": "STRING", "description": "A high-level paragraph on overall operations." },
            "statusColor": { "type": "STRING", "enum": ["green", "amber", "red"] },
            "departmentalDeepDive": {
                "type": "OBJECT",
                "properties": {
                    "social": string,
                    "proxy": string,
                    "legal": string,
                    "important": string
                },
                "required": ["social", "proxy", "legal", "important"]
            },
            "keyPriorities": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["executiveSummary", "statusColor", "departmentalDeepDive", "keyPriorities"]
    })
}

pub fn build_request_body(payload: &SummaryPayload) -> Result<Value, AiError> {
    Ok(json!({
        "contents": [{ "parts": [{ "text": build_prompt(payload)? }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    }))
}

impl Messenger {
    pub fn new(client: reqwest::Client, config: RequestConfig) -> Self {
        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model_id
        )
    }

    /// Sends the payload and returns the model's raw text answer.
    pub async fn send(&self, payload: &SummaryPayload) -> Result<String, AiError> {
        let body = build_request_body(payload)?;
        debug!("Sending AI summary request to model {}", self.config.model_id);
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;
        parsed
            .text()
            .ok_or_else(|| AiError::MalformedResponse("response has no text".to_string()))
    }
}
