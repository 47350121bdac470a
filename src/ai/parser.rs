// src/ai/parser.rs
//! Parses the model's JSON answer into a `GlobalSummary`. Anything that does
//! not match the expected shape is "no summary".

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Amber,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentalDeepDive {
    pub social: String,
    pub proxy: String,
    pub legal: String,
    pub important: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub executive_summary: String,
    pub status_color: StatusColor,
    pub departmental_deep_dive: DepartmentalDeepDive,
    pub key_priorities: Vec<String>,
}

/// Strips a Markdown code fence some models wrap JSON in.
fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

pub fn parse_summary(text: &str) -> Option<GlobalSummary> {
    match serde_json::from_str::<GlobalSummary>(strip_code_fence(text)) {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Failed to parse AI summary response: {}", e);
            None
        }
    }
}

/// Text parts of a `generateContent` response.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, `None` when it has none.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "executiveSummary": "Stable week.",
        "statusColor": "amber",
        "departmentalDeepDive": {
            "social": "Backlog shrinking.",
            "proxy": "Two open cases.",
            "legal": "No notices.",
            "important": "One overdue thread."
        },
        "keyPriorities": ["Close overdue thread"]
    }"#;

    #[test]
    fn test_valid_summary() {
        let summary = parse_summary(VALID).expect("summary");
        assert_eq!(summary.status_color, StatusColor::Amber);
        assert_eq!(summary.key_priorities.len(), 1);
        assert_eq!(summary.departmental_deep_dive.important, "One overdue thread.");
    }

    #[test]
    fn test_fenced_summary() {
        let fenced = format!("```json\n{}\n```", VALID);
        assert!(parse_summary(&fenced).is_some());
    }

    #[test]
    fn test_unknown_status_color_is_no_summary() {
        let bad = VALID.replace("amber", "purple");
        assert_eq!(parse_summary(&bad), None);
    }

    #[test]
    fn test_malformed_json_is_no_summary() {
        assert_eq!(parse_summary("not json"), None);
        assert_eq!(parse_summary(r#"{"executiveSummary": "x"}"#), None);
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).expect("response");
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").expect("response");
        assert_eq!(empty.text(), None);
    }
}
