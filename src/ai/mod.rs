// src/ai/mod.rs
//! AI executive summary. Every failure is downgraded to "no summary".

pub mod api_key;
pub mod messenger;
pub mod parser;
pub mod payload;

use tracing::{info, warn};

use crate::settings::AppSettings;

pub use messenger::{AiError, Messenger, RequestConfig};
pub use parser::GlobalSummary;
pub use payload::SummaryPayload;

/// Requests a summary for `payload`. `None` on a missing key, transport
/// failure or a response that does not match the expected shape.
pub async fn generate_global_summary(
    settings: &AppSettings,
    api_key: Option<String>,
    payload: &SummaryPayload,
) -> Option<GlobalSummary> {
    match request_summary(settings, api_key, payload).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!("AI summary unavailable: {}", e);
            None
        }
    }
}

async fn request_summary(
    settings: &AppSettings,
    api_key: Option<String>,
    payload: &SummaryPayload,
) -> Result<Option<GlobalSummary>, AiError> {
    let api_key = api_key.ok_or(AiError::MissingApiKey)?;
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let messenger = Messenger::new(
        builder.build()?,
        RequestConfig {
            endpoint: settings.ai_endpoint.clone(),
            model_id: settings.ai_model_id.clone(),
            api_key,
        },
    );
    let text = messenger.send(payload).await?;
    let summary = parser::parse_summary(&text);
    if summary.is_some() {
        info!("AI summary generated with {}", settings.ai_model_id);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::payload::DomainDigest;

    #[tokio::test]
    async fn test_missing_key_is_no_summary() {
        let digest = || DomainDigest {
            count: 0,
            resolved: 0,
            sample: Vec::new(),
        };
        let payload = SummaryPayload {
            date_range: "Full History".to_string(),
            social: digest(),
            proxy: digest(),
            legal: digest(),
            important: digest(),
        };
        assert_eq!(generate_global_summary(&AppSettings::default(), None, &payload).await, None);
    }
}
