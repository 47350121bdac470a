// src/sheets/fetcher.rs
//! Sheet fetch boundary: retrieves CSV text for a tab and classifies failures
//! before anything reaches the parser. Single attempt, no retry.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error};

use super::error::SheetError;

const SIGN_IN_MARKER: &str = "google-signin";

/// Anything that can hand back raw CSV text for a tab identifier.
pub trait SheetSource: Sync {
    fn fetch_csv(&self, tab_id: &str) -> impl Future<Output = Result<String, SheetError>> + Send;
}

/// Classifies a raw response. `status` is the HTTP status code.
pub fn classify_response(status: u16, reason: &str, body: String) -> Result<String, SheetError> {
    if !(200..300).contains(&status) {
        return Err(SheetError::HttpStatus {
            status,
            reason: reason.to_string(),
        });
    }
    if looks_like_html(&body) {
        return Err(SheetError::AccessDenied);
    }
    if body.trim().is_empty() {
        return Err(SheetError::EmptyBody);
    }
    Ok(body)
}

/// HTML login pages come back when the sheet is not link-shared.
pub fn looks_like_html(body: &str) -> bool {
    let head = body
        .trim_start_matches('\u{FEFF}')
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html") || body.contains(SIGN_IN_MARKER)
}

/// Fetches the published CSV export of a spreadsheet over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSheetFetcher {
    client: reqwest::Client,
    export_url: String,
}

impl HttpSheetFetcher {
    pub fn new(export_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SheetError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            export_url: export_url.into(),
        })
    }

    /// Export URL for one tab; the timestamp defeats intermediary caches.
    pub fn tab_url(&self, tab_id: &str) -> String {
        let sep = if self.export_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}gid={}&t={}",
            self.export_url,
            sep,
            tab_id,
            Utc::now().timestamp_millis()
        )
    }

    async fn fetch_once(&self, tab_id: &str) -> Result<String, SheetError> {
        let url = self.tab_url(tab_id);
        debug!("Attempting fetch for GID {}...", tab_id);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = response.text().await?;
        classify_response(status.as_u16(), &reason, body)
    }
}

impl SheetSource for HttpSheetFetcher {
    async fn fetch_csv(&self, tab_id: &str) -> Result<String, SheetError> {
        self.fetch_once(tab_id).await.inspect_err(|e| {
            error!("Fetch error for GID {}: {}", tab_id, e);
        })
    }
}
