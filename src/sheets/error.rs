// src/sheets/error.rs

use thiserror::Error;

/// Terminal failures of a single sheet fetch. Scoped to one domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Server responded with {status}: {reason}")]
    HttpStatus { status: u16, reason: String },
    #[error("The sheet returned no data.")]
    EmptyBody,
    #[error("Access Denied: The sheet must be set to \"Anyone with the link can view\".")]
    AccessDenied,
    #[error("No tab identifier configured for {0}")]
    NotConfigured(String),
}

impl SheetError {
    /// Transport and HTTP failures can be retried by the operator; access and
    /// empty-data conditions need a change on the sheet itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SheetError::Transport(_) | SheetError::HttpStatus { .. })
    }
}

impl From<reqwest::Error> for SheetError {
    fn from(e: reqwest::Error) -> Self {
        SheetError::Transport(e.to_string())
    }
}
