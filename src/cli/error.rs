// src/cli/error.rs

use thiserror::Error;

use crate::auth::{AuthError, StoreError};
use crate::sheets::SheetError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{domain}: {source}")]
    Sheet { domain: String, source: SheetError },
    #[error("{failed} domain(s) failed to sync")]
    SyncFailed { failed: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
    #[error("Sheet client error: {0}")]
    Client(#[from] SheetError),
    #[error("{0}")]
    InvalidArgument(String),
}
