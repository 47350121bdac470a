// src/auth/error.rs

use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    SerdeJson(serde_json::Error),
    InvalidUser(String),
    UserNotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(e) => write!(f, "SQLite error: {}", e),
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::SerdeJson(e) => write!(f, "JSON error: {}", e),
            StoreError::InvalidUser(msg) => write!(f, "Invalid user: {}", msg),
            StoreError::UserNotFound(id) => write!(f, "User not found: {}", id),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::SerdeJson(e)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid employee ID or password.")]
    InvalidCredentials,
    #[error("Not logged in. Run `dashly login <emp-id>` first.")]
    NotLoggedIn,
    #[error("Access to {view} is not permitted for this account.")]
    PermissionDenied { view: String },
    #[error("{0}")]
    Validation(String),
    #[error("Built-in account {0} cannot be deleted.")]
    BuiltinAccount(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
