// src/ai/api_key.rs
//! API key storage. The OS keyring is preferred; `GEMINI_API_KEY` and
//! `API_KEY` are read as fallbacks (a `.env` file is loaded at startup).

use tracing::{error, info};

const KEYRING_SERVICE_NAME: &str = "dashly_ai";
const KEYRING_API_KEY_USERNAME: &str = "llm_api_key";
const ENV_KEYS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyStatus {
    Keyring,
    Environment,
    Missing,
    KeyringError,
}

impl ApiKeyStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApiKeyStatus::Keyring => "Key Set",
            ApiKeyStatus::Environment => "Key Set (environment)",
            ApiKeyStatus::Missing => "No Key Set",
            ApiKeyStatus::KeyringError => "Keyring Error",
        }
    }
}

fn entry() -> keyring::Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE_NAME, KEYRING_API_KEY_USERNAME)
}

fn from_env() -> Option<String> {
    ENV_KEYS
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

fn from_keyring() -> Result<Option<String>, keyring::Error> {
    match entry()?.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn resolve_api_key() -> Option<String> {
    match from_keyring() {
        Ok(Some(key)) => return Some(key),
        Ok(None) => {}
        Err(e) => error!("Error accessing keyring: {}", e),
    }
    from_env()
}

pub fn api_key_status() -> ApiKeyStatus {
    match from_keyring() {
        Ok(Some(_)) => ApiKeyStatus::Keyring,
        Ok(None) if from_env().is_some() => ApiKeyStatus::Environment,
        Ok(None) => ApiKeyStatus::Missing,
        Err(e) => {
            error!("Error accessing keyring: {}", e);
            if from_env().is_some() {
                ApiKeyStatus::Environment
            } else {
                ApiKeyStatus::KeyringError
            }
        }
    }
}

pub fn store_api_key(key: &str) -> keyring::Result<()> {
    entry()?.set_password(key)?;
    info!("API Key stored in keyring.");
    Ok(())
}

pub fn clear_api_key() -> keyring::Result<()> {
    match entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => {
            info!("API Key removed from keyring.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
