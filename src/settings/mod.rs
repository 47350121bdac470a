pub mod io;

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sheets::Domain;

pub const DEFAULT_EXPORT_URL: &str =
    "https://docs.google.com/spreadsheets/d/1ofyzwBVRjI6y1VNn-OBJtIPVKjaMdaMY2aZt-sFN7ao/export?format=csv";
pub const DEFAULT_AI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-3-flash-preview";

/// Tab identifiers (GIDs) per domain inside the exported spreadsheet. Legal and
/// priority-thread tabs have no default and must be set with `dashly config`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TabSettings {
    pub social_media: String,
    pub proxy: String,
    pub legal: String,
    pub important: String,
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            social_media: "856039892".to_string(),
            proxy: "0".to_string(),
            legal: String::new(),
            important: String::new(),
        }
    }
}

impl TabSettings {
    pub fn get(&self, domain: Domain) -> &str {
        match domain {
            Domain::SocialMedia => &self.social_media,
            Domain::Proxy => &self.proxy,
            Domain::Legal => &self.legal,
            Domain::Important => &self.important,
        }
    }

    pub fn set(&mut self, domain: Domain, tab_id: String) {
        let slot = match domain {
            Domain::SocialMedia => &mut self.social_media,
            Domain::Proxy => &mut self.proxy,
            Domain::Legal => &mut self.legal,
            Domain::Important => &mut self.important,
        };
        *slot = tab_id;
    }

    /// Configured tabs only; unset domains are left out.
    pub fn tab_map(&self) -> HashMap<Domain, String> {
        Domain::ALL
            .into_iter()
            .map(|d| (d, self.get(d).trim().to_string()))
            .filter(|(_, tab)| !tab.is_empty())
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppSettings {
    pub spreadsheet_export_url: String,
    pub tabs: TabSettings,
    pub ai_endpoint: String,
    pub ai_model_id: String,
    /// Rows per domain included in the AI summary request.
    pub summary_sample_size: usize,
    /// Unset leaves timeouts to the HTTP client defaults.
    pub request_timeout_secs: Option<u64>,
    pub store_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            spreadsheet_export_url: DEFAULT_EXPORT_URL.to_string(),
            tabs: TabSettings::default(),
            ai_endpoint: DEFAULT_AI_ENDPOINT.to_string(),
            ai_model_id: DEFAULT_AI_MODEL.to_string(),
            summary_sample_size: 10,
            request_timeout_secs: None,
            store_path: None,
        }
    }
}

impl AppSettings {
    /// Applies `DASHLY_SHEET_URL` and `DASHLY_AI_MODEL` from the environment.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("DASHLY_SHEET_URL") {
            if !url.trim().is_empty() {
                self.spreadsheet_export_url = url;
            }
        }
        if let Ok(model) = std::env::var("DASHLY_AI_MODEL") {
            if !model.trim().is_empty() {
                self.ai_model_id = model;
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn resolved_store_path(&self) -> std::io::Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => io::default_store_path(),
        }
    }
}
