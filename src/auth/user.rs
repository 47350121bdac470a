// src/auth/user.rs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::sheets::Domain;

/// Top-level views a user can be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum MainView {
    GlobalSummary,
    SocialMedia,
    Proxy,
    Legal,
    Important,
    AdminPanel,
}

impl MainView {
    pub const ALL: [MainView; 6] = [
        MainView::GlobalSummary,
        MainView::SocialMedia,
        MainView::Proxy,
        MainView::Legal,
        MainView::Important,
        MainView::AdminPanel,
    ];

    /// The dashboard view showing `domain`.
    pub fn for_domain(domain: Domain) -> Self {
        match domain {
            Domain::SocialMedia => MainView::SocialMedia,
            Domain::Proxy => MainView::Proxy,
            Domain::Legal => MainView::Legal,
            Domain::Important => MainView::Important,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MainView::GlobalSummary => "AI Executive Summary",
            MainView::SocialMedia => "Social Media Dashboard",
            MainView::Proxy => "Proxy Investigation",
            MainView::Legal => "Legal Compliance",
            MainView::Important => "Priority Thread Registry",
            MainView::AdminPanel => "Identity Management",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Associate,
}

/// One registry entry. Field names match the stored JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub emp_id: String,
    /// Obfuscated, not hashed. See `credentials`.
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub permissions: Vec<MainView>,
}

impl User {
    pub fn can_access(&self, view: MainView) -> bool {
        self.role == Role::Admin || self.permissions.contains(&view)
    }
}
