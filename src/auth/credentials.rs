// src/auth/credentials.rs
//! Password tokens are base64 of the plain password. This is obfuscation
//! for a local registry, not a security boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::user::{MainView, Role, User};

pub fn obfuscate(password: &str) -> String {
    STANDARD.encode(password.as_bytes())
}

pub fn verify(password: &str, token: &str) -> bool {
    obfuscate(password) == token
}

/// Accounts compiled into the application. Stored users with the same
/// employee id take precedence.
pub fn builtin_users() -> Vec<User> {
    vec![
        User {
            emp_id: "admin".to_string(),
            password_hash: obfuscate("admin@dashly"),
            name: "Administrator".to_string(),
            role: Role::Admin,
            permissions: MainView::ALL.to_vec(),
        },
        User {
            emp_id: "123456".to_string(),
            password_hash: obfuscate("password123"),
            name: "Default Associate".to_string(),
            role: Role::Associate,
            permissions: vec![MainView::GlobalSummary, MainView::SocialMedia],
        },
    ]
}

pub fn is_builtin(emp_id: &str) -> bool {
    builtin_users().iter().any(|u| u.emp_id == emp_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_base64() {
        assert_eq!(obfuscate("password123"), "cGFzc3dvcmQxMjM=");
        assert!(verify("password123", "cGFzc3dvcmQxMjM="));
        assert!(!verify("password124", "cGFzc3dvcmQxMjM="));
    }

    #[test]
    fn test_builtin_associate() {
        let users = builtin_users();
        let associate = users.iter().find(|u| u.emp_id == "123456").expect("associate");
        assert_eq!(associate.permissions, vec![MainView::GlobalSummary, MainView::SocialMedia]);
        assert!(is_builtin("admin"));
        assert!(!is_builtin("999"));
    }
}
