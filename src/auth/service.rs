// src/auth/service.rs
//! Login, session and registry management on top of a `UserRepository`.

use tracing::{info, warn};

use super::credentials::{builtin_users, is_builtin, obfuscate, verify};
use super::error::{AuthError, StoreError};
use super::repository::UserRepository;
use super::user::{MainView, Role, User};

/// Input for creating or editing an associate.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub emp_id: String,
    pub name: String,
    /// Required for new users; blank on edit keeps the stored token.
    pub password: Option<String>,
    pub permissions: Vec<MainView>,
}

pub struct AuthService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stored users first, then built-ins whose id is not shadowed.
    pub fn registry(&self) -> Result<Vec<User>, AuthError> {
        let mut users = self.repo.all_users()?;
        for builtin in builtin_users() {
            if !users.iter().any(|u| u.emp_id == builtin.emp_id) {
                users.push(builtin);
            }
        }
        Ok(users)
    }

    pub fn login(&self, emp_id: &str, password: &str) -> Result<User, AuthError> {
        let emp_id = emp_id.trim();
        let user = self
            .registry()?
            .into_iter()
            .find(|u| u.emp_id == emp_id && verify(password, &u.password_hash))
            .ok_or_else(|| {
                warn!("Failed login attempt for {}", emp_id);
                AuthError::InvalidCredentials
            })?;
        self.repo.set_current_session(&user)?;
        info!("{} logged in", user.emp_id);
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.repo.clear_session()?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.repo.current_session()?)
    }

    /// The logged-in user, if allowed to open `view`.
    pub fn require(&self, view: MainView) -> Result<User, AuthError> {
        let user = self.current_user()?.ok_or(AuthError::NotLoggedIn)?;
        if user.can_access(view) {
            Ok(user)
        } else {
            Err(AuthError::PermissionDenied {
                view: view.label().to_string(),
            })
        }
    }

    /// Creates a user, or edits the one stored under `editing`. Renaming the
    /// employee id moves the entry.
    pub fn save_user(&self, draft: UserDraft, editing: Option<&str>) -> Result<User, AuthError> {
        let emp_id = draft.emp_id.trim().to_string();
        let name = draft.name.trim().to_string();
        let password = draft.password.filter(|p| !p.is_empty());
        if emp_id.is_empty() || name.is_empty() || (editing.is_none() && password.is_none()) {
            return Err(AuthError::Validation(
                "Please fill all required identity fields.".to_string(),
            ));
        }
        if draft.permissions.is_empty() {
            return Err(AuthError::Validation(
                "Please grant at least one tab permission.".to_string(),
            ));
        }

        let registry = self.registry()?;
        if editing != Some(emp_id.as_str()) && registry.iter().any(|u| u.emp_id == emp_id) {
            return Err(AuthError::Validation(format!(
                "Employee ID {} is already registered.",
                emp_id
            )));
        }
        let existing = match editing {
            Some(original) => Some(
                registry
                    .into_iter()
                    .find(|u| u.emp_id == original)
                    .ok_or_else(|| StoreError::UserNotFound(original.to_string()))?,
            ),
            None => None,
        };
        let password_hash = match (&password, &existing) {
            (Some(p), _) => obfuscate(p),
            (None, Some(u)) => u.password_hash.clone(),
            (None, None) => {
                return Err(AuthError::Validation("A password is required.".to_string()))
            }
        };
        let user = User {
            emp_id,
            password_hash,
            name,
            role: existing.as_ref().map(|u| u.role).unwrap_or(Role::Associate),
            permissions: draft.permissions,
        };

        if let Some(original) = editing.filter(|o| *o != user.emp_id) {
            self.repo.delete_user(original)?;
        }
        self.repo.upsert_user(&user)?;
        Ok(user)
    }

    pub fn delete_user(&self, emp_id: &str) -> Result<(), AuthError> {
        if !self.repo.delete_user(emp_id)? {
            if is_builtin(emp_id) {
                return Err(AuthError::BuiltinAccount(emp_id.to_string()));
            }
            return Err(StoreError::UserNotFound(emp_id.to_string()).into());
        }
        if self.current_user()?.is_some_and(|u| u.emp_id == emp_id) {
            self.repo.clear_session()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::MemoryUserRepository;

    fn service() -> AuthService<MemoryUserRepository> {
        AuthService::new(MemoryUserRepository::new())
    }

    fn draft(emp_id: &str, password: Option<&str>, permissions: Vec<MainView>) -> UserDraft {
        UserDraft {
            emp_id: emp_id.to_string(),
            name: "Asha".to_string(),
            password: password.map(str::to_string),
            permissions,
        }
    }

    #[test]
    fn test_builtin_login_and_permissions() {
        let auth = service();
        let user = auth.login("123456", "password123").expect("login");
        assert_eq!(user.name, "Default Associate");
        assert!(auth.require(MainView::SocialMedia).is_ok());
        assert!(matches!(
            auth.require(MainView::Legal),
            Err(AuthError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let auth = service();
        assert!(matches!(auth.login("123456", "nope"), Err(AuthError::InvalidCredentials)));
        assert!(matches!(auth.require(MainView::GlobalSummary), Err(AuthError::NotLoggedIn)));
    }

    #[test]
    fn test_logout_clears_session() {
        let auth = service();
        auth.login("admin", "admin@dashly").expect("login");
        assert!(auth.require(MainView::AdminPanel).is_ok());
        auth.logout().expect("logout");
        assert!(auth.current_user().expect("read").is_none());
    }

    #[test]
    fn test_new_user_needs_password_and_permission() {
        let auth = service();
        assert!(matches!(
            auth.save_user(draft("77", None, vec![MainView::Proxy]), None),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.save_user(draft("77", Some("pw"), Vec::new()), None),
            Err(AuthError::Validation(_))
        ));
        let user = auth
            .save_user(draft("77", Some("pw"), vec![MainView::Proxy]), None)
            .expect("save");
        assert_eq!(user.role, Role::Associate);
        assert!(auth.login("77", "pw").is_ok());
    }

    #[test]
    fn test_edit_keeps_password_and_moves_id() {
        let auth = service();
        auth.save_user(draft("77", Some("pw"), vec![MainView::Proxy]), None)
            .expect("save");
        auth.save_user(draft("78", None, vec![MainView::Legal]), Some("77"))
            .expect("edit");
        assert!(auth.login("77", "pw").is_err());
        let user = auth.login("78", "pw").expect("login under new id");
        assert_eq!(user.permissions, vec![MainView::Legal]);
    }

    #[test]
    fn test_duplicate_emp_id_rejected() {
        let auth = service();
        auth.save_user(draft("77", Some("pw"), vec![MainView::Proxy]), None)
            .expect("save");
        assert!(matches!(
            auth.save_user(draft("77", Some("pw"), vec![MainView::Proxy]), None),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.save_user(draft("admin", Some("pw"), vec![MainView::Proxy]), None),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_stored_user_shadows_builtin() {
        let auth = service();
        auth.save_user(draft("123456", Some("changed"), vec![MainView::Proxy]), Some("123456"))
            .expect("edit builtin");
        assert!(auth.login("123456", "password123").is_err());
        assert!(auth.login("123456", "changed").is_ok());
    }

    #[test]
    fn test_delete_rules() {
        let auth = service();
        assert!(matches!(auth.delete_user("admin"), Err(AuthError::BuiltinAccount(_))));
        assert!(matches!(
            auth.delete_user("404"),
            Err(AuthError::Store(StoreError::UserNotFound(_)))
        ));
        auth.save_user(draft("77", Some("pw"), vec![MainView::Proxy]), None)
            .expect("save");
        auth.login("77", "pw").expect("login");
        auth.delete_user("77").expect("delete");
        assert!(auth.current_user().expect("read").is_none());
    }
}
