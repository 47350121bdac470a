// src/auth/repository.rs
//! Repository over the user registry and the current session. Callers never
//! touch the backing store directly.

use std::sync::{Mutex, MutexGuard};

use super::error::{StoreError, StoreResult};
use super::user::User;

pub trait UserRepository {
    fn all_users(&self) -> StoreResult<Vec<User>>;
    /// Inserts or replaces the user with the same employee id.
    fn upsert_user(&self, user: &User) -> StoreResult<()>;
    /// Returns `false` when no user had that id.
    fn delete_user(&self, emp_id: &str) -> StoreResult<bool>;
    fn current_session(&self) -> StoreResult<Option<User>>;
    fn set_current_session(&self, user: &User) -> StoreResult<()>;
    fn clear_session(&self) -> StoreResult<()>;
}

/// Replaces the entry with `user.emp_id` or appends it.
pub(crate) fn upsert_into(users: &mut Vec<User>, user: &User) -> StoreResult<()> {
    if user.emp_id.trim().is_empty() {
        return Err(StoreError::InvalidUser("empty employee id".to_string()));
    }
    match users.iter_mut().find(|u| u.emp_id == user.emp_id) {
        Some(existing) => *existing = user.clone(),
        None => users.push(user.clone()),
    }
    Ok(())
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    session: Option<User>,
}

/// Volatile repository, used in tests and for one-off runs.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    state: Mutex<MemoryState>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl UserRepository for MemoryUserRepository {
    fn all_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.state().users.clone())
    }

    fn upsert_user(&self, user: &User) -> StoreResult<()> {
        upsert_into(&mut self.state().users, user)
    }

    fn delete_user(&self, emp_id: &str) -> StoreResult<bool> {
        let mut state = self.state();
        let before = state.users.len();
        state.users.retain(|u| u.emp_id != emp_id);
        Ok(state.users.len() != before)
    }

    fn current_session(&self) -> StoreResult<Option<User>> {
        Ok(self.state().session.clone())
    }

    fn set_current_session(&self, user: &User) -> StoreResult<()> {
        self.state().session = Some(user.clone());
        Ok(())
    }

    fn clear_session(&self) -> StoreResult<()> {
        self.state().session = None;
        Ok(())
    }
}
