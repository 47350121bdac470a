// src/auth/sqlite.rs
//! SQLite-backed key-value store for the user registry and session.
//!
//! Two keys are used: the associate list and the current session, each stored
//! as a JSON document.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use super::error::StoreResult;
use super::repository::{upsert_into, UserRepository};
use super::user::User;

const USERS_KEY: &str = "dashly_associates";
const SESSION_KEY: &str = "dashly_session";

pub struct SqliteUserRepository {
    conn: Mutex<Connection>,
}

impl SqliteUserRepository {
    /// Opens (or creates) the store at `path` with WAL journaling.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        if journal_mode.to_uppercase() != "WAL" {
            warn!(
                "Failed to set WAL mode on store {:?}. Current mode: {}",
                path.file_name(),
                journal_mode
            );
        } else {
            debug!("WAL mode activated for store {:?}", path.file_name());
        }
        conn.execute_batch("PRAGMA synchronous=NORMAL; PRAGMA busy_timeout=5000;")?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn()
            .query_row("SELECT value FROM kv_store WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn().execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn().execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn save_users(&self, users: &[User]) -> StoreResult<()> {
        self.set(USERS_KEY, &serde_json::to_string(users)?)
    }
}

impl UserRepository for SqliteUserRepository {
    fn all_users(&self) -> StoreResult<Vec<User>> {
        match self.get(USERS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn upsert_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.all_users()?;
        upsert_into(&mut users, user)?;
        self.save_users(&users)?;
        info!("Stored user {}", user.emp_id);
        Ok(())
    }

    fn delete_user(&self, emp_id: &str) -> StoreResult<bool> {
        let mut users = self.all_users()?;
        let before = users.len();
        users.retain(|u| u.emp_id != emp_id);
        if users.len() == before {
            return Ok(false);
        }
        self.save_users(&users)?;
        info!("Deleted user {}", emp_id);
        Ok(true)
    }

    fn current_session(&self) -> StoreResult<Option<User>> {
        match self.get(SESSION_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_current_session(&self, user: &User) -> StoreResult<()> {
        self.set(SESSION_KEY, &serde_json::to_string(user)?)
    }

    fn clear_session(&self) -> StoreResult<()> {
        self.remove(SESSION_KEY)
    }
}
