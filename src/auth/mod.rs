// src/auth/mod.rs
//! Local user registry, login and per-view permissions.

pub mod credentials;
pub mod error;
pub mod repository;
pub mod service;
pub mod sqlite;
pub mod user;

pub use error::{AuthError, StoreError};
pub use repository::UserRepository;
pub use service::{AuthService, UserDraft};
pub use sqlite::SqliteUserRepository;
pub use user::MainView;
