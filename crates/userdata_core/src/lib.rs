//! Core data access for the user store.
//! A CRUD repository contract, its SQLite implementation, and the storage
//! bootstrap it runs on.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::user::{NewUser, SaveRecord, User, UserId, UserRecord};
pub use repo::crud::{CrudRepository, RepoResult, StorageFailure, UserRepository};
pub use repo::user_repo::SqliteUserRepository;
pub use service::user_service::UserService;

/// Minimal health-check API for smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
