//! SQLite storage bootstrap for the user store.
//!
//! # Responsibility
//! - Open file or in-memory connections ready for repository use.
//! - Own the schema through an ordered migration registry.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Repositories only accept connections migrated to `latest_version()`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure raised while opening, migrating or querying SQLite.
#[derive(Debug)]
pub enum DbError {
    /// Driver error (I/O, busy timeout, constraint violation, bad SQL).
    Sqlite(rusqlite::Error),
    /// A registered migration failed to apply; the whole batch was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The database was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns whether the store rejected a write because of a constraint
    /// (primary key, `NOT NULL`, `CHECK`, trigger `RAISE(ABORT)`).
    pub fn is_constraint_violation(&self) -> bool {
        let err = match self {
            Self::Sqlite(err) => err,
            Self::Migration { source, .. } => source,
            Self::UnsupportedSchemaVersion { .. } => return false,
        };
        matches!(
            err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::ConstraintViolation)
        )
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(_) => write!(f, "sqlite operation failed"),
            Self::Migration { version, .. } => write!(f, "schema migration {version} failed"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

/// Joins an error and its `source()` chain into one `a: b: c` line for logs.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }
    message
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
