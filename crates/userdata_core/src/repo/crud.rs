//! Generic CRUD repository contract.
//!
//! # Responsibility
//! - Describe create/read/delete access to one record type keyed by a unique
//!   identifier, independent of the backing store.
//! - Define the single error kind (`StorageFailure`) surfaced by repositories.

use crate::db::DbError;
use crate::model::user::{NewUser, SaveRecord, User, UserId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, StorageFailure>;

/// The store could not complete a request.
///
/// Variants classify the cause for diagnostics; callers that only need to
/// know "the storage layer failed" can treat them alike.
#[derive(Debug)]
pub enum StorageFailure {
    /// Driver-level failure: connectivity, busy timeout, constraint violation.
    Db(DbError),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from an expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A persisted row cannot be turned into a record.
    InvalidData(String),
}

impl StorageFailure {
    /// Returns whether the store rejected the write because of a constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Db(err) => err.is_constraint_violation(),
            _ => false,
        }
    }
}

impl Display for StorageFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(_) => write!(f, "storage failure"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StorageFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StorageFailure {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageFailure {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD access to one record type.
///
/// Implementations hold no cache; every call is one independent request to
/// the store. No ordering is promised by `find_all`.
pub trait CrudRepository {
    /// Unique key assigned by the store.
    type Id: Copy;
    /// Persisted record, identifier included.
    type Entity;
    /// Record that has not been assigned an identifier yet.
    type Draft;

    /// Inserts a draft, or upserts an entity keyed by its identifier.
    /// Returns the persisted record with its identifier populated.
    fn save(&self, record: SaveRecord<Self::Draft, Self::Entity>) -> RepoResult<Self::Entity>;

    /// Loads one record. `Ok(None)` when no row has this identifier.
    fn find_by_id(&self, id: Self::Id) -> RepoResult<Option<Self::Entity>>;

    /// Loads every persisted record.
    fn find_all(&self) -> RepoResult<Vec<Self::Entity>>;

    /// Removes the record if present. Absent identifiers are a no-op.
    fn delete_by_id(&self, id: Self::Id) -> RepoResult<()>;

    /// Returns whether a record with this identifier exists.
    fn exists_by_id(&self, id: Self::Id) -> RepoResult<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Number of persisted records.
    fn count(&self) -> RepoResult<u64>;

    /// Removes every record.
    fn delete_all(&self) -> RepoResult<()>;
}

/// CRUD contract specialised to users.
pub trait UserRepository: CrudRepository<Id = UserId, Entity = User, Draft = NewUser> {}

impl<T> UserRepository for T where T: CrudRepository<Id = UserId, Entity = User, Draft = NewUser> {}
