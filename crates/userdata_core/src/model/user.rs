//! User record and its create-vs-update input shape.
//!
//! # Invariants
//! - `User::id` is assigned by storage and never changes afterwards.
//! - `email` carries no uniqueness or format rule; any such rule belongs to
//!   the schema, not to this type.

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier of a user row.
pub type UserId = i64;

/// Person known to the system, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Free-text display name.
    pub name: String,
    /// Free-text contact address.
    pub email: String,
}

/// User that has not been persisted yet and therefore has no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Input to a repository `save`: either a record without identity, or one
/// carrying an identifier that should be inserted or updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRecord<N, E> {
    /// Storage assigns the identifier.
    New(N),
    /// Upsert keyed by the record's identifier.
    Existing(E),
}

/// Save input specialised to users.
pub type UserRecord = SaveRecord<NewUser, User>;

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attaches a storage-assigned identifier.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

impl From<NewUser> for UserRecord {
    fn from(value: NewUser) -> Self {
        Self::New(value)
    }
}

impl From<User> for UserRecord {
    fn from(value: User) -> Self {
        Self::Existing(value)
    }
}

impl<N, E> SaveRecord<N, E> {
    /// Returns whether storage must assign a fresh identifier.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}
