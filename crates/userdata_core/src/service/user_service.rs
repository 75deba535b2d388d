//! User use-case service.
//!
//! # Invariants
//! - Every call goes through the repository; nothing is cached here.
//! - Repository errors are returned unchanged.

use crate::model::user::{NewUser, User, UserId, UserRecord};
use crate::repo::crud::{RepoResult, UserRepository};

/// Use-case entry points for user records.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user and returns it with the assigned identifier.
    pub fn register_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> RepoResult<User> {
        self.repo.save(NewUser::new(name, email).into())
    }

    /// Inserts a draft or upserts an identified user.
    pub fn save_user(&self, record: impl Into<UserRecord>) -> RepoResult<User> {
        self.repo.save(record.into())
    }

    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.repo.find_by_id(id)
    }

    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.find_all()
    }

    pub fn user_exists(&self, id: UserId) -> RepoResult<bool> {
        self.repo.exists_by_id(id)
    }

    pub fn count_users(&self) -> RepoResult<u64> {
        self.repo.count()
    }

    /// Removes one user; unknown ids are a no-op.
    pub fn remove_user(&self, id: UserId) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }

    pub fn remove_all_users(&self) -> RepoResult<()> {
        self.repo.delete_all()
    }

    /// Returns the wrapped repository.
    pub fn into_inner(self) -> R {
        self.repo
    }
}
