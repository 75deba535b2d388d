//! SQLite implementation of the user repository.
//!
//! # Responsibility
//! - Map `CrudRepository` operations onto explicit SQL over `users`.
//!
//! # Invariants
//! - Identifiers come from `AUTOINCREMENT`, so deleted ids are never reissued.
//! - Saving an `Existing` record upserts by primary key.
//! - Log lines carry ids and counts only, never names or emails.

use super::crud::{CrudRepository, RepoResult, StorageFailure};
use super::schema::ensure_table_ready;
use crate::db::error_chain;
use crate::model::user::{NewUser, User, UserId, UserRecord};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USERS_TABLE: &str = "users";
const USER_COLUMNS: [&str; 3] = ["id", "name", "email"];
const USER_SELECT_SQL: &str = "SELECT id, name, email FROM users";

/// SQLite-backed user repository over a borrowed, migrated connection.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Creates a repository from a connection returned by `open_db*`.
    ///
    /// # Errors
    /// Rejects connections that are not migrated or lack the `users` shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, USERS_TABLE, &USER_COLUMNS)?;
        Ok(Self { conn })
    }

    fn insert(&self, user: NewUser) -> RepoResult<User> {
        self.conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2);",
            params![user.name, user.email],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=user_save module=repo status=ok mode=insert id={id}");
        Ok(user.with_id(id))
    }

    fn upsert(&self, user: User) -> RepoResult<User> {
        self.conn.execute(
            "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email;",
            params![user.id, user.name, user.email],
        )?;
        debug!(
            "event=user_save module=repo status=ok mode=upsert id={}",
            user.id
        );
        Ok(user)
    }
}

impl CrudRepository for SqliteUserRepository<'_> {
    type Id = UserId;
    type Entity = User;
    type Draft = NewUser;

    fn save(&self, record: UserRecord) -> RepoResult<User> {
        logged("user_save", || match record {
            UserRecord::New(user) => self.insert(user),
            UserRecord::Existing(user) => self.upsert(user),
        })
    }

    fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        logged("user_find_by_id", || {
            let mut stmt = self
                .conn
                .prepare_cached(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
            let row = stmt.query_row([id], read_user_row).optional()?;
            row.map(parse_user_row).transpose()
        })
    }

    fn find_all(&self) -> RepoResult<Vec<User>> {
        logged("user_find_all", || {
            let mut stmt = self
                .conn
                .prepare_cached(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
            let rows = stmt.query_map([], read_user_row)?;

            let mut users = Vec::new();
            for row in rows {
                users.push(parse_user_row(row?)?);
            }
            debug!(
                "event=user_find_all module=repo status=ok count={}",
                users.len()
            );
            Ok(users)
        })
    }

    fn delete_by_id(&self, id: UserId) -> RepoResult<()> {
        logged("user_delete", || {
            let removed = self.conn.execute("DELETE FROM users WHERE id = ?1;", [id])?;
            debug!("event=user_delete module=repo status=ok id={id} removed={removed}");
            Ok(())
        })
    }

    fn exists_by_id(&self, id: UserId) -> RepoResult<bool> {
        logged("user_exists", || {
            let exists: i64 = self.conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1);",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists == 1)
        })
    }

    fn count(&self) -> RepoResult<u64> {
        logged("user_count", || {
            let count: i64 = self
                .conn
                .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
            u64::try_from(count)
                .map_err(|_| StorageFailure::InvalidData(format!("negative row count `{count}`")))
        })
    }

    fn delete_all(&self) -> RepoResult<()> {
        logged("user_delete_all", || {
            let removed = self.conn.execute("DELETE FROM users;", [])?;
            debug!("event=user_delete_all module=repo status=ok removed={removed}");
            Ok(())
        })
    }
}

/// Runs one repository operation and emits a `status=error` event if it fails.
fn logged<T>(event: &'static str, op: impl FnOnce() -> RepoResult<T>) -> RepoResult<T> {
    let result = op();
    if let Err(err) = &result {
        warn!(
            "event={event} module=repo status=error error={}",
            error_chain(err)
        );
    }
    result
}

/// Raw column values; `name`/`email` may be NULL in a hand-edited database.
type RawUserRow = (UserId, Option<String>, Option<String>);

fn read_user_row(row: &Row<'_>) -> rusqlite::Result<RawUserRow> {
    Ok((row.get("id")?, row.get("name")?, row.get("email")?))
}

fn parse_user_row((id, name, email): RawUserRow) -> RepoResult<User> {
    let name = name
        .ok_or_else(|| StorageFailure::InvalidData(format!("NULL users.name for id {id}")))?;
    let email = email
        .ok_or_else(|| StorageFailure::InvalidData(format!("NULL users.email for id {id}")))?;
    Ok(User { id, name, email })
}
