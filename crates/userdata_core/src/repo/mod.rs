//! Repository contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define the storage-agnostic CRUD contract (`crud`).
//! - Keep SQL inside the persistence boundary (`user_repo`).
//!
//! # Invariants
//! - Missing rows are `Ok(None)` / no-ops, never errors.
//! - Every failure surfaces as `StorageFailure`, unchanged and unretried.

pub mod crud;
mod schema;
pub mod user_repo;
