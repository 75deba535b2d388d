//! Domain records persisted by the user store.
//!
//! # Invariants
//! - A persisted record always carries its storage-assigned identifier.
//! - Records without an identifier are a distinct type, never a sentinel id.

pub mod user;
