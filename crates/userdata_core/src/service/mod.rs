//! Use-case services over repository contracts.
//!
//! Services stay storage-agnostic: they are generic over the repository
//! trait and never touch SQL.

pub mod user_service;
