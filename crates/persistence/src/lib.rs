//! Persistence layer for the regatta registration backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the `ConfigStore`,
//!   `GrantStore`, and `AuditSink` ports consumed by the domain engine

pub mod db;
pub mod entities;
pub mod repositories;
