//! Shared utilities and common types for the regatta registration backend.
//!
//! This crate provides common functionality used across all other crates:
//! - TTL-bounded snapshot cache for configuration documents
//! - Common validation logic

pub mod cache;
pub mod validation;
