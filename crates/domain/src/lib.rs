//! Domain layer for the regatta registration backend.
//!
//! This crate contains:
//! - Domain models (crews, boats, races, configuration, grants, audit)
//! - The registration rules engine (phase resolution, eligibility,
//!   pricing, boat status, temporary access, permission evaluation)
//! - Collaborator ports implemented by the persistence layer
//! - Domain error types

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::DomainError;
