//! Repository implementations for database operations.

pub mod audit_log;
pub mod boat_registration;
pub mod config;
pub mod crew_member;
pub mod race;
pub mod team;
pub mod temporary_access;

pub use audit_log::AuditLogRepository;
pub use boat_registration::BoatRegistrationRepository;
pub use config::ConfigRepository;
pub use crew_member::CrewMemberRepository;
pub use race::RaceRepository;
pub use team::TeamRepository;
pub use temporary_access::GrantRepository;

/// Maps a database error into the domain's storage error variant.
pub(crate) fn store_error(context: &str, err: sqlx::Error) -> domain::DomainError {
    domain::DomainError::store(format!("{context}: {err}"))
}
