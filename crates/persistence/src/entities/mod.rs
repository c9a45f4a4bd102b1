//! Database entity definitions (row mappings).

pub mod audit_log;
pub mod boat_registration;
pub mod config_document;
pub mod crew_member;
pub mod grant;
pub mod race;
pub mod team;

pub use audit_log::AuditLogEntity;
pub use boat_registration::BoatRegistrationEntity;
pub use config_document::ConfigDocumentEntity;
pub use crew_member::CrewMemberEntity;
pub use grant::GrantEntity;
pub use race::RaceEntity;
pub use team::TeamEntity;
