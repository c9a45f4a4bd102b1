//! Domain models for the regatta registration backend.

pub mod audit_log;
pub mod boat;
pub mod crew_member;
pub mod permission;
pub mod pricing;
pub mod race;
pub mod system_config;
pub mod temporary_access;

pub use audit_log::{AuditKind, AuditLogEntry};
pub use boat::{BoatRegistration, HullType, RegistrationStatus, Seat, SeatRole};
pub use crew_member::{CrewMember, Gender};
pub use permission::{default_permissions, ActionRule, PermissionDecision, PermissionMatrix};
pub use pricing::{PriceLineItem, PricingBreakdown, PricingConfig};
pub use race::{AgeCategory, GenderCategory, MasterCategory, Race};
pub use system_config::{parse_flexible_timestamp, RegistrationPhase, SystemConfig};
pub use temporary_access::{GrantStatus, TemporaryAccessGrant};
