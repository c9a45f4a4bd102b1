//! The registration rules engine.
//!
//! Six deterministic components, each safe to invoke concurrently:
//! - [`phase`]: maps "now" plus event dates to a registration phase
//! - [`eligibility`]: classifies crews into race categories
//! - [`pricing`]: computes the fee owed for a boat
//! - [`boat_status`]: derives boat lifecycle status and club display
//! - [`temporary_access`]: validates time-boxed override grants
//! - [`permission`]: composes the above into allow/deny decisions
//!
//! [`config`] provides the read-through cached access to the stored
//! configuration documents the other components consume.

pub mod boat_status;
pub mod config;
pub mod eligibility;
pub mod permission;
pub mod phase;
pub mod pricing;
pub mod temporary_access;
