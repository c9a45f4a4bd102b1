//! Temporal phase resolution.

use chrono::{DateTime, Utc};

use crate::models::system_config::{RegistrationPhase, SystemConfig};

/// Classify an instant into one of the four registration phases.
///
/// The four intervals are contiguous and non-overlapping; both the
/// registration start and end instants belong to `during_registration`.
pub fn resolve_phase(now: DateTime<Utc>, config: &SystemConfig) -> RegistrationPhase {
    if now < config.registration_start {
        RegistrationPhase::BeforeRegistration
    } else if now <= config.registration_end {
        RegistrationPhase::DuringRegistration
    } else if now <= config.payment_deadline {
        RegistrationPhase::AfterRegistration
    } else {
        RegistrationPhase::AfterPaymentDeadline
    }
}
