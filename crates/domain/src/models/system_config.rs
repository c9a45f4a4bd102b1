//! Event date configuration and the temporal phase enumeration.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The four mutually exclusive time windows of an event, relative to
/// registration open/close and the payment deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPhase {
    BeforeRegistration,
    DuringRegistration,
    AfterRegistration,
    AfterPaymentDeadline,
}

impl std::fmt::Display for RegistrationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationPhase::BeforeRegistration => write!(f, "before_registration"),
            RegistrationPhase::DuringRegistration => write!(f, "during_registration"),
            RegistrationPhase::AfterRegistration => write!(f, "after_registration"),
            RegistrationPhase::AfterPaymentDeadline => write!(f, "after_payment_deadline"),
        }
    }
}

/// Raw system configuration document as stored. Dates are strings so a
/// malformed value surfaces as a `ConfigurationError` at construction
/// instead of a deserialization failure with no context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SystemConfigRecord {
    pub registration_start: String,
    pub registration_end: String,
    pub payment_deadline: String,
    pub event_date: String,
    #[serde(default = "default_temp_access_hours")]
    pub temp_access_default_hours: u32,
}

fn default_temp_access_hours() -> u32 {
    24
}

/// Validated system configuration with parsed, ordered dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SystemConfig {
    pub registration_start: DateTime<Utc>,
    pub registration_end: DateTime<Utc>,
    pub payment_deadline: DateTime<Utc>,
    pub event_date: DateTime<Utc>,
    pub temp_access_default_hours: u32,
}

impl SystemConfig {
    /// Build a validated config from a raw record. Fails on unparseable
    /// dates or on a violation of start <= end <= deadline <= event date.
    pub fn from_record(record: &SystemConfigRecord) -> Result<Self, DomainError> {
        let registration_start = parse_config_date("registration_start", &record.registration_start)?;
        let registration_end = parse_config_date("registration_end", &record.registration_end)?;
        let payment_deadline = parse_config_date("payment_deadline", &record.payment_deadline)?;
        let event_date = parse_config_date("event_date", &record.event_date)?;

        if registration_start > registration_end {
            return Err(DomainError::configuration(
                "registration_start must not be after registration_end",
            ));
        }
        if registration_end > payment_deadline {
            return Err(DomainError::configuration(
                "registration_end must not be after payment_deadline",
            ));
        }
        if payment_deadline > event_date {
            return Err(DomainError::configuration(
                "payment_deadline must not be after event_date",
            ));
        }

        Ok(Self {
            registration_start,
            registration_end,
            payment_deadline,
            event_date,
            temp_access_default_hours: record.temp_access_default_hours,
        })
    }

    /// Build a validated config from a stored JSON document.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DomainError> {
        let record: SystemConfigRecord = serde_json::from_value(value.clone())
            .map_err(|e| DomainError::configuration(format!("malformed system config: {e}")))?;
        Self::from_record(&record)
    }

    /// The calendar day of the event, used as the reference date for
    /// competition-day age classification.
    pub fn event_day(&self) -> NaiveDate {
        self.event_date.date_naive()
    }
}

fn parse_config_date(field: &str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    parse_flexible_timestamp(raw).ok_or_else(|| {
        DomainError::configuration(format!("{field} is not a valid timestamp: {raw:?}"))
    })
}

/// Parse a timestamp that may be a full RFC 3339 instant, a naive
/// date-time, or a date-only value (taken as midnight UTC).
pub fn parse_flexible_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}
