//! Common validation utilities.

use chrono::{Datelike, NaiveDate, Utc};
use validator::ValidationError;

/// Maximum length of a club affiliation string.
const MAX_CLUB_NAME_LENGTH: usize = 120;

/// Maximum length of a person or boat name.
const MAX_NAME_LENGTH: usize = 100;

/// Oldest plausible birth year relative to today.
const MAX_MEMBER_AGE_YEARS: i32 = 110;

/// Validates that a club affiliation is non-empty after trimming and within
/// the length limit.
pub fn validate_club_name(club: &str) -> Result<(), ValidationError> {
    let trimmed = club.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("club_empty");
        err.message = Some("Club affiliation must not be empty".into());
        return Err(err);
    }
    if trimmed.len() > MAX_CLUB_NAME_LENGTH {
        let mut err = ValidationError::new("club_too_long");
        err.message = Some("Club affiliation must be at most 120 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Validates that a display name is non-empty and within the length limit.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("name_empty");
        err.message = Some("Name must not be empty".into());
        return Err(err);
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("name_too_long");
        err.message = Some("Name must be at most 100 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Oldest date of birth still accepted, relative to the given day.
/// Feb 29 has no counterpart in a non-leap target year; Feb 28 of that
/// year keeps the bound a full lifetime in the past.
fn oldest_plausible_dob(today: NaiveDate) -> NaiveDate {
    let year = today.year() - MAX_MEMBER_AGE_YEARS;
    today
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(NaiveDate::MIN)
}

/// Validates that a date of birth is in the past and not implausibly old.
pub fn validate_date_of_birth(dob: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if *dob >= today {
        let mut err = ValidationError::new("dob_future");
        err.message = Some("Date of birth must be in the past".into());
        return Err(err);
    }
    if *dob < oldest_plausible_dob(today) {
        let mut err = ValidationError::new("dob_implausible");
        err.message = Some("Date of birth is implausibly far in the past".into());
        return Err(err);
    }
    Ok(())
}

/// Normalizes a club affiliation for comparison: trimmed and lowercased.
pub fn normalize_club(club: &str) -> String {
    club.trim().to_lowercase()
}
