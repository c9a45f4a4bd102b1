//! Pricing configuration and fee breakdown models.
//!
//! All monetary values stay in fixed-point decimal arithmetic; binary
//! floating point never enters the fee path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use shared::validation::normalize_club;

/// Pricing configuration, updated by admins and versioned only by
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PricingConfig {
    /// Fee per filled non-home-club seat.
    pub base_seat_price: Decimal,
    /// Rental surcharge multiplier for single-occupant hulls.
    pub rental_multiplier_skiff: Decimal,
    /// Per-seat rental price for crew boats.
    pub rental_price_crew: Decimal,
    pub currency: String,
    /// Name of the organization hosting the event. Members affiliated
    /// with it are exempt from the per-seat fee.
    pub home_club_name: String,
    /// Known alias spellings of the home club.
    #[serde(default)]
    pub home_club_aliases: Vec<String>,
}

impl PricingConfig {
    /// Validate value ranges: all prices non-negative, multiplier
    /// strictly positive, currency and home club name present.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.base_seat_price < Decimal::ZERO {
            return Err(DomainError::configuration(
                "base_seat_price must not be negative",
            ));
        }
        if self.rental_multiplier_skiff <= Decimal::ZERO {
            return Err(DomainError::configuration(
                "rental_multiplier_skiff must be positive",
            ));
        }
        if self.rental_price_crew < Decimal::ZERO {
            return Err(DomainError::configuration(
                "rental_price_crew must not be negative",
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(DomainError::configuration("currency must not be empty"));
        }
        if self.home_club_name.trim().is_empty() {
            return Err(DomainError::configuration(
                "home_club_name must not be empty",
            ));
        }
        Ok(())
    }

    /// Build a validated config from a stored JSON document.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DomainError> {
        let config: PricingConfig = serde_json::from_value(value.clone())
            .map_err(|e| DomainError::configuration(format!("malformed pricing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Normalized home-club tokens: the club name plus its aliases.
    pub fn home_club_tokens(&self) -> Vec<String> {
        std::iter::once(self.home_club_name.as_str())
            .chain(self.home_club_aliases.iter().map(String::as_str))
            .map(normalize_club)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// One line of a pricing breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceLineItem {
    /// Seat position the charge refers to, absent for rental charges.
    pub seat_position: Option<i32>,
    pub crew_member_id: Option<Uuid>,
    pub description: String,
    pub amount: Decimal,
}

/// Itemized fee for a boat registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PricingBreakdown {
    pub items: Vec<PriceLineItem>,
    pub total: Decimal,
    pub currency: String,
}

impl PricingBreakdown {
    /// Breakdown for a boat with no filled seats.
    pub fn zero(currency: &str) -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
            currency: currency.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> PricingConfig {
        PricingConfig {
            base_seat_price: dec!(20.00),
            rental_multiplier_skiff: dec!(1.5),
            rental_price_crew: dec!(20.00),
            currency: "EUR".to_string(),
            home_club_name: "Ruderclub Neptun".to_string(),
            home_club_aliases: vec!["RC Neptun".to_string(), "Neptun e.V.".to_string()],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut c = config();
        c.base_seat_price = dec!(-1);
        assert!(matches!(
            c.validate().unwrap_err(),
            DomainError::Configuration(_)
        ));
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        let mut c = config();
        c.rental_multiplier_skiff = Decimal::ZERO;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_home_club_tokens_normalized() {
        let tokens = config().home_club_tokens();
        assert_eq!(
            tokens,
            vec!["ruderclub neptun", "rc neptun", "neptun e.v."]
        );
    }

    #[test]
    fn test_from_value_malformed() {
        let err =
            PricingConfig::from_value(&serde_json::json!({ "base_seat_price": "x" })).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn test_zero_breakdown() {
        let breakdown = PricingBreakdown::zero("EUR");
        assert_eq!(breakdown.total, Decimal::ZERO);
        assert!(breakdown.items.is_empty());
        assert_eq!(breakdown.currency, "EUR");
    }
}
