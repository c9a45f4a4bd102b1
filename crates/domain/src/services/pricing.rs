//! Fee computation for boat registrations.
//!
//! Home-club seats are free; every other filled seat costs the base seat
//! price. Rentals add a surcharge that depends on the hull. Multi-club
//! crews affect display only, never price. The whole path stays in
//! `Decimal` arithmetic.

use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::boat::{BoatRegistration, HullType};
use crate::models::crew_member::CrewMember;
use crate::models::pricing::{PriceLineItem, PricingBreakdown, PricingConfig};
use shared::validation::normalize_club;

/// Whether an affiliation belongs to the home club: case-insensitive
/// containment of the club name or one of its alias spellings.
pub fn is_home_club(affiliation: &str, config: &PricingConfig) -> bool {
    let normalized = normalize_club(affiliation);
    config
        .home_club_tokens()
        .iter()
        .any(|token| normalized.contains(token))
}

/// Compute the itemized fee for a boat given its crew snapshot.
///
/// A boat with zero filled seats prices to zero with no breakdown, rental
/// flag or not.
pub fn price_boat(
    boat: &BoatRegistration,
    members: &[CrewMember],
    config: &PricingConfig,
) -> Result<PricingBreakdown, DomainError> {
    config.validate()?;

    let by_id: HashMap<Uuid, &CrewMember> = members.iter().map(|m| (m.id, m)).collect();

    let mut filled = Vec::new();
    for seat in boat.filled_seats() {
        let Some(member_id) = seat.crew_member_id else {
            continue;
        };
        let member = by_id.get(&member_id).copied().ok_or_else(|| {
            DomainError::validation(format!(
                "seat {} references unknown crew member {member_id}",
                seat.position
            ))
        })?;
        filled.push((seat, member));
    }

    if filled.is_empty() {
        return Ok(PricingBreakdown::zero(&config.currency));
    }

    let mut items = Vec::with_capacity(filled.len() + 1);
    let mut total = Decimal::ZERO;

    for (seat, member) in &filled {
        let home = is_home_club(&member.club_affiliation, config);
        let amount = if home {
            Decimal::ZERO
        } else {
            config.base_seat_price
        };
        let description = if home {
            format!("Seat {}: {} (home club)", seat.position, member.full_name())
        } else {
            format!("Seat {}: {}", seat.position, member.full_name())
        };
        total += amount;
        items.push(PriceLineItem {
            seat_position: Some(seat.position),
            crew_member_id: Some(member.id),
            description,
            amount,
        });
    }

    if boat.is_rental {
        let (description, amount) = match boat.hull_type {
            HullType::Skiff => (
                "Skiff rental".to_string(),
                config.base_seat_price * config.rental_multiplier_skiff,
            ),
            _ => {
                let seats = Decimal::from(filled.len() as u64);
                (
                    format!("Boat rental ({} seats)", filled.len()),
                    config.rental_price_crew * seats,
                )
            }
        };
        total += amount;
        items.push(PriceLineItem {
            seat_position: None,
            crew_member_id: None,
            description,
            amount,
        });
    }

    Ok(PricingBreakdown {
        items,
        total,
        currency: config.currency.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::boat::SeatRole;
    use chrono::NaiveDate;
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

    fn member(club: &str) -> CrewMember {
        CrewMember {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "Rower".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 5, 5).unwrap(),
            gender: crate::models::Gender::Female,
            club_affiliation: club.to_string(),
            assigned_boat_id: None,
        }
    }

    /// Boat with every seat filled by the given members, in layout order.
    fn seated_boat(hull: HullType, members: &[CrewMember]) -> BoatRegistration {
        let mut boat =
            BoatRegistration::new(Uuid::new_v4(), Uuid::new_v4(), "regatta".to_string(), hull);
        for (seat, member) in boat.seats.iter_mut().zip(members) {
            seat.crew_member_id = Some(member.id);
        }
        boat
    }

    #[test]
    fn test_home_club_match_is_case_insensitive_containment() {
        let config = config();
        assert!(is_home_club("Ruderclub Neptun", &config));
        assert!(is_home_club("RUDERCLUB NEPTUN 1925", &config));
        assert!(is_home_club("rc neptun", &config));
        assert!(is_home_club("Mitglied Neptun e.V.", &config));
        assert!(!is_home_club("RC Hansa", &config));
    }

    #[test]
    fn test_empty_boat_prices_to_zero() {
        let boat = BoatRegistration::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "regatta".to_string(),
            HullType::Eight,
        );
        let breakdown = price_boat(&boat, &[], &config()).unwrap();
        assert_eq!(breakdown.total, Decimal::ZERO);
        assert!(breakdown.items.is_empty());

        // Rental flag changes nothing for an empty boat.
        let mut rental = boat;
        rental.is_rental = true;
        let breakdown = price_boat(&rental, &[], &config()).unwrap();
        assert_eq!(breakdown.total, Decimal::ZERO);
        assert!(breakdown.items.is_empty());
    }

    #[test]
    fn test_worked_example_eight_with_home_crew() {
        // 8 home-club rowers + 1 non-home cox, base 20.00, no rental:
        // total 20.00.
        let mut members: Vec<CrewMember> =
            (0..8).map(|_| member("Ruderclub Neptun")).collect();
        members.push(member("RC Hansa"));
        // Put the non-home member in the cox seat (position 0).
        let mut boat = BoatRegistration::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "regatta".to_string(),
            HullType::Eight,
        );
        boat.seat_at_mut(0).unwrap().crew_member_id = Some(members[8].id);
        for (i, seat) in boat
            .seats
            .iter_mut()
            .filter(|s| s.role == SeatRole::Rower)
            .enumerate()
        {
            seat.crew_member_id = Some(members[i].id);
        }

        let breakdown = price_boat(&boat, &members, &config()).unwrap();
        assert_eq!(breakdown.total, dec!(20.00));
        assert_eq!(breakdown.items.len(), 9);

        // Same crew, rental eight: 20.00 + 20.00 * 9 = 200.00.
        let mut rental = boat.clone();
        rental.is_rental = true;
        let breakdown = price_boat(&rental, &members, &config()).unwrap();
        assert_eq!(breakdown.total, dec!(200.00));
        assert_eq!(breakdown.items.len(), 10);
    }

    #[test]
    fn test_skiff_rental_uses_multiplier() {
        let members = vec![member("RC Hansa")];
        let mut boat = seated_boat(HullType::Skiff, &members);
        boat.is_rental = true;
        let breakdown = price_boat(&boat, &members, &config()).unwrap();
        // 20.00 seat + 20.00 * 1.5 rental
        assert_eq!(breakdown.total, dec!(50.00));

        let without = {
            let mut b = boat.clone();
            b.is_rental = false;
            price_boat(&b, &members, &config()).unwrap()
        };
        // Toggling rental on a skiff adds exactly base * multiplier.
        assert_eq!(breakdown.total - without.total, dec!(30.00));
    }

    #[test]
    fn test_pricing_is_monotonic_in_non_home_seats() {
        let config = config();
        let members: Vec<CrewMember> = (0..4).map(|_| member("RC Hansa")).collect();
        let mut boat = BoatRegistration::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "regatta".to_string(),
            HullType::CoxlessFour,
        );

        let mut last_total = Decimal::ZERO;
        for i in 0..4 {
            boat.seats[i].crew_member_id = Some(members[i].id);
            let total = price_boat(&boat, &members, &config).unwrap().total;
            assert!(total >= last_total);
            last_total = total;
        }
        assert_eq!(last_total, dec!(80.00));
    }

    #[test]
    fn test_multi_club_does_not_change_price() {
        let same_club: Vec<CrewMember> = (0..4).map(|_| member("RC Hansa")).collect();
        let mixed_clubs = vec![
            member("RC Hansa"),
            member("RV Weser"),
            member("RC Alster"),
            member("RG Elbe"),
        ];
        let a = seated_boat(HullType::CoxlessFour, &same_club);
        let b = seated_boat(HullType::CoxlessFour, &mixed_clubs);
        assert_eq!(
            price_boat(&a, &same_club, &config()).unwrap().total,
            price_boat(&b, &mixed_clubs, &config()).unwrap().total
        );
    }

    #[test]
    fn test_unknown_member_is_validation_error() {
        let members = vec![member("RC Hansa")];
        let mut boat = seated_boat(HullType::Skiff, &members);
        boat.seats[0].crew_member_id = Some(Uuid::new_v4());
        assert!(matches!(
            price_boat(&boat, &members, &config()).unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn test_crew_rental_charges_filled_seats_only() {
        // Two of four seats filled on a rental four: rental is per filled
        // seat.
        let members = vec![member("RC Hansa"), member("RV Weser")];
        let mut boat = BoatRegistration::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "regatta".to_string(),
            HullType::CoxlessFour,
        );
        boat.seats[0].crew_member_id = Some(members[0].id);
        boat.seats[1].crew_member_id = Some(members[1].id);
        boat.is_rental = true;
        let breakdown = price_boat(&boat, &members, &config()).unwrap();
        // 2 seats * 20.00 + rental 2 * 20.00
        assert_eq!(breakdown.total, dec!(80.00));
    }
}
