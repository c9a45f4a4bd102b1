//! Boat lifecycle status derivation and club display aggregation.
//!
//! Status recomputation runs on every seat or crew mutation. `paid` and
//! `forfeit` are written by collaborators outside this engine and are
//! treated as locked: given such a snapshot the resolver returns the
//! current status unchanged.

use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::boat::{BoatRegistration, RegistrationStatus};
use crate::models::crew_member::CrewMember;
use crate::models::pricing::PricingConfig;
use crate::services::pricing::is_home_club;

/// Aggregated club affiliation display for a boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClubAggregation {
    pub club_display: String,
    pub club_list: Vec<String>,
    pub is_multi_club: bool,
}

/// Derive the lifecycle status from a consistent boat/crew snapshot.
///
/// Complete requires every seat filled and a race selected; a complete
/// boat whose filled seats are all home-club is free of charge.
pub fn resolve_status(
    boat: &BoatRegistration,
    members: &[CrewMember],
    pricing: &PricingConfig,
) -> RegistrationStatus {
    if boat.registration_status.is_terminal() {
        return boat.registration_status;
    }

    if !boat.is_fully_seated() || boat.race_id.is_none() {
        return RegistrationStatus::Incomplete;
    }

    let by_id: HashMap<Uuid, &CrewMember> = members.iter().map(|m| (m.id, m)).collect();
    let all_home = boat.filled_seats().all(|seat| {
        seat.crew_member_id
            .and_then(|id| by_id.get(&id))
            .map(|m| is_home_club(&m.club_affiliation, pricing))
            .unwrap_or(false)
    });

    if all_home {
        RegistrationStatus::Free
    } else {
        RegistrationStatus::Complete
    }
}

/// Aggregate the distinct club affiliations across filled seats.
///
/// Clubs are deduplicated case-insensitively on the trimmed name; the
/// lexicographically smallest spelling represents each club so the result
/// is independent of seat order. An unseated boat displays the owning
/// team's home club.
pub fn aggregate_clubs(
    boat: &BoatRegistration,
    members: &[CrewMember],
    team_home_club: &str,
) -> ClubAggregation {
    let by_id: HashMap<Uuid, &CrewMember> = members.iter().map(|m| (m.id, m)).collect();

    // Lowercased name -> representative spelling.
    let mut clubs: BTreeMap<String, String> = BTreeMap::new();
    for seat in boat.filled_seats() {
        let Some(member) = seat.crew_member_id.and_then(|id| by_id.get(&id)) else {
            continue;
        };
        let trimmed = member.club_affiliation.trim();
        if trimmed.is_empty() {
            continue;
        }
        clubs
            .entry(trimmed.to_lowercase())
            .and_modify(|repr| {
                if trimmed < repr.as_str() {
                    *repr = trimmed.to_string();
                }
            })
            .or_insert_with(|| trimmed.to_string());
    }

    if clubs.is_empty() {
        return ClubAggregation {
            club_display: team_home_club.to_string(),
            club_list: vec![team_home_club.to_string()],
            is_multi_club: false,
        };
    }

    // BTreeMap iteration over lowercased keys gives the case-insensitive
    // sort order.
    let club_list: Vec<String> = clubs.into_values().collect();
    let is_multi_club = club_list.len() > 1;
    let club_display = club_list.join(", ");

    ClubAggregation {
        club_display,
        club_list,
        is_multi_club,
    }
}
