//! Boat registration domain model: hull types, seats, and lifecycle status.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Physical boat class, constraining crew size and seat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HullType {
    /// Single scull, one rower.
    Skiff,
    /// Sweep four without cox.
    CoxlessFour,
    /// Sweep or scull four with cox.
    CoxedFour,
    /// Eight with cox.
    Eight,
}

impl HullType {
    /// Number of seats in the hull, cox included.
    pub fn seat_count(&self) -> usize {
        match self {
            HullType::Skiff => 1,
            HullType::CoxlessFour => 4,
            HullType::CoxedFour => 5,
            HullType::Eight => 9,
        }
    }

    /// Whether a crew of the given size can row this hull. Eights accept
    /// eight rowers with or without a dedicated cox on the roster.
    pub fn matches_crew_size(&self, size: usize) -> bool {
        match self {
            HullType::Skiff => size == 1,
            HullType::CoxlessFour => size == 4,
            HullType::CoxedFour => size == 5,
            HullType::Eight => size == 8 || size == 9,
        }
    }

    /// Hull type a crew of the given size is eligible for, if any.
    pub fn for_crew_size(size: usize) -> Option<HullType> {
        match size {
            1 => Some(HullType::Skiff),
            4 => Some(HullType::CoxlessFour),
            5 => Some(HullType::CoxedFour),
            8 | 9 => Some(HullType::Eight),
            _ => None,
        }
    }

    /// Fixed seat layout for the hull. The cox seat, where present, is
    /// position 0; rowing seats are numbered from bow.
    pub fn seat_layout(&self) -> Vec<Seat> {
        let mut seats = Vec::with_capacity(self.seat_count());
        let (rowers, has_cox) = match self {
            HullType::Skiff => (1, false),
            HullType::CoxlessFour => (4, false),
            HullType::CoxedFour => (4, true),
            HullType::Eight => (8, true),
        };
        if has_cox {
            seats.push(Seat::empty(0, SeatRole::Cox));
        }
        for position in 1..=rowers {
            seats.push(Seat::empty(position as i32, SeatRole::Rower));
        }
        seats
    }
}

impl std::fmt::Display for HullType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HullType::Skiff => write!(f, "skiff"),
            HullType::CoxlessFour => write!(f, "coxless_four"),
            HullType::CoxedFour => write!(f, "coxed_four"),
            HullType::Eight => write!(f, "eight"),
        }
    }
}

/// Role of a seat occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatRole {
    Rower,
    Cox,
}

/// A single seat in a boat. At most one crew member per seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Seat {
    pub position: i32,
    pub role: SeatRole,
    pub crew_member_id: Option<Uuid>,
}

impl Seat {
    pub fn empty(position: i32, role: SeatRole) -> Self {
        Self {
            position,
            role,
            crew_member_id: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.crew_member_id.is_some()
    }
}

/// Lifecycle status of a boat registration.
///
/// `incomplete`, `complete`, and `free` are derived from seat-fill state;
/// `paid` is written only by the payment collaborator and `forfeit` only
/// by admin action. Both of the latter are terminal for recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Incomplete,
    Complete,
    Free,
    Paid,
    Forfeit,
}

impl RegistrationStatus {
    /// Terminal states block automatic status recomputation and, for
    /// `paid`, ordinary edit and delete actions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RegistrationStatus::Paid | RegistrationStatus::Forfeit)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::Incomplete => write!(f, "incomplete"),
            RegistrationStatus::Complete => write!(f, "complete"),
            RegistrationStatus::Free => write!(f, "free"),
            RegistrationStatus::Paid => write!(f, "paid"),
            RegistrationStatus::Forfeit => write!(f, "forfeit"),
        }
    }
}

/// A boat registered for the event by a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BoatRegistration {
    pub id: Uuid,
    /// Owning team.
    pub team_id: Uuid,
    pub event_type: String,
    pub hull_type: HullType,
    /// Selected race, if one has been chosen.
    pub race_id: Option<Uuid>,
    pub seats: Vec<Seat>,
    pub is_rental: bool,
    pub registration_status: RegistrationStatus,
    /// Aggregated club display string, see the boat status resolver.
    pub club_display: String,
    pub club_list: Vec<String>,
    pub is_multi_club: bool,
}

impl BoatRegistration {
    /// Create a fresh registration with the hull's empty seat layout.
    pub fn new(id: Uuid, team_id: Uuid, event_type: String, hull_type: HullType) -> Self {
        Self {
            id,
            team_id,
            event_type,
            hull_type,
            race_id: None,
            seats: hull_type.seat_layout(),
            is_rental: false,
            registration_status: RegistrationStatus::Incomplete,
            club_display: String::new(),
            club_list: Vec::new(),
            is_multi_club: false,
        }
    }

    /// Seats currently occupied by a crew member.
    pub fn filled_seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| s.is_filled())
    }

    pub fn filled_seat_count(&self) -> usize {
        self.filled_seats().count()
    }

    pub fn is_fully_seated(&self) -> bool {
        self.seats.iter().all(Seat::is_filled)
    }

    pub fn seat_at(&self, position: i32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.position == position)
    }

    pub fn seat_at_mut(&mut self, position: i32) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.position == position)
    }
}
