//! Race reference data and category enumerations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::boat::HullType;

/// Age category of a crew or race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    J16,
    J18,
    Senior,
    Master,
}

impl AgeCategory {
    /// Restrictiveness rank: a single older member pulls the whole crew
    /// up, so master outranks senior outranks j18 outranks j16.
    pub fn rank(&self) -> u8 {
        match self {
            AgeCategory::J16 => 0,
            AgeCategory::J18 => 1,
            AgeCategory::Senior => 2,
            AgeCategory::Master => 3,
        }
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeCategory::J16 => write!(f, "j16"),
            AgeCategory::J18 => write!(f, "j18"),
            AgeCategory::Senior => write!(f, "senior"),
            AgeCategory::Master => write!(f, "master"),
        }
    }
}

/// Gender category of a crew or race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderCategory {
    Women,
    Men,
    Mixed,
}

impl std::fmt::Display for GenderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenderCategory::Women => write!(f, "women"),
            GenderCategory::Men => write!(f, "men"),
            GenderCategory::Mixed => write!(f, "mixed"),
        }
    }
}

/// Master sub-category, bucketed by the crew's mean age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MasterCategory {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl std::fmt::Display for MasterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            MasterCategory::A => "A",
            MasterCategory::B => "B",
            MasterCategory::C => "C",
            MasterCategory::D => "D",
            MasterCategory::E => "E",
            MasterCategory::F => "F",
            MasterCategory::G => "G",
            MasterCategory::H => "H",
        };
        f.write_str(letter)
    }
}

/// A race on the event schedule. Static reference data; exactly one hull
/// type per race.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Race {
    pub id: Uuid,
    pub name: String,
    pub hull_type: HullType,
    pub age_category: AgeCategory,
    pub gender_category: GenderCategory,
    /// Sub-category restriction for master races. A master race without
    /// one accepts any master crew.
    pub master_category: Option<MasterCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_category_rank_ordering() {
        assert!(AgeCategory::Master.rank() > AgeCategory::Senior.rank());
        assert!(AgeCategory::Senior.rank() > AgeCategory::J18.rank());
        assert!(AgeCategory::J18.rank() > AgeCategory::J16.rank());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(AgeCategory::J16.to_string(), "j16");
        assert_eq!(GenderCategory::Mixed.to_string(), "mixed");
        assert_eq!(MasterCategory::C.to_string(), "C");
    }

    #[test]
    fn test_race_serialization() {
        let race = Race {
            id: Uuid::new_v4(),
            name: "Masters Eight".to_string(),
            hull_type: HullType::Eight,
            age_category: AgeCategory::Master,
            gender_category: GenderCategory::Men,
            master_category: Some(MasterCategory::B),
        };
        let json = serde_json::to_string(&race).unwrap();
        assert!(json.contains("\"hull_type\":\"eight\""));
        assert!(json.contains("\"age_category\":\"master\""));
        assert!(json.contains("\"master_category\":\"B\""));
    }
}
