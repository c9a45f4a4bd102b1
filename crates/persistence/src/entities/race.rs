//! Race entity.

use domain::models::{AgeCategory, GenderCategory, MasterCategory, Race};
use domain::DomainError;
use sqlx::FromRow;
use uuid::Uuid;

use super::boat_registration::hull_type_from_str;

/// Database entity for a race row. Races are static reference data seeded
/// by migration.
#[derive(Debug, Clone, FromRow)]
pub struct RaceEntity {
    pub id: Uuid,
    pub name: String,
    pub hull_type: String,
    pub age_category: String,
    pub gender_category: String,
    pub master_category: Option<String>,
}

fn age_category_from_str(value: &str) -> Option<AgeCategory> {
    match value {
        "j16" => Some(AgeCategory::J16),
        "j18" => Some(AgeCategory::J18),
        "senior" => Some(AgeCategory::Senior),
        "master" => Some(AgeCategory::Master),
        _ => None,
    }
}

fn gender_category_from_str(value: &str) -> Option<GenderCategory> {
    match value {
        "women" => Some(GenderCategory::Women),
        "men" => Some(GenderCategory::Men),
        "mixed" => Some(GenderCategory::Mixed),
        _ => None,
    }
}

fn master_category_from_str(value: &str) -> Option<MasterCategory> {
    match value {
        "A" => Some(MasterCategory::A),
        "B" => Some(MasterCategory::B),
        "C" => Some(MasterCategory::C),
        "D" => Some(MasterCategory::D),
        "E" => Some(MasterCategory::E),
        "F" => Some(MasterCategory::F),
        "G" => Some(MasterCategory::G),
        "H" => Some(MasterCategory::H),
        _ => None,
    }
}

impl RaceEntity {
    pub fn into_domain(self) -> Result<Race, DomainError> {
        let hull_type = hull_type_from_str(&self.hull_type).ok_or_else(|| {
            DomainError::store(format!(
                "unknown hull type {:?} for race {}",
                self.hull_type, self.id
            ))
        })?;
        let age_category = age_category_from_str(&self.age_category).ok_or_else(|| {
            DomainError::store(format!(
                "unknown age category {:?} for race {}",
                self.age_category, self.id
            ))
        })?;
        let gender_category = gender_category_from_str(&self.gender_category).ok_or_else(|| {
            DomainError::store(format!(
                "unknown gender category {:?} for race {}",
                self.gender_category, self.id
            ))
        })?;
        let master_category = match self.master_category.as_deref() {
            None => None,
            Some(raw) => Some(master_category_from_str(raw).ok_or_else(|| {
                DomainError::store(format!(
                    "unknown master category {raw:?} for race {}",
                    self.id
                ))
            })?),
        };
        Ok(Race {
            id: self.id,
            name: self.name,
            hull_type,
            age_category,
            gender_category,
            master_category,
        })
    }
}
