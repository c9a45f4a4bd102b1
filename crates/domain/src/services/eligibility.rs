//! Crew eligibility classification.
//!
//! Maps a crew's member ages and genders to race categories and an
//! eligible hull type, and decides which races the crew may enter.
//! Ages are calendar-aware throughout: a member has not aged up until
//! their birthday has passed on the reference date. Competition-day
//! classification uses the event date as the reference.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::DomainError;
use crate::models::boat::HullType;
use crate::models::crew_member::{CrewMember, Gender};
use crate::models::race::{AgeCategory, GenderCategory, MasterCategory, Race};

/// Classification of a crew for race entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CrewClassification {
    pub crew_size: usize,
    pub age_category: AgeCategory,
    pub gender_category: GenderCategory,
    /// Present only for master crews.
    pub master_category: Option<MasterCategory>,
    /// Hull the crew size maps to; absent for sizes no race class covers.
    pub hull_type: Option<HullType>,
}

/// Calendar-aware age in whole years at the reference date.
pub fn age_at(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Age category of a single member.
pub fn member_age_category(age: i32) -> AgeCategory {
    if age <= 16 {
        AgeCategory::J16
    } else if age <= 18 {
        AgeCategory::J18
    } else if age < 27 {
        AgeCategory::Senior
    } else {
        AgeCategory::Master
    }
}

/// Master sub-category for a crew's mean age.
///
/// Bucket A is open-ended downward: a single 27+ member can pull a young
/// crew into the master category with a mean age below 27, and such a
/// crew races in A, the least senior bucket.
pub fn master_category_for_mean_age(mean_age: f64) -> MasterCategory {
    if mean_age < 36.0 {
        MasterCategory::A
    } else if mean_age < 43.0 {
        MasterCategory::B
    } else if mean_age < 50.0 {
        MasterCategory::C
    } else if mean_age < 55.0 {
        MasterCategory::D
    } else if mean_age < 60.0 {
        MasterCategory::E
    } else if mean_age < 65.0 {
        MasterCategory::F
    } else if mean_age < 70.0 {
        MasterCategory::G
    } else {
        MasterCategory::H
    }
}

/// Classify a crew at the given reference date (the event date for
/// competition-day categorization).
pub fn classify_crew(
    members: &[CrewMember],
    reference: NaiveDate,
) -> Result<CrewClassification, DomainError> {
    if members.is_empty() {
        return Err(DomainError::validation(
            "cannot classify an empty crew",
        ));
    }

    let ages: Vec<i32> = members
        .iter()
        .map(|m| age_at(m.date_of_birth, reference))
        .collect();
    if let Some(bad) = ages.iter().find(|&&a| a < 0) {
        return Err(DomainError::validation(format!(
            "crew member has a date of birth after the event date (age {bad})"
        )));
    }

    // Most restrictive category present: a single older member pulls the
    // whole crew up.
    let age_category = ages
        .iter()
        .map(|&a| member_age_category(a))
        .max_by_key(AgeCategory::rank)
        .ok_or_else(|| DomainError::validation("cannot classify an empty crew"))?;

    let males = members.iter().filter(|m| m.gender == Gender::Male).count();
    let gender_category = if males == 0 {
        GenderCategory::Women
    } else if males * 2 > members.len() {
        GenderCategory::Men
    } else {
        GenderCategory::Mixed
    };

    let master_category = if age_category == AgeCategory::Master {
        let mean = ages.iter().map(|&a| f64::from(a)).sum::<f64>() / ages.len() as f64;
        Some(master_category_for_mean_age(mean))
    } else {
        None
    };

    Ok(CrewClassification {
        crew_size: members.len(),
        age_category,
        gender_category,
        master_category,
        hull_type: HullType::for_crew_size(members.len()),
    })
}

/// Check a single race against a crew classification. Returns the
/// human-readable mismatch reason on failure.
pub fn race_eligible(classification: &CrewClassification, race: &Race) -> Result<(), String> {
    match classification.hull_type {
        None => {
            return Err(format!(
                "a crew of {} does not match any hull type",
                classification.crew_size
            ));
        }
        Some(hull) if hull != race.hull_type => {
            return Err(format!(
                "crew size {} rows a {}, but the race is for {}",
                classification.crew_size, hull, race.hull_type
            ));
        }
        Some(_) => {}
    }

    // A mixed race accepts any crew; a single-gender race accepts only an
    // exactly matching crew. Mixed crews are never accepted by a
    // non-mixed race.
    if race.gender_category != GenderCategory::Mixed
        && classification.gender_category != race.gender_category
    {
        return Err(format!(
            "a {} crew cannot enter a {} race",
            classification.gender_category, race.gender_category
        ));
    }

    if classification.age_category != race.age_category {
        return Err(format!(
            "a {} crew cannot enter a {} race",
            classification.age_category, race.age_category
        ));
    }

    if race.age_category == AgeCategory::Master {
        if let Some(required) = race.master_category {
            if classification.master_category != Some(required) {
                let actual = classification
                    .master_category
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string());
                return Err(format!(
                    "race requires master category {required}, crew is {actual}"
                ));
            }
        }
    }

    Ok(())
}

/// All races from the schedule the crew may enter.
pub fn eligible_races<'a>(
    classification: &CrewClassification,
    races: &'a [Race],
) -> Vec<&'a Race> {
    races
        .iter()
        .filter(|race| race_eligible(classification, race).is_ok())
        .collect()
}

/// Validate an already-selected race, turning a mismatch into a
/// `NotEligible` error for UI display.
pub fn validate_race(classification: &CrewClassification, race: &Race) -> Result<(), DomainError> {
    race_eligible(classification, race).map_err(DomainError::not_eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn member(birth: (i32, u32, u32), gender: Gender) -> CrewMember {
        CrewMember {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: "Rower".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(birth.0, birth.1, birth.2).unwrap(),
            gender,
            club_affiliation: "RC Test".to_string(),
            assigned_boat_id: None,
        }
    }

    fn race(
        hull: HullType,
        age: AgeCategory,
        gender: GenderCategory,
        master: Option<MasterCategory>,
    ) -> Race {
        Race {
            id: Uuid::new_v4(),
            name: "Test Race".to_string(),
            hull_type: hull,
            age_category: age,
            gender_category: gender,
            master_category: master,
        }
    }

    const EVENT: (i32, u32, u32) = (2025, 6, 14);

    fn event_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(EVENT.0, EVENT.1, EVENT.2).unwrap()
    }

    #[test]
    fn test_age_is_calendar_aware() {
        let reference = event_date();
        // Birthday the day after the event: not yet aged up.
        assert_eq!(age_at(NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(), reference), 24);
        // Birthday on the event day counts.
        assert_eq!(age_at(NaiveDate::from_ymd_opt(2000, 6, 14).unwrap(), reference), 25);
        assert_eq!(age_at(NaiveDate::from_ymd_opt(2000, 6, 13).unwrap(), reference), 25);
    }

    #[test]
    fn test_member_age_buckets() {
        assert_eq!(member_age_category(12), AgeCategory::J16);
        assert_eq!(member_age_category(16), AgeCategory::J16);
        assert_eq!(member_age_category(17), AgeCategory::J18);
        assert_eq!(member_age_category(18), AgeCategory::J18);
        assert_eq!(member_age_category(19), AgeCategory::Senior);
        assert_eq!(member_age_category(26), AgeCategory::Senior);
        assert_eq!(member_age_category(27), AgeCategory::Master);
        assert_eq!(member_age_category(70), AgeCategory::Master);
    }

    #[test]
    fn test_one_master_pulls_crew_up() {
        let members = vec![
            member((2003, 1, 1), Gender::Male),   // 22, senior
            member((2004, 1, 1), Gender::Male),   // 21, senior
            member((2005, 1, 1), Gender::Male),   // 20, senior
            member((1990, 1, 1), Gender::Male),   // 35, master
        ];
        let class = classify_crew(&members, event_date()).unwrap();
        assert_eq!(class.age_category, AgeCategory::Master);
    }

    #[test]
    fn test_mixed_senior_four() {
        // Size 4, ages 19-26, two women and two men: mixed senior.
        let members = vec![
            member((2002, 1, 1), Gender::Female),
            member((2001, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Male),
            member((1999, 7, 1), Gender::Male),
        ];
        let class = classify_crew(&members, event_date()).unwrap();
        assert_eq!(class.age_category, AgeCategory::Senior);
        assert_eq!(class.gender_category, GenderCategory::Mixed);
        assert_eq!(class.hull_type, Some(HullType::CoxlessFour));
        assert!(class.master_category.is_none());
    }

    #[test]
    fn test_gender_rules() {
        let women = vec![
            member((2000, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Female),
        ];
        assert_eq!(
            classify_crew(&women, event_date()).unwrap().gender_category,
            GenderCategory::Women
        );

        // Three of five male: majority men.
        let men = vec![
            member((2000, 1, 1), Gender::Male),
            member((2000, 1, 1), Gender::Male),
            member((2000, 1, 1), Gender::Male),
            member((2000, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Female),
        ];
        assert_eq!(
            classify_crew(&men, event_date()).unwrap().gender_category,
            GenderCategory::Men
        );

        // Exactly half male: mixed.
        let half = vec![
            member((2000, 1, 1), Gender::Male),
            member((2000, 1, 1), Gender::Female),
        ];
        assert_eq!(
            classify_crew(&half, event_date()).unwrap().gender_category,
            GenderCategory::Mixed
        );
    }

    #[test]
    fn test_master_buckets() {
        assert_eq!(master_category_for_mean_age(27.0), MasterCategory::A);
        assert_eq!(master_category_for_mean_age(35.9), MasterCategory::A);
        assert_eq!(master_category_for_mean_age(36.0), MasterCategory::B);
        assert_eq!(master_category_for_mean_age(43.0), MasterCategory::C);
        assert_eq!(master_category_for_mean_age(50.0), MasterCategory::D);
        assert_eq!(master_category_for_mean_age(55.0), MasterCategory::E);
        assert_eq!(master_category_for_mean_age(60.0), MasterCategory::F);
        assert_eq!(master_category_for_mean_age(65.0), MasterCategory::G);
        assert_eq!(master_category_for_mean_age(70.0), MasterCategory::H);
        assert_eq!(master_category_for_mean_age(95.0), MasterCategory::H);
    }

    #[test]
    fn test_mean_below_bucket_floor_lands_in_a() {
        // One 30-year-old among 18-year-olds: master category, mean 21.
        assert_eq!(master_category_for_mean_age(21.0), MasterCategory::A);

        let members = vec![
            member((1995, 1, 1), Gender::Male),
            member((2006, 6, 1), Gender::Male),
            member((2006, 6, 1), Gender::Male),
            member((2006, 6, 1), Gender::Male),
        ];
        let class = classify_crew(&members, event_date()).unwrap();
        assert_eq!(class.age_category, AgeCategory::Master);
        assert_eq!(class.master_category, Some(MasterCategory::A));
    }

    #[test]
    fn test_master_crew_gets_subcategory_from_mean_age() {
        // Ages 40 and 46: mean 43, bucket C.
        let members = vec![
            member((1985, 1, 1), Gender::Male),
            member((1979, 1, 1), Gender::Male),
        ];
        let ages: Vec<i32> = members
            .iter()
            .map(|m| age_at(m.date_of_birth, event_date()))
            .collect();
        assert_eq!(ages, vec![40, 46]);
        let class = classify_crew(&members, event_date()).unwrap();
        assert_eq!(class.master_category, Some(MasterCategory::C));
    }

    #[test]
    fn test_empty_crew_rejected() {
        assert!(matches!(
            classify_crew(&[], event_date()).unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn test_race_eligibility_hull_mismatch() {
        let members = vec![member((2000, 1, 1), Gender::Male)];
        let class = classify_crew(&members, event_date()).unwrap();
        let reason = race_eligible(
            &class,
            &race(HullType::Eight, AgeCategory::Senior, GenderCategory::Men, None),
        )
        .unwrap_err();
        assert!(reason.contains("skiff"));
    }

    #[test]
    fn test_race_eligibility_gender() {
        let mixed = vec![
            member((2000, 1, 1), Gender::Male),
            member((2000, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Male),
        ];
        let class = classify_crew(&mixed, event_date()).unwrap();

        // Mixed crews enter only mixed races.
        assert!(race_eligible(
            &class,
            &race(HullType::CoxlessFour, AgeCategory::Senior, GenderCategory::Mixed, None)
        )
        .is_ok());
        assert!(race_eligible(
            &class,
            &race(HullType::CoxlessFour, AgeCategory::Senior, GenderCategory::Men, None)
        )
        .is_err());

        // A mixed race accepts a single-gender crew too.
        let women = vec![
            member((2000, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Female),
        ];
        let women_class = classify_crew(&women, event_date()).unwrap();
        assert!(race_eligible(
            &women_class,
            &race(HullType::CoxlessFour, AgeCategory::Senior, GenderCategory::Mixed, None)
        )
        .is_ok());
    }

    #[test]
    fn test_master_subcategory_must_match_when_specified() {
        // Ages 40, 40, 46, 46: mean 43, bucket C.
        let four = vec![
            member((1985, 1, 1), Gender::Male),
            member((1985, 1, 1), Gender::Male),
            member((1979, 1, 1), Gender::Male),
            member((1979, 1, 1), Gender::Male),
        ];
        let class = classify_crew(&four, event_date()).unwrap();
        assert_eq!(class.master_category, Some(MasterCategory::C));

        let matching = race(
            HullType::CoxlessFour,
            AgeCategory::Master,
            GenderCategory::Men,
            Some(MasterCategory::C),
        );
        assert!(race_eligible(&class, &matching).is_ok());

        let wrong_bucket = race(
            HullType::CoxlessFour,
            AgeCategory::Master,
            GenderCategory::Men,
            Some(MasterCategory::A),
        );
        let reason = race_eligible(&class, &wrong_bucket).unwrap_err();
        assert!(reason.contains('A'));

        // A master race without a sub-category accepts any master crew.
        let open = race(
            HullType::CoxlessFour,
            AgeCategory::Master,
            GenderCategory::Men,
            None,
        );
        assert!(race_eligible(&class, &open).is_ok());
    }

    #[test]
    fn test_eligible_races_filters_schedule() {
        let members = vec![
            member((2002, 1, 1), Gender::Female),
            member((2001, 1, 1), Gender::Female),
            member((2000, 1, 1), Gender::Female),
            member((1999, 7, 1), Gender::Female),
        ];
        let class = classify_crew(&members, event_date()).unwrap();
        let schedule = vec![
            race(HullType::CoxlessFour, AgeCategory::Senior, GenderCategory::Women, None),
            race(HullType::CoxlessFour, AgeCategory::Senior, GenderCategory::Men, None),
            race(HullType::Eight, AgeCategory::Senior, GenderCategory::Women, None),
            race(HullType::CoxlessFour, AgeCategory::Senior, GenderCategory::Mixed, None),
        ];
        let eligible = eligible_races(&class, &schedule);
        assert_eq!(eligible.len(), 2);
    }

    #[test]
    fn test_validate_race_returns_not_eligible() {
        let members = vec![member((2000, 1, 1), Gender::Male)];
        let class = classify_crew(&members, event_date()).unwrap();
        let err = validate_race(
            &class,
            &race(HullType::Skiff, AgeCategory::J16, GenderCategory::Men, None),
        )
        .unwrap_err();
        match err {
            DomainError::NotEligible(reason) => assert!(reason.contains("senior")),
            other => panic!("expected NotEligible, got {other:?}"),
        }
    }
}
