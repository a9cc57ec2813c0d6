use crate::models::{AdopterPreferenceProfile, AnimalRecord};
use serde::Serialize;

/// Neutral starting point for every complete profile
pub const BASELINE_SCORE: f64 = 50.0;
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

const SPECIES_MATCH_BONUS: f64 = 25.0;
const ACTIVITY_MATCH_BONUS: f64 = 20.0;
const AGE_IN_RANGE_BONUS: f64 = 15.0;
const AGE_OUT_OF_RANGE_PENALTY: f64 = 10.0;
const KID_FRIENDLY_BONUS: f64 = 15.0;
const NOT_KID_FRIENDLY_PENALTY: f64 = 25.0;
const SIZE_MATCH_BONUS: f64 = 10.0;
const FEE_IN_BUDGET_BONUS: f64 = 5.0;
const FEE_OVER_BUDGET_PENALTY: f64 = 15.0;

/// Compatibility rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    PreferencesComplete,
    Species,
    ActivityLevel,
    AgeRange,
    Children,
    Size,
    Fee,
}

/// Effect of one rule on the running score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "points")]
pub enum Adjustment {
    Add(f64),
    Subtract(f64),
    /// Rule not applicable to this pair
    Skip,
    /// Pair is disqualified; the score is zero
    Exclude,
}

type RuleFn = fn(&AdopterPreferenceProfile, &AnimalRecord) -> Adjustment;

const RULES: [(Rule, RuleFn); 7] = [
    (Rule::PreferencesComplete, preferences_complete_rule),
    (Rule::Species, species_rule),
    (Rule::ActivityLevel, activity_rule),
    (Rule::AgeRange, age_range_rule),
    (Rule::Children, children_rule),
    (Rule::Size, size_rule),
    (Rule::Fee, fee_rule),
];

/// Per-rule account of a compatibility score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub adjustments: Vec<(Rule, Adjustment)>,
    pub score: f64,
}

/// Calculate the compatibility score (0-100) of an animal for an adopter
///
/// Incomplete profiles and species mismatches score exactly 0. Otherwise the
/// score starts at 50, each rule adds or subtracts points, and the sum is
/// clamped to 0-100. Deterministic and side-effect free.
pub fn compatibility_score(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> f64 {
    let mut score = BASELINE_SCORE;

    for (_, rule) in RULES.iter() {
        match rule(profile, animal) {
            Adjustment::Add(points) => score += points,
            Adjustment::Subtract(points) => score -= points,
            Adjustment::Skip => {}
            Adjustment::Exclude => return MIN_SCORE,
        }
    }

    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Same as [`compatibility_score`], keeping every rule outcome
///
/// Evaluation stops at the first exclusion, as in scoring.
pub fn score_breakdown(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> ScoreBreakdown {
    let mut adjustments = Vec::with_capacity(RULES.len());

    for (name, rule) in RULES.iter() {
        let adjustment = rule(profile, animal);
        adjustments.push((*name, adjustment));
        if adjustment == Adjustment::Exclude {
            break;
        }
    }

    ScoreBreakdown {
        adjustments,
        score: compatibility_score(profile, animal),
    }
}

fn preferences_complete_rule(profile: &AdopterPreferenceProfile, _: &AnimalRecord) -> Adjustment {
    if profile.basic_preferences_complete {
        Adjustment::Skip
    } else {
        Adjustment::Exclude
    }
}

fn species_rule(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> Adjustment {
    match profile.preferred_species {
        Some(species) if species == animal.species => Adjustment::Add(SPECIES_MATCH_BONUS),
        Some(_) => Adjustment::Exclude,
        None => Adjustment::Skip,
    }
}

fn activity_rule(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> Adjustment {
    match (profile.preferred_activity_level, animal.activity_level) {
        (Some(wanted), Some(actual)) if wanted == actual => Adjustment::Add(ACTIVITY_MATCH_BONUS),
        _ => Adjustment::Skip,
    }
}

fn age_range_rule(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> Adjustment {
    let (Some(min), Some(max), Some(age)) = (
        profile.preferred_age_min,
        profile.preferred_age_max,
        animal.age_years,
    ) else {
        return Adjustment::Skip;
    };

    if (min..=max).contains(&age) {
        Adjustment::Add(AGE_IN_RANGE_BONUS)
    } else {
        Adjustment::Subtract(AGE_OUT_OF_RANGE_PENALTY)
    }
}

fn children_rule(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> Adjustment {
    match profile.has_children {
        // Unknown temperament around kids is treated as not kid friendly
        Some(true) if animal.good_with_kids == Some(true) => Adjustment::Add(KID_FRIENDLY_BONUS),
        Some(true) => Adjustment::Subtract(NOT_KID_FRIENDLY_PENALTY),
        Some(false) | None => Adjustment::Skip,
    }
}

fn size_rule(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> Adjustment {
    match profile.preferred_size {
        Some(size) if size == animal.size => Adjustment::Add(SIZE_MATCH_BONUS),
        _ => Adjustment::Skip,
    }
}

fn fee_rule(profile: &AdopterPreferenceProfile, animal: &AnimalRecord) -> Adjustment {
    let budget = profile.max_fee.filter(|fee| *fee != 0.0);
    let fee = animal.adoption_fee.filter(|fee| *fee != 0.0);

    match (budget, fee) {
        (Some(budget), Some(fee)) if fee <= budget => Adjustment::Add(FEE_IN_BUDGET_BONUS),
        (Some(_), Some(_)) => Adjustment::Subtract(FEE_OVER_BUDGET_PENALTY),
        _ => Adjustment::Skip,
    }
}
