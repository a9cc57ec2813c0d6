use crate::core::fuzzy::{fuzzy_match, DEFAULT_FUZZY_THRESHOLD};
use crate::models::{CandidateListingAttributes, ListingWeights};

/// Partial credit for a fuzzy name match
const NAME_FUZZY_FACTOR: f64 = 0.7;
/// Partial credit for a fuzzy breed match
const BREED_FUZZY_FACTOR: f64 = 0.6;
/// Partial credit for a fuzzy color match
const COLOR_FUZZY_FACTOR: f64 = 0.5;
/// Ages further apart than this (in months) earn nothing
const MAX_AGE_DIFF_MONTHS: i64 = 6;

/// Similarity (0-100) between two listings using the default weights
pub fn similarity(a: &CandidateListingAttributes, b: &CandidateListingAttributes) -> f64 {
    listing_similarity(a, b, &ListingWeights::default(), DEFAULT_FUZZY_THRESHOLD)
}

/// Weighted attribute similarity (0-100) between two listings
///
/// | attribute | exact  | fuzzy      |
/// |-----------|--------|------------|
/// | name      | weight | 0.7×weight |
/// | breed     | weight | 0.6×weight |
/// | color     | weight | 0.5×weight |
/// | size      | weight | -          |
/// | gender    | weight | -          |
///
/// Age earns `weight * (1 - diff/12)` when the combined ages differ by at
/// most six months. Every attribute's weight always counts toward the total,
/// so an attribute missing on either side pulls the score down.
pub fn listing_similarity(
    a: &CandidateListingAttributes,
    b: &CandidateListingAttributes,
    weights: &ListingWeights,
    fuzzy_threshold: f64,
) -> f64 {
    let total_weight = weights.total();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let matched = text_score(&a.name, &b.name, weights.name, NAME_FUZZY_FACTOR, fuzzy_threshold)
        + text_score(&a.breed, &b.breed, weights.breed, BREED_FUZZY_FACTOR, fuzzy_threshold)
        + age_score(a, b, weights.age)
        + exact_score(a.size == b.size && a.size.is_some(), weights.size)
        + text_score(&a.color, &b.color, weights.color, COLOR_FUZZY_FACTOR, fuzzy_threshold)
        + exact_score(text_equals(&a.gender, &b.gender), weights.gender);

    matched / total_weight * 100.0
}

/// Non-blank text value, if any
#[inline]
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[inline]
fn text_equals(a: &Option<String>, b: &Option<String>) -> bool {
    match (present(a), present(b)) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    }
}

#[inline]
fn exact_score(matched: bool, weight: f64) -> f64 {
    if matched {
        weight
    } else {
        0.0
    }
}

fn text_score(
    a: &Option<String>,
    b: &Option<String>,
    weight: f64,
    fuzzy_factor: f64,
    fuzzy_threshold: f64,
) -> f64 {
    let (Some(left), Some(right)) = (present(a), present(b)) else {
        return 0.0;
    };

    if left.to_lowercase() == right.to_lowercase() {
        weight
    } else if fuzzy_match(left, right, fuzzy_threshold) {
        weight * fuzzy_factor
    } else {
        0.0
    }
}

fn age_score(a: &CandidateListingAttributes, b: &CandidateListingAttributes, weight: f64) -> f64 {
    let (Some(left), Some(right)) = (a.age_in_months(), b.age_in_months()) else {
        return 0.0;
    };

    let diff = (left - right).abs();
    if diff <= MAX_AGE_DIFF_MONTHS {
        weight * (1.0 - diff as f64 / 12.0)
    } else {
        0.0
    }
}
