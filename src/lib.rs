//! Paw-tner Match - adopter/animal compatibility ranking and duplicate listing screening
//!
//! Two stateless engines sit at the center of this crate:
//! - the compatibility engine scores an animal for an adopter's stated
//!   preferences, and [`MatchRanker`] turns those scores into a ranked list;
//! - the similarity engine compares two listings, and [`DuplicateScreener`]
//!   aggregates the comparisons into a warn/block verdict for a new listing.
//!
//! Both coordinators read snapshots through [`services::AdoptionStore`] and
//! never write anything back.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compatibility_score, fuzzy_match, similarity, DuplicateScreener, MatchRanker};
pub use crate::models::{
    AdopterPreferenceProfile, AnimalRecord, CandidateListingAttributes, DuplicateScreeningResult,
    MatchResult, RankedMatches,
};
