use std::cmp::Ordering;

use thiserror::Error;

use crate::core::compatibility::compatibility_score;
use crate::models::{AdopterPreferenceProfile, AnimalRecord, MatchResult, MatchingConfig, RankedMatches};
use crate::services::{AdoptionStore, StoreError};

/// Errors surfaced by match ranking
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Adopter not found: {0}")]
    AdopterNotFound(i32),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Ranks available animals for an adopter
///
/// # Pipeline Stages
/// 1. Preference completeness gate
/// 2. Candidate fetch (available animals only)
/// 3. Compatibility scoring
/// 4. Threshold filter, ranking and truncation
#[derive(Debug, Clone, Default)]
pub struct MatchRanker {
    config: MatchingConfig,
}

impl MatchRanker {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank matches for an adopter, fetching everything from `store`
    ///
    /// An unknown adopter is an error. An adopter whose basic preferences are
    /// incomplete gets an empty result flagged `requires_preferences`.
    pub async fn rank_matches<S: AdoptionStore>(
        &self,
        store: &S,
        adopter_id: i32,
        result_limit: usize,
    ) -> Result<RankedMatches, MatchError> {
        let profile = store
            .get_preference_profile(adopter_id)
            .await?
            .ok_or(MatchError::AdopterNotFound(adopter_id))?;

        if !profile.basic_preferences_complete {
            tracing::debug!("Adopter {} has incomplete basic preferences", adopter_id);
            return Ok(RankedMatches::needs_preferences());
        }

        let candidates = store
            .get_available_animals(self.config.candidate_limit)
            .await?;

        tracing::debug!(
            "Scoring {} candidates for adopter {}",
            candidates.len(),
            adopter_id
        );

        Ok(RankedMatches::ranked(self.rank(
            &profile,
            candidates,
            result_limit,
        )))
    }

    /// Score, filter and order `candidates` for `profile`
    ///
    /// Only scores strictly above the inclusion threshold survive. Results are
    /// ordered by score descending; equal scores are ordered by animal id so
    /// rankings are reproducible regardless of fetch order.
    pub fn rank(
        &self,
        profile: &AdopterPreferenceProfile,
        candidates: Vec<AnimalRecord>,
        result_limit: usize,
    ) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = candidates
            .into_iter()
            .filter_map(|animal| {
                let score = compatibility_score(profile, &animal);
                (score > self.config.inclusion_threshold).then_some(MatchResult {
                    animal,
                    compatibility_score: score,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.compatibility_score
                .partial_cmp(&a.compatibility_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.animal.id.cmp(&b.animal.id))
        });

        matches.truncate(result_limit);
        matches
    }
}
