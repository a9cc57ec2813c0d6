use thiserror::Error;

use crate::core::similarity::listing_similarity;
use crate::models::{
    CandidateListingAttributes, DuplicateScreeningResult, ExistingListing, ScreeningConfig,
    SimilarListing,
};
use crate::services::{AdoptionStore, StoreError};

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Screens new listings against an organization's active listings
#[derive(Debug, Clone, Default)]
pub struct DuplicateScreener {
    config: ScreeningConfig,
}

impl DuplicateScreener {
    pub fn new(config: ScreeningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Fetch the organization's available listings and screen `candidate` against them
    pub async fn screen_for_duplicates<S: AdoptionStore>(
        &self,
        store: &S,
        organization_id: i32,
        candidate: &CandidateListingAttributes,
    ) -> Result<DuplicateScreeningResult, ScreeningError> {
        let existing = store.get_active_listings(organization_id).await?;

        let result = self.screen(candidate, &existing);

        tracing::debug!(
            "Screened listing for organization {} against {} listings: {} similar, max {:.1}",
            organization_id,
            existing.len(),
            result.similar_listings.len(),
            result.max_similarity
        );

        Ok(result)
    }

    /// Compare `candidate` with every existing listing and aggregate the verdicts
    ///
    /// A listing is reported as similar at or above the configured threshold.
    /// Listings at or above the high-similarity threshold are counted
    /// separately; reaching the similarity limit marks the result as blocking.
    pub fn screen(
        &self,
        candidate: &CandidateListingAttributes,
        existing: &[ExistingListing],
    ) -> DuplicateScreeningResult {
        let config = &self.config;
        let mut similar_listings = Vec::new();
        let mut max_similarity: f64 = 0.0;
        let mut high_similarity_count = 0;

        for listing in existing {
            let similarity = listing_similarity(
                candidate,
                &listing.attributes,
                &config.weights,
                config.fuzzy_threshold,
            );

            if similarity >= config.threshold {
                similar_listings.push(SimilarListing {
                    id: listing.id,
                    name: listing.attributes.name.clone(),
                    breed: listing.attributes.breed.clone(),
                    age_display: listing.attributes.age_display(),
                    similarity_score: round_one_decimal(similarity),
                });
            }

            if similarity >= config.high_similarity_threshold {
                high_similarity_count += 1;
            }

            max_similarity = max_similarity.max(similarity);
        }

        let limit_exceeded = high_similarity_count >= config.similarity_limit
            && max_similarity >= config.high_similarity_threshold;

        DuplicateScreeningResult {
            is_duplicate: !similar_listings.is_empty(),
            similar_listings,
            max_similarity: round_one_decimal(max_similarity),
            high_similarity_count,
            limit_exceeded,
            similarity_limit: config.similarity_limit,
        }
    }
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdoptionStatus, AnimalSize, ScreeningDecision};
    use crate::services::InMemoryStore;

    fn buddy() -> CandidateListingAttributes {
        CandidateListingAttributes {
            name: Some("Buddy".to_string()),
            breed: Some("Labrador".to_string()),
            age_years: Some(2),
            age_months: Some(0),
            size: Some(AnimalSize::Medium),
            color: Some("brown".to_string()),
            gender: Some("male".to_string()),
        }
    }

    fn listing(id: i32, attributes: CandidateListingAttributes) -> ExistingListing {
        ExistingListing { id, attributes }
    }

    #[test]
    fn test_no_existing_listings() {
        let screener = DuplicateScreener::default();
        let result = screener.screen(&buddy(), &[]);

        assert!(!result.is_duplicate);
        assert!(result.similar_listings.is_empty());
        assert_eq!(result.max_similarity, 0.0);
        assert_eq!(result.high_similarity_count, 0);
        assert!(!result.limit_exceeded);
        assert_eq!(result.similarity_limit, 3);
    }

    #[test]
    fn test_single_identical_listing_warns() {
        let screener = DuplicateScreener::default();
        let result = screener.screen(&buddy(), &[listing(10, buddy())]);

        assert!(result.is_duplicate);
        assert_eq!(result.max_similarity, 100.0);
        assert_eq!(result.high_similarity_count, 1);
        assert!(!result.limit_exceeded);
        assert_eq!(result.similar_listings[0].id, 10);
        assert_eq!(result.similar_listings[0].age_display, "2 years, 0 months");
        assert_eq!(result.decision(false), ScreeningDecision::Warn);
        assert_eq!(result.decision(true), ScreeningDecision::Allow);
    }

    #[test]
    fn test_three_identical_listings_block() {
        let screener = DuplicateScreener::default();
        let existing: Vec<_> = (1..=3).map(|id| listing(id, buddy())).collect();
        let result = screener.screen(&buddy(), &existing);

        assert_eq!(result.high_similarity_count, 3);
        assert!(result.limit_exceeded);
        assert_eq!(result.decision(true), ScreeningDecision::Block);
    }

    #[test]
    fn test_between_thresholds_is_similar_not_high() {
        let screener = DuplicateScreener::default();
        let mut other = buddy();
        other.breed = Some("Labrador Retriever".to_string());
        other.color = Some("light brown".to_string());
        // 85.0: similar, below the high-similarity mark
        let result = screener.screen(&buddy(), &[listing(1, other)]);

        assert!(result.is_duplicate);
        assert_eq!(result.similar_listings[0].similarity_score, 85.0);
        assert_eq!(result.high_similarity_count, 0);
    }

    #[test]
    fn test_max_similarity_tracks_non_matches() {
        let screener = DuplicateScreener::default();
        let mut other = buddy();
        other.name = Some("Rex".to_string());
        // 70.0, below the duplicate threshold
        let result = screener.screen(&buddy(), &[listing(1, other)]);

        assert!(!result.is_duplicate);
        assert_eq!(result.max_similarity, 70.0);
    }

    #[test]
    fn test_high_similarity_counted_independently_of_threshold() {
        let screener = DuplicateScreener::new(ScreeningConfig {
            threshold: 99.0,
            ..Default::default()
        });
        let mut other = buddy();
        other.age_months = Some(6);
        // 90.0: high similarity, but under the raised report threshold
        let result = screener.screen(&buddy(), &[listing(1, other)]);

        assert!(!result.is_duplicate);
        assert_eq!(result.high_similarity_count, 1);
    }

    #[test]
    fn test_similarity_rounded_to_one_decimal() {
        let screener = DuplicateScreener::new(ScreeningConfig {
            threshold: 0.0,
            ..Default::default()
        });
        let mut other = buddy();
        other.age_months = Some(1);
        // 20 * (1 - 1/12) = 18.333.. -> 98.333..
        let result = screener.screen(&buddy(), &[listing(1, other)]);

        assert_eq!(result.similar_listings[0].similarity_score, 98.3);
        assert_eq!(result.max_similarity, 98.3);
    }

    #[tokio::test]
    async fn test_screen_for_duplicates_uses_active_listings_only() {
        let screener = DuplicateScreener::default();
        let store = InMemoryStore::new()
            .with_listing(1, AdoptionStatus::Available, listing(1, buddy()))
            .with_listing(1, AdoptionStatus::Adopted, listing(2, buddy()))
            .with_listing(1, AdoptionStatus::Available, listing(3, buddy()))
            .with_listing(2, AdoptionStatus::Available, listing(4, buddy()));

        let result = screener
            .screen_for_duplicates(&store, 1, &buddy())
            .await
            .unwrap();

        let ids: Vec<i32> = result.similar_listings.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(result.high_similarity_count, 2);
        assert!(!result.limit_exceeded);
    }
}
