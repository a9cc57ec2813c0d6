use std::collections::HashMap;

use crate::models::{
    AdopterPreferenceProfile, AdoptionStatus, AnimalRecord, CandidateListingAttributes,
    ExistingListing,
};
use crate::services::{AdoptionStore, StoreError};

/// In-memory snapshot store
///
/// Populated up front with the builder methods, then read through
/// [`AdoptionStore`] with the same filtering and ordering as the database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    profiles: HashMap<i32, AdopterPreferenceProfile>,
    animals: Vec<AnimalRecord>,
    listings: Vec<(i32, AdoptionStatus, ExistingListing)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: AdopterPreferenceProfile) -> Self {
        self.profiles.insert(profile.adopter_id, profile);
        self
    }

    /// Add an animal; it also becomes a listing of its shelter
    pub fn with_animal(mut self, animal: AnimalRecord) -> Self {
        let listing = ExistingListing {
            id: animal.id,
            attributes: CandidateListingAttributes {
                name: Some(animal.name.clone()),
                breed: animal.breed.clone(),
                age_years: animal.age_years,
                age_months: None,
                size: Some(animal.size),
                color: None,
                gender: None,
            },
        };
        self.listings
            .push((animal.shelter_id, animal.adoption_status, listing));
        self.animals.push(animal);
        self
    }

    /// Add a listing with full comparable attributes
    pub fn with_listing(
        mut self,
        organization_id: i32,
        status: AdoptionStatus,
        listing: ExistingListing,
    ) -> Self {
        self.listings.push((organization_id, status, listing));
        self
    }
}

impl AdoptionStore for InMemoryStore {
    async fn get_preference_profile(
        &self,
        adopter_id: i32,
    ) -> Result<Option<AdopterPreferenceProfile>, StoreError> {
        Ok(self.profiles.get(&adopter_id).cloned())
    }

    async fn get_available_animals(&self, limit: usize) -> Result<Vec<AnimalRecord>, StoreError> {
        let mut animals: Vec<AnimalRecord> = self
            .animals
            .iter()
            .filter(|animal| animal.adoption_status == AdoptionStatus::Available)
            .cloned()
            .collect();
        animals.sort_by_key(|animal| animal.id);
        animals.truncate(limit);
        Ok(animals)
    }

    async fn get_active_listings(
        &self,
        organization_id: i32,
    ) -> Result<Vec<ExistingListing>, StoreError> {
        let mut listings: Vec<ExistingListing> = self
            .listings
            .iter()
            .filter(|(org, status, _)| *org == organization_id && *status == AdoptionStatus::Available)
            .map(|(_, _, listing)| listing.clone())
            .collect();
        listings.sort_by_key(|listing| listing.id);
        Ok(listings)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
