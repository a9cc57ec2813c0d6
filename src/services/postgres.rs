use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{
    AdopterPreferenceProfile, AdoptionStatus, AnimalRecord, CandidateListingAttributes,
    ExistingListing,
};
use crate::services::{AdoptionStore, StoreError};

/// PostgreSQL reader for the adoption platform's `users` and `pets` tables
///
/// Read-only: profiles and listings are owned by the platform, this client
/// only takes snapshots of them for ranking and duplicate screening.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings, filling in pool defaults
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

impl AdoptionStore for PostgresStore {
    async fn get_preference_profile(
        &self,
        adopter_id: i32,
    ) -> Result<Option<AdopterPreferenceProfile>, StoreError> {
        // Basic preferences are complete once pet type, activity level,
        // house type and has_children are all answered
        let query = r#"
            SELECT
                id,
                preferred_pet_type,
                preferred_age_min,
                preferred_age_max,
                activity_level,
                has_children,
                preferred_pet_size,
                max_adoption_fee,
                (preferred_pet_type IS NOT NULL
                    AND activity_level IS NOT NULL
                    AND house_type IS NOT NULL
                    AND has_children IS NOT NULL) AS basic_preferences_complete
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(adopter_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn get_available_animals(&self, limit: usize) -> Result<Vec<AnimalRecord>, StoreError> {
        let query = r#"
            SELECT id, name, pet_type, breed, age_years, activity_level, size,
                   good_with_kids, adoption_fee, adoption_status, shelter_id
            FROM pets
            WHERE adoption_status = $1
            ORDER BY id
            LIMIT $2
        "#;

        let limit = i64::try_from(limit)
            .map_err(|_| StoreError::InvalidRow(format!("limit {} out of range", limit)))?;

        let rows = sqlx::query(query)
            .bind(AdoptionStatus::Available)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let animals = rows
            .iter()
            .map(animal_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} available animals", animals.len());

        Ok(animals)
    }

    async fn get_active_listings(
        &self,
        organization_id: i32,
    ) -> Result<Vec<ExistingListing>, StoreError> {
        let query = r#"
            SELECT id, name, breed, age_years, age_months, size, color, gender
            FROM pets
            WHERE shelter_id = $1 AND adoption_status = $2
            ORDER BY id
        "#;

        let rows = sqlx::query(query)
            .bind(organization_id)
            .bind(AdoptionStatus::Available)
            .fetch_all(&self.pool)
            .await?;

        let listings = rows
            .iter()
            .map(listing_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Organization {} has {} active listings",
            organization_id,
            listings.len()
        );

        Ok(listings)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .unwrap_or_else(|e| {
                tracing::warn!("PostgreSQL health check failed: {}", e);
                false
            })
    }
}

fn profile_from_row(row: &PgRow) -> Result<AdopterPreferenceProfile, StoreError> {
    Ok(AdopterPreferenceProfile {
        adopter_id: row.try_get("id")?,
        preferred_species: row.try_get("preferred_pet_type")?,
        preferred_age_min: row.try_get("preferred_age_min")?,
        preferred_age_max: row.try_get("preferred_age_max")?,
        preferred_activity_level: row.try_get("activity_level")?,
        has_children: row.try_get("has_children")?,
        preferred_size: row.try_get("preferred_pet_size")?,
        max_fee: row.try_get("max_adoption_fee")?,
        basic_preferences_complete: row
            .try_get::<Option<bool>, _>("basic_preferences_complete")?
            .unwrap_or(false),
    })
}

fn animal_from_row(row: &PgRow) -> Result<AnimalRecord, StoreError> {
    Ok(AnimalRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        species: row.try_get("pet_type")?,
        breed: row.try_get("breed")?,
        age_years: row.try_get("age_years")?,
        activity_level: row.try_get("activity_level")?,
        size: row.try_get("size")?,
        good_with_kids: row.try_get("good_with_kids")?,
        adoption_fee: row.try_get("adoption_fee")?,
        adoption_status: row
            .try_get::<Option<AdoptionStatus>, _>("adoption_status")?
            .unwrap_or(AdoptionStatus::Available),
        shelter_id: row.try_get("shelter_id")?,
    })
}

fn listing_from_row(row: &PgRow) -> Result<ExistingListing, StoreError> {
    Ok(ExistingListing {
        id: row.try_get("id")?,
        attributes: CandidateListingAttributes {
            name: row.try_get("name")?,
            breed: row.try_get("breed")?,
            age_years: row.try_get("age_years")?,
            age_months: row.try_get("age_months")?,
            size: row.try_get("size")?,
            color: row.try_get("color")?,
            gender: row.try_get("gender")?,
        },
    })
}
