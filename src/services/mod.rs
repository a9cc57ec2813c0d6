//! Data-access collaborators
//!
//! The ranking and screening coordinators never touch a database directly.
//! They read point-in-time snapshots through [`AdoptionStore`], which has a
//! PostgreSQL implementation for the service and an in-memory one for tests
//! and embedding callers.

pub mod memory;
pub mod postgres;

use std::future::Future;

use thiserror::Error;

use crate::models::{AdopterPreferenceProfile, AnimalRecord, ExistingListing};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Errors raised by a data-access collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Read-only source of adopter profiles and animal listings
pub trait AdoptionStore: Send + Sync {
    /// Fetch an adopter's preference profile, `None` if the adopter is unknown
    fn get_preference_profile(
        &self,
        adopter_id: i32,
    ) -> impl Future<Output = Result<Option<AdopterPreferenceProfile>, StoreError>> + Send;

    /// Fetch up to `limit` animals that are available for adoption, ordered by id
    fn get_available_animals(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<AnimalRecord>, StoreError>> + Send;

    /// Fetch an organization's listings that are still available, ordered by id
    fn get_active_listings(
        &self,
        organization_id: i32,
    ) -> impl Future<Output = Result<Vec<ExistingListing>, StoreError>> + Send;

    /// Whether the backing store is reachable
    fn health_check(&self) -> impl Future<Output = bool> + Send;
}
