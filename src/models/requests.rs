use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{AnimalSize, CandidateListingAttributes};

/// Request to rank matches for an adopter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "adopter_id", rename = "adopterId")]
    pub adopter_id: i32,
    /// Falls back to the configured default when absent
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Attributes of a listing about to be created
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListingAttributesRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub breed: Option<String>,
    #[validate(range(min = 0, max = 30))]
    #[serde(alias = "age_years", rename = "ageYears", default)]
    pub age_years: Option<i32>,
    #[validate(range(min = 0, max = 11))]
    #[serde(alias = "age_months", rename = "ageMonths", default)]
    pub age_months: Option<i32>,
    #[serde(default)]
    pub size: Option<AnimalSize>,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub color: Option<String>,
    #[validate(length(max = 10))]
    #[serde(default)]
    pub gender: Option<String>,
}

impl From<ListingAttributesRequest> for CandidateListingAttributes {
    fn from(value: ListingAttributesRequest) -> Self {
        Self {
            name: Some(value.name),
            breed: value.breed,
            age_years: value.age_years,
            age_months: value.age_months,
            size: value.size,
            color: value.color,
            gender: value.gender,
        }
    }
}

/// Request to screen a new listing for duplicates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScreenListingRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "organization_id", rename = "organizationId")]
    pub organization_id: i32,
    #[serde(alias = "override_duplicate", rename = "overrideDuplicate", default)]
    pub override_duplicate: bool,
    #[validate(nested)]
    pub listing: ListingAttributesRequest,
}
