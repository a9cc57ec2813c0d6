// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ActivityLevel, AdopterPreferenceProfile, AdoptionStatus, AnimalRecord, AnimalSize,
    CandidateListingAttributes, DuplicateScreeningResult, ExistingListing, ListingWeights,
    MatchResult, MatchingConfig, RankedMatches, ScreeningConfig, ScreeningDecision,
    SimilarListing, Species,
};
pub use requests::{FindMatchesRequest, ListingAttributesRequest, ScreenListingRequest};
pub use responses::{ErrorResponse, HealthResponse, ScreenListingResponse};
