use serde::{Deserialize, Serialize};

/// Animal species as stored by the adoption platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "pettype", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "activitylevel", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "petsize", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimalSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

/// Listing lifecycle state; only `Available` animals are ranked or screened against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "adoptionstatus", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdoptionStatus {
    Available,
    Pending,
    Adopted,
    OnHold,
}

/// Adopter matching preferences
///
/// Every preference is optional. `basic_preferences_complete` is computed by
/// the profile owner and only read here, never recomputed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdopterPreferenceProfile {
    #[serde(rename = "adopterId")]
    pub adopter_id: i32,
    #[serde(rename = "preferredSpecies", default)]
    pub preferred_species: Option<Species>,
    #[serde(rename = "preferredAgeMin", default)]
    pub preferred_age_min: Option<i32>,
    #[serde(rename = "preferredAgeMax", default)]
    pub preferred_age_max: Option<i32>,
    #[serde(rename = "preferredActivityLevel", default)]
    pub preferred_activity_level: Option<ActivityLevel>,
    #[serde(rename = "hasChildren", default)]
    pub has_children: Option<bool>,
    #[serde(rename = "preferredSize", default)]
    pub preferred_size: Option<AnimalSize>,
    #[serde(rename = "maxFee", default)]
    pub max_fee: Option<f64>,
    #[serde(rename = "basicPreferencesComplete", default)]
    pub basic_preferences_complete: bool,
}

/// Snapshot of an adoptable animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: i32,
    pub name: String,
    pub species: Species,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(rename = "ageYears", default)]
    pub age_years: Option<i32>,
    #[serde(rename = "activityLevel", default)]
    pub activity_level: Option<ActivityLevel>,
    pub size: AnimalSize,
    #[serde(rename = "goodWithKids", default)]
    pub good_with_kids: Option<bool>,
    #[serde(rename = "adoptionFee", default)]
    pub adoption_fee: Option<f64>,
    #[serde(rename = "adoptionStatus")]
    pub adoption_status: AdoptionStatus,
    #[serde(rename = "shelterId")]
    pub shelter_id: i32,
}

/// A ranked animal for one adopter; produced per request and never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub animal: AnimalRecord,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
}

/// Flattened, comparable attributes of a listing
///
/// Used for both the listing being created and every existing listing it is
/// screened against. Unset fields never count as a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateListingAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(rename = "ageYears", default)]
    pub age_years: Option<i32>,
    #[serde(rename = "ageMonths", default)]
    pub age_months: Option<i32>,
    #[serde(default)]
    pub size: Option<AnimalSize>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl CandidateListingAttributes {
    /// Combined age in months, or `None` when the year component is unknown
    pub fn age_in_months(&self) -> Option<i64> {
        self.age_years
            .map(|years| i64::from(years) * 12 + i64::from(self.age_months.unwrap_or(0)))
    }

    /// Human readable age, e.g. "2 years, 3 months"
    pub fn age_display(&self) -> String {
        match self.age_years {
            Some(years) => format!("{} years, {} months", years, self.age_months.unwrap_or(0)),
            None => "unknown age".to_string(),
        }
    }
}

/// An existing listing belonging to the organization being screened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingListing {
    pub id: i32,
    pub attributes: CandidateListingAttributes,
}

/// An existing listing that crossed the duplicate threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarListing {
    pub id: i32,
    pub name: Option<String>,
    pub breed: Option<String>,
    #[serde(rename = "ageDisplay")]
    pub age_display: String,
    #[serde(rename = "similarityScore")]
    pub similarity_score: f64,
}

/// Aggregated outcome of screening one new listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateScreeningResult {
    #[serde(rename = "isDuplicate")]
    pub is_duplicate: bool,
    #[serde(rename = "similarListings")]
    pub similar_listings: Vec<SimilarListing>,
    #[serde(rename = "maxSimilarity")]
    pub max_similarity: f64,
    #[serde(rename = "highSimilarityCount")]
    pub high_similarity_count: usize,
    #[serde(rename = "limitExceeded")]
    pub limit_exceeded: bool,
    #[serde(rename = "similarityLimit")]
    pub similarity_limit: usize,
}

/// What the caller should do with a screened listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreeningDecision {
    /// Create the listing
    Allow,
    /// Ask the lister to confirm; may be overridden
    Warn,
    /// Refuse creation; never overridable
    Block,
}

impl DuplicateScreeningResult {
    pub fn decision(&self, override_duplicate: bool) -> ScreeningDecision {
        if self.limit_exceeded {
            ScreeningDecision::Block
        } else if self.is_duplicate && !override_duplicate {
            ScreeningDecision::Warn
        } else {
            ScreeningDecision::Allow
        }
    }
}

/// Outcome of ranking animals for one adopter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatches {
    pub matches: Vec<MatchResult>,
    pub total: usize,
    #[serde(rename = "requiresPreferences")]
    pub requires_preferences: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RankedMatches {
    pub(crate) fn needs_preferences() -> Self {
        Self {
            matches: Vec::new(),
            total: 0,
            requires_preferences: true,
            message: Some("Please complete your basic preferences to get matches".to_string()),
        }
    }

    pub(crate) fn ranked(matches: Vec<MatchResult>) -> Self {
        Self {
            total: matches.len(),
            matches,
            requires_preferences: false,
            message: None,
        }
    }
}

/// Per-attribute weights for listing similarity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingWeights {
    pub name: f64,
    pub breed: f64,
    pub age: f64,
    pub size: f64,
    pub color: f64,
    pub gender: f64,
}

impl ListingWeights {
    pub fn total(&self) -> f64 {
        self.name + self.breed + self.age + self.size + self.color + self.gender
    }
}

impl Default for ListingWeights {
    fn default() -> Self {
        Self {
            name: 30.0,
            breed: 25.0,
            age: 20.0,
            size: 10.0,
            color: 10.0,
            gender: 5.0,
        }
    }
}

/// Immutable ranking parameters, fixed when the ranker is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchingConfig {
    /// Maximum number of available animals fetched per ranking
    pub candidate_limit: usize,
    /// Scores must be strictly above this to be surfaced
    pub inclusion_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            candidate_limit: 100,
            inclusion_threshold: 30.0,
        }
    }
}

/// Immutable duplicate screening parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreeningConfig {
    /// Similarity at or above which a listing is reported as similar
    pub threshold: f64,
    /// Similarity at or above which a listing counts toward the hard limit
    pub high_similarity_threshold: f64,
    /// Number of highly similar listings that blocks creation
    pub similarity_limit: usize,
    pub fuzzy_threshold: f64,
    pub weights: ListingWeights,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            threshold: 85.0,
            high_similarity_threshold: 90.0,
            similarity_limit: 3,
            fuzzy_threshold: 0.8,
            weights: ListingWeights::default(),
        }
    }
}
