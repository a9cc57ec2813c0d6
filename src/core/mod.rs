// Core algorithm exports
pub mod compatibility;
pub mod fuzzy;
pub mod ranking;
pub mod screening;
pub mod similarity;

pub use compatibility::{compatibility_score, score_breakdown, Adjustment, Rule, ScoreBreakdown};
pub use fuzzy::{fuzzy_match, DEFAULT_FUZZY_THRESHOLD};
pub use ranking::{MatchError, MatchRanker};
pub use screening::{DuplicateScreener, ScreeningError};
pub use similarity::{listing_similarity, similarity};
