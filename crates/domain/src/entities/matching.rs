//! RecommendedMatch - transient discover-tab result, never persisted

use serde::{Deserialize, Serialize};

use super::OwnerProfile;
use crate::value_objects::MatchScore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedMatch {
    pub owner: OwnerProfile,
    pub match_score: MatchScore,
    pub reason: String,
}
