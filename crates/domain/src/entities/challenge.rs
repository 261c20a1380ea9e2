//! CatChallenge - time-boxed hashtag campaigns with coin rewards

use serde::{Deserialize, Serialize};

use crate::{Coins, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatChallenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward: Coins,
    /// Hashtag including the leading `#`
    pub tag: String,
    pub is_active: bool,
    pub end_date: Timestamp,
}

impl CatChallenge {
    /// Tag without the leading `#`
    pub fn bare_tag(&self) -> &str {
        self.tag.trim_start_matches('#')
    }
}
