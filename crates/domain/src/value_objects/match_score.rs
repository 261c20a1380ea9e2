//! MatchScore - similarity between two owners on a 0..=100 scale

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentage-style similarity score used by the discover tab.
///
/// Construction saturates at 100, so any arithmetic done by a scorer can be
/// handed over without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchScore(u8);

impl MatchScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u32) -> Self {
        Self(value.min(Self::MAX as u32) as u8)
    }

    /// Clamp to a ceiling lower than [`MatchScore::MAX`]
    pub fn clamped(value: u32, ceiling: u8) -> Self {
        Self::new(value.min(ceiling as u32))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
