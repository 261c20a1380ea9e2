//! Discover-tab matching: interest overlap plus a small random jitter

use domain::entities::{OwnerProfile, RecommendedMatch};
use domain::MatchScore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::random::{RandomSource, ThreadRandom};

pub const MATCH_LEAD_IN: &str = "Matched via Neural Discovery. ";

/// `score = base + shared × per_shared_interest + jitter`, capped at `ceiling`.
/// Jitter is drawn from `0..jitter_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub base: u32,
    pub per_shared_interest: u32,
    pub jitter_bound: u32,
    pub ceiling: u8,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            base: 65,
            per_shared_interest: 8,
            jitter_bound: 5,
            ceiling: 99,
        }
    }
}

impl MatchWeights {
    /// Score before jitter and clamping
    pub fn raw_score(&self, shared_interests: usize) -> u32 {
        let shared = u32::try_from(shared_interests).unwrap_or(u32::MAX);
        self.base
            .saturating_add(shared.saturating_mul(self.per_shared_interest))
    }
}

#[derive(Clone)]
pub struct RecommendationScorer {
    weights: MatchWeights,
    rng: Arc<dyn RandomSource>,
}

impl RecommendationScorer {
    pub fn new(weights: MatchWeights, rng: Arc<dyn RandomSource>) -> Self {
        Self { weights, rng }
    }

    pub fn with_thread_rng(weights: MatchWeights) -> Self {
        Self::new(weights, Arc::new(ThreadRandom))
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn score(&self, me: &OwnerProfile, candidate: &OwnerProfile) -> RecommendedMatch {
        let shared = candidate.shared_interests(me);
        let jitter = self.rng.below(self.weights.jitter_bound);
        let total = self.weights.raw_score(shared.len()).saturating_add(jitter);

        RecommendedMatch {
            owner: candidate.clone(),
            match_score: MatchScore::clamped(total, self.weights.ceiling),
            reason: match_reason(me, candidate, &shared),
        }
    }

    /// Rank every candidate except `me`, best first. Equal scores keep
    /// candidate order.
    pub fn rank(&self, me: &OwnerProfile, candidates: &[OwnerProfile]) -> Vec<RecommendedMatch> {
        let mut matches: Vec<RecommendedMatch> = candidates
            .iter()
            .filter(|c| c.id != me.id)
            .map(|c| self.score(me, c))
            .collect();

        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        debug!(user_id = %me.id, candidates = matches.len(), "Ranked matches");
        matches
    }
}

fn match_reason(me: &OwnerProfile, candidate: &OwnerProfile, shared: &[&str]) -> String {
    let mut reason = String::from(MATCH_LEAD_IN);
    if !shared.is_empty() {
        reason.push_str(&format!("Both interested in {}. ", shared.join(", ")));
    }

    if let (Some(theirs), Some(mine)) = (candidate.primary_cat(), me.primary_cat()) {
        if theirs.breed == mine.breed {
            reason.push_str(&format!("Shared passion for {}s.", theirs.breed));
        }
    }
    reason
}
