//! Property tests for the discover-tab scorer

use application::{FixedRandom, MatchWeights, RecommendationScorer, SequenceRandom};
use domain::fixtures;
use domain::OwnerProfile;
use proptest::prelude::*;
use std::sync::Arc;

fn owner(id: &str, interests: &[String]) -> OwnerProfile {
    let mut owner = fixtures::owner_luna();
    owner.id = id.to_string();
    owner.interests = interests.to_vec();
    owner.cats.clear();
    owner
}

fn tags(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

proptest! {
    #[test]
    fn test_disjoint_interests_score_base_plus_jitter(
        mine in 0usize..6,
        theirs in 0usize..6,
        jitter in 0u32..10,
    ) {
        let weights = MatchWeights::default();
        let scorer = RecommendationScorer::new(weights, Arc::new(FixedRandom(jitter)));
        let me = owner("me", &tags("a", mine));
        let other = owner("other", &tags("b", theirs));

        let score = u32::from(scorer.score(&me, &other).match_score.value());
        prop_assert!(score >= weights.base);
        prop_assert!(score < weights.base + weights.jitter_bound);
    }

    #[test]
    fn test_shared_interests_raise_score(shared in 0usize..8, jitter in 0u32..5) {
        let weights = MatchWeights::default();
        let scorer = RecommendationScorer::new(weights, Arc::new(FixedRandom(jitter)));
        let common = tags("t", shared);
        let me = owner("me", &common);
        let mut theirs = common.clone();
        theirs.push("extra".into());
        let other = owner("other", &theirs);

        let score = u32::from(scorer.score(&me, &other).match_score.value());
        let floor = weights.raw_score(shared).min(u32::from(weights.ceiling));
        prop_assert!(score >= floor);
        prop_assert!(score <= u32::from(weights.ceiling));
    }

    #[test]
    fn test_ranking_is_sorted(
        overlaps in prop::collection::vec(0usize..5, 1..12),
        jitters in prop::collection::vec(0u32..5, 12),
    ) {
        let scorer = RecommendationScorer::new(
            MatchWeights::default(),
            Arc::new(SequenceRandom::new(jitters)),
        );
        let me = owner("me", &tags("t", 5));
        let candidates: Vec<OwnerProfile> = overlaps
            .iter()
            .enumerate()
            .map(|(i, &k)| owner(&format!("o{i}"), &tags("t", k)))
            .collect();

        let ranked = scorer.rank(&me, &candidates);
        prop_assert_eq!(ranked.len(), candidates.len());
        prop_assert!(ranked.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    }
}

#[test]
fn test_rank_skips_self() {
    let scorer = RecommendationScorer::new(MatchWeights::default(), Arc::new(FixedRandom(0)));
    let me = fixtures::owner_me();
    let ranked = scorer.rank(&me, &fixtures::owners());
    assert!(ranked.iter().all(|m| m.owner.id != me.id));
}
