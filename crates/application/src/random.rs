//! Injectable randomness for the match scorer

use parking_lot::Mutex;
use rand::Rng;
use std::collections::VecDeque;

pub trait RandomSource: Send + Sync {
    /// Uniform integer in `0..upper`; always 0 when `upper` is 0
    fn below(&self, upper: u32) -> u32;
}

/// Thread-local RNG from `rand`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Always the same value, capped to `upper - 1`
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn below(&self, upper: u32) -> u32 {
        self.0.min(upper.saturating_sub(1))
    }
}

/// Replays values in order (each taken modulo `upper`), then yields 0
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: Mutex<VecDeque<u32>>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn below(&self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.values.lock().pop_front().map_or(0, |v| v % upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_stays_in_range() {
        let rng = ThreadRandom;
        for _ in 0..200 {
            assert!(rng.below(5) < 5);
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn test_fixed_and_sequence() {
        assert_eq!(FixedRandom(9).below(5), 4);
        assert_eq!(FixedRandom(2).below(5), 2);

        let seq = SequenceRandom::new([3, 7]);
        assert_eq!(seq.below(5), 3);
        assert_eq!(seq.below(5), 2);
        assert_eq!(seq.below(5), 0);
    }
}
