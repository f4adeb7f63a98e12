//! Score accumulation

use serde::{Deserialize, Serialize};

/// Running score, floored at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    points: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, points: u32) {
        self.points += u64::from(points);
    }

    /// Subtract, clamping at zero
    pub fn deduct(&mut self, points: u32) {
        self.points = self.points.saturating_sub(u64::from(points));
    }

    pub fn value(&self) -> u64 {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_deduct_floors_at_zero() {
        let mut score = ScoreTracker::new();
        score.add(30);
        score.deduct(20);
        assert_eq!(score.value(), 10);
        score.deduct(100);
        assert_eq!(score.value(), 0);
    }

    proptest! {
        #[test]
        fn prop_score_tracks_floored_sum(ops in proptest::collection::vec((any::<bool>(), 0u32..500), 0..100)) {
            let mut score = ScoreTracker::new();
            let mut model: i64 = 0;
            for (is_add, points) in ops {
                if is_add {
                    score.add(points);
                    model += i64::from(points);
                } else {
                    score.deduct(points);
                    model = (model - i64::from(points)).max(0);
                }
                prop_assert_eq!(score.value() as i64, model);
            }
        }
    }
}
