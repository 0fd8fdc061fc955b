use crate::model::confusion::ConfusionMatrix;

/// Unordered pair of workers, stored as `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RaterPairKey {
    low: i64,
    high: i64,
}

impl RaterPairKey {
    /// Returns `None` for a worker paired with itself.
    pub fn new(a: i64, b: i64) -> Option<RaterPairKey> {
        if a == b {
            return None;
        }
        Some(RaterPairKey {
            low: a.min(b),
            high: a.max(b),
        })
    }

    pub fn low(&self) -> i64 {
        self.low
    }

    pub fn high(&self) -> i64 {
        self.high
    }
}

impl std::fmt::Display for RaterPairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.low, self.high)
    }
}

/// Both rating dimensions for one service and one rater pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairMatrices {
    pub fluency: ConfusionMatrix,
    pub adequacy: ConfusionMatrix,
}
