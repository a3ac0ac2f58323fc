//! Policy tiers and the gating rules they map to.

use serde::{Deserialize, Serialize};

/// Coarse classification of a profile used to pick a content-interaction
/// gating rule downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyTier {
    /// Looser interaction policy, granted to accounts with a small
    /// following graph.
    Broad,
    /// Tighter interaction policy for accounts with a broad following graph.
    Restricted,
}

impl Default for PolicyTier {
    fn default() -> Self {
        Self::Broad
    }
}

/// Content-interaction gating rule applied by downstream interaction logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatingPolicy {
    /// Only followers of the acting profile may interact.
    FollowerOnly,
    /// Interaction gated by degrees of separation in the social graph.
    DegreesOfSeparation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tier_is_broad() {
        assert_eq!(PolicyTier::default(), PolicyTier::Broad);
    }

    #[test]
    fn tier_serializes_snake_case() {
        let json = serde_json::to_string(&PolicyTier::Restricted).unwrap();
        assert_eq!(json, "\"restricted\"");
    }
}
