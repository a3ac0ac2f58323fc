//! Follower-count tier rule.

use hawser_types::{GatingPolicy, PolicyTier, Profile};

/// Following-graph size above which an account classifies as restricted.
pub const RESTRICTED_FOLLOWING_THRESHOLD: u32 = 20;

/// Classifies a profile by the size of its following graph.
///
/// An absent count classifies as zero, so new or sparsely populated profiles
/// land in the broad tier. The boundary is strict: a count equal to the
/// threshold stays broad.
pub fn classify(profile: &Profile) -> PolicyTier {
    if profile.following_count() > RESTRICTED_FOLLOWING_THRESHOLD {
        PolicyTier::Restricted
    } else {
        PolicyTier::Broad
    }
}

/// Content-interaction gating rule implied by a tier.
pub fn gating_policy(tier: PolicyTier) -> GatingPolicy {
    match tier {
        PolicyTier::Restricted => GatingPolicy::DegreesOfSeparation,
        PolicyTier::Broad => GatingPolicy::FollowerOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hawser_types::{Address, ProfileId};

    fn profile_following(total_following: Option<u32>) -> Profile {
        Profile {
            id: ProfileId::new("0x01"),
            owned_by: Address::new("0xA11CE"),
            is_default: true,
            total_following,
        }
    }

    #[test]
    fn at_threshold_stays_broad() {
        let tier = classify(&profile_following(Some(RESTRICTED_FOLLOWING_THRESHOLD)));
        assert_eq!(tier, PolicyTier::Broad);
    }

    #[test]
    fn above_threshold_is_restricted() {
        let tier = classify(&profile_following(Some(RESTRICTED_FOLLOWING_THRESHOLD + 1)));
        assert_eq!(tier, PolicyTier::Restricted);
    }

    #[test]
    fn absent_count_classifies_as_zero() {
        assert_eq!(classify(&profile_following(None)), PolicyTier::Broad);
    }

    #[test]
    fn tiers_map_to_gating_rules() {
        assert_eq!(gating_policy(PolicyTier::Broad), GatingPolicy::FollowerOnly);
        assert_eq!(
            gating_policy(PolicyTier::Restricted),
            GatingPolicy::DegreesOfSeparation
        );
    }
}
