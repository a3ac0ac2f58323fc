//! Profiles: application-level identities owned by a wallet address.

use crate::identity::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a profile in the remote registry.
///
/// Registry ids are usually `0x`-prefixed hex strings but plain decimal ids
/// occur as well; [`ProfileId::numeric`] understands both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id: `0x`-prefixed hex or plain decimal.
    ///
    /// Returns `None` for ids that carry no numeric value; such ids sort
    /// after numeric ones when profile lists are ordered.
    pub fn numeric(&self) -> Option<u128> {
        match self.0.strip_prefix("0x").or_else(|| self.0.strip_prefix("0X")) {
            Some(hex) => u128::from_str_radix(hex, 16).ok(),
            None => self.0.parse::<u128>().ok(),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable profile snapshot fetched from the remote registry.
///
/// Owned by the registry; the core only reads it and recomputes derived state
/// from a fresh snapshot on every reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    /// Wallet address that owns this profile.
    pub owned_by: Address,
    /// Whether the wallet marked this profile as its default.
    pub is_default: bool,
    /// Size of the profile's following graph; absent counts as zero.
    #[serde(default)]
    pub total_following: Option<u32>,
}

impl Profile {
    /// Following-graph size with the absent value defaulted to zero.
    pub fn following_count(&self) -> u32 {
        self.total_following.unwrap_or(0)
    }
}

/// One registry fetch result: all profiles owned by a wallet plus the
/// wallet's current on-chain signing nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedProfiles {
    pub profiles: Vec<Profile>,
    pub sig_nonce: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_parses_hex_ids() {
        assert_eq!(ProfileId::new("0x0d").numeric(), Some(13));
        assert_eq!(ProfileId::new("0X10").numeric(), Some(16));
    }

    #[test]
    fn numeric_parses_decimal_ids() {
        assert_eq!(ProfileId::new("42").numeric(), Some(42));
    }

    #[test]
    fn numeric_rejects_non_numeric_ids() {
        assert_eq!(ProfileId::new("primary").numeric(), None);
        assert_eq!(ProfileId::new("0xzz").numeric(), None);
        assert_eq!(ProfileId::new("").numeric(), None);
    }

    #[test]
    fn following_count_defaults_to_zero() {
        let profile = Profile {
            id: ProfileId::new("0x01"),
            owned_by: Address::new("0xA"),
            is_default: false,
            total_following: None,
        };
        assert_eq!(profile.following_count(), 0);
    }

    #[test]
    fn profile_matches_registry_wire_shape() {
        let json = r#"{
            "id": "0x0d",
            "ownedBy": "0xA11CE",
            "isDefault": true,
            "totalFollowing": 21
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, ProfileId::new("0x0d"));
        assert_eq!(profile.owned_by, Address::new("0xA11CE"));
        assert!(profile.is_default);
        assert_eq!(profile.total_following, Some(21));
    }

    #[test]
    fn profile_tolerates_missing_following_count() {
        let json = r#"{"id": "0x01", "ownedBy": "0xA", "isDefault": false}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.total_following, None);
    }

    #[test]
    fn owned_profiles_round_trips() {
        let owned = OwnedProfiles {
            profiles: vec![],
            sig_nonce: 7,
        };
        let json = serde_json::to_string(&owned).unwrap();
        assert!(json.contains("sigNonce"));
        let restored: OwnedProfiles = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, owned);
    }
}
