//! Static capability allowlist.
//!
//! Membership grants the privileged flag unconditionally, independent of
//! which network the wallet is on.

use hawser_types::ProfileId;

/// Profile ids granted the privileged capability flag.
pub const PRIVILEGED_PROFILE_IDS: &[&str] = &["0x0d"];

/// Exact-match membership test against [`PRIVILEGED_PROFILE_IDS`].
pub fn is_privileged(id: &ProfileId) -> bool {
    PRIVILEGED_PROFILE_IDS.contains(&id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_id_is_privileged() {
        assert!(is_privileged(&ProfileId::new("0x0d")));
    }

    #[test]
    fn unlisted_id_is_not() {
        assert!(!is_privileged(&ProfileId::new("0x0e")));
    }

    #[test]
    fn membership_is_exact_match() {
        // "0x0D" and "0x0d" name the same number but the allowlist compares
        // the raw id string.
        assert!(!is_privileged(&ProfileId::new("0x0D")));
    }
}
