//! Session validity predicate.

use hawser_types::{Address, InvalidationReason, NetworkId, WalletIdentity};

/// Collects every reason the observed wallet identity fails validation
/// against the session.
///
/// The caller gates on selector presence separately: a wallet that never
/// logged in must not reach teardown side effects no matter what this
/// returns.
pub fn violations(
    wallet: &WalletIdentity,
    required_network: NetworkId,
    has_valid_tokens: bool,
    current_owner: Option<&Address>,
) -> Vec<InvalidationReason> {
    let mut reasons = Vec::new();

    if !has_valid_tokens {
        reasons.push(InvalidationReason::MissingAuthTokens);
    }

    // An absent network counts as the wrong one.
    if wallet.network != Some(required_network) {
        reasons.push(InvalidationReason::WrongNetwork);
    }

    // Account switch only applies while some profile is acting: the wallet
    // address moved away from the owner of the current profile.
    if let Some(owner) = current_owner {
        if wallet.address.as_ref() != Some(owner) {
            reasons.push(InvalidationReason::AccountSwitched);
        }
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: NetworkId = NetworkId::new(137);

    fn connected(address: &str) -> WalletIdentity {
        WalletIdentity::connected(Address::new(address), NETWORK)
    }

    #[test]
    fn healthy_session_has_no_violations() {
        let owner = Address::new("0xA");
        let reasons = violations(&connected("0xA"), NETWORK, true, Some(&owner));
        assert!(reasons.is_empty());
    }

    #[test]
    fn missing_tokens_flagged() {
        let reasons = violations(&connected("0xA"), NETWORK, false, None);
        assert_eq!(reasons, [InvalidationReason::MissingAuthTokens]);
    }

    #[test]
    fn other_network_flagged() {
        let wallet = WalletIdentity::connected(Address::new("0xA"), NetworkId::new(1));
        let reasons = violations(&wallet, NETWORK, true, None);
        assert_eq!(reasons, [InvalidationReason::WrongNetwork]);
    }

    #[test]
    fn absent_network_counts_as_wrong() {
        let wallet = WalletIdentity {
            address: Some(Address::new("0xA")),
            network: None,
        };
        let reasons = violations(&wallet, NETWORK, true, None);
        assert_eq!(reasons, [InvalidationReason::WrongNetwork]);
    }

    #[test]
    fn moved_address_flags_account_switch() {
        let owner = Address::new("0xA");
        let reasons = violations(&connected("0xB"), NETWORK, true, Some(&owner));
        assert_eq!(reasons, [InvalidationReason::AccountSwitched]);
    }

    #[test]
    fn disconnected_wallet_flags_account_switch_while_profile_acts() {
        let owner = Address::new("0xA");
        let reasons = violations(&WalletIdentity::disconnected(), NETWORK, true, Some(&owner));
        assert!(reasons.contains(&InvalidationReason::AccountSwitched));
    }

    #[test]
    fn no_current_profile_means_no_account_switch() {
        let reasons = violations(&connected("0xB"), NETWORK, true, None);
        assert!(reasons.is_empty());
    }

    #[test]
    fn violations_accumulate() {
        let owner = Address::new("0xA");
        let wallet = WalletIdentity {
            address: Some(Address::new("0xB")),
            network: None,
        };
        let reasons = violations(&wallet, NETWORK, false, Some(&owner));
        assert_eq!(
            reasons,
            [
                InvalidationReason::MissingAuthTokens,
                InvalidationReason::WrongNetwork,
                InvalidationReason::AccountSwitched,
            ]
        );
    }
}
