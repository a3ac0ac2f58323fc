//! Wallet identity: the address/network pair controlled by the signing device.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wallet address in the canonical form reported by the wallet connector.
///
/// Addresses are compared exactly; the connector is responsible for reporting
/// a stable canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chain identifier reported by the network provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(u64);

impl NetworkId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The wallet identity observed at the start of a reconciliation pass.
///
/// Transient: produced by the wallet and network collaborators, mutated only
/// by external wallet/network-switch events and never persisted by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletIdentity {
    /// Connected wallet address, absent while disconnected.
    pub address: Option<Address>,
    /// Network the wallet is currently on, absent while disconnected.
    pub network: Option<NetworkId>,
}

impl WalletIdentity {
    /// Identity of a fully connected wallet.
    pub fn connected(address: Address, network: NetworkId) -> Self {
        Self {
            address: Some(address),
            network: Some(network),
        }
    }

    /// Identity of a disconnected wallet.
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_compares_exactly() {
        let a = Address::new("0xAbC1");
        let b = Address::new("0xabc1");
        assert_ne!(a, b);
        assert_eq!(a, Address::new("0xAbC1"));
    }

    #[test]
    fn connected_identity_has_address() {
        let identity = WalletIdentity::connected(Address::new("0xA"), NetworkId::new(137));
        assert!(identity.is_connected());
        assert_eq!(identity.network, Some(NetworkId::new(137)));
    }

    #[test]
    fn disconnected_identity_is_empty() {
        let identity = WalletIdentity::disconnected();
        assert!(!identity.is_connected());
        assert_eq!(identity.network, None);
    }
}
