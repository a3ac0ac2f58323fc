//! In-memory reference implementations of the collaborator seams.
//!
//! These adapters are deterministic and test-friendly. Production embedders
//! wire the traits to a real wallet connector, registry client, token vault,
//! and messaging transport instead.

use crate::error::{RegistryError, StoreError, TeardownError};
use crate::traits::{
    AuthTokenStore, MessagingClient, NetworkProvider, ProfileRegistry, SelectorStore,
    WalletConnector,
};
use async_trait::async_trait;
use hawser_types::{Address, NetworkId, OwnedProfiles, ProfileId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// In-memory wallet connector.
#[derive(Default)]
pub struct InMemoryWallet {
    address: RwLock<Option<Address>>,
    disconnects: AtomicUsize,
}

impl InMemoryWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(address: Address) -> Self {
        Self {
            address: RwLock::new(Some(address)),
            disconnects: AtomicUsize::new(0),
        }
    }

    /// Simulates the user connecting, switching, or disconnecting accounts.
    pub fn set_address(&self, address: Option<Address>) {
        *self.address.write().unwrap_or_else(PoisonError::into_inner) = address;
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WalletConnector for InMemoryWallet {
    fn address(&self) -> Option<Address> {
        self.address
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn disconnect(&self) -> Result<(), TeardownError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        *self.address.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// In-memory network provider.
#[derive(Default)]
pub struct InMemoryNetwork {
    network: RwLock<Option<NetworkId>>,
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(network: NetworkId) -> Self {
        Self {
            network: RwLock::new(Some(network)),
        }
    }

    /// Simulates a network switch; `None` simulates losing the network.
    pub fn set_network(&self, network: Option<NetworkId>) {
        *self.network.write().unwrap_or_else(PoisonError::into_inner) = network;
    }
}

impl NetworkProvider for InMemoryNetwork {
    fn network(&self) -> Option<NetworkId> {
        *self.network.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// In-memory profile registry.
///
/// Unknown wallets resolve to an empty owned set, matching the remote
/// registry's behavior for wallets that never minted a profile.
#[derive(Default)]
pub struct InMemoryProfileRegistry {
    owned: RwLock<HashMap<Address, OwnedProfiles>>,
    failing: AtomicBool,
    delay: RwLock<Option<Duration>>,
    fetches: AtomicUsize,
}

impl InMemoryProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_owned(&self, address: Address, owned: OwnedProfiles) {
        self.owned
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address, owned);
    }

    /// Makes every subsequent fetch fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Adds artificial latency to every fetch.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().unwrap_or_else(PoisonError::into_inner) = delay;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRegistry for InMemoryProfileRegistry {
    async fn profiles_owned_by(&self, address: &Address) -> Result<OwnedProfiles, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(RegistryError::Unavailable("forced failure".to_string()));
        }

        let owned = self.owned.read().unwrap_or_else(PoisonError::into_inner);
        Ok(owned.get(address).cloned().unwrap_or(OwnedProfiles {
            profiles: Vec::new(),
            sig_nonce: 0,
        }))
    }
}

/// In-memory auth-token store.
#[derive(Default)]
pub struct InMemoryAuthTokens {
    valid: AtomicBool,
    clears: AtomicUsize,
}

impl InMemoryAuthTokens {
    /// Starts with no token material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with usable tokens, as after a completed login flow.
    pub fn with_valid_tokens() -> Self {
        Self {
            valid: AtomicBool::new(true),
            clears: AtomicUsize::new(0),
        }
    }

    pub fn grant(&self) {
        self.valid.store(true, Ordering::SeqCst);
    }

    pub fn revoke(&self) {
        self.valid.store(false, Ordering::SeqCst);
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl AuthTokenStore for InMemoryAuthTokens {
    fn has_valid_tokens(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }

    fn clear(&self) -> Result<(), TeardownError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.valid.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory messaging client.
#[derive(Default)]
pub struct InMemoryMessaging {
    disconnects: AtomicUsize,
    failure: RwLock<Option<String>>,
}

impl InMemoryMessaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent disconnect fail with `message`. The attempt is
    /// still counted.
    pub fn fail_with(&self, message: &str) {
        *self.failure.write().unwrap_or_else(PoisonError::into_inner) =
            Some(message.to_string());
    }

    pub fn disconnect_count(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingClient for InMemoryMessaging {
    async fn disconnect_session(&self) -> Result<(), TeardownError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);

        let failure = self
            .failure
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match failure {
            Some(message) => Err(TeardownError::Failed(message)),
            None => Ok(()),
        }
    }
}

/// In-memory selector store.
#[derive(Default)]
pub struct InMemorySelectorStore {
    selector: RwLock<Option<ProfileId>>,
}

impl InMemorySelectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a selector already persisted, as after a login.
    pub fn holding(id: ProfileId) -> Self {
        Self {
            selector: RwLock::new(Some(id)),
        }
    }
}

impl SelectorStore for InMemorySelectorStore {
    fn get(&self) -> Result<Option<ProfileId>, StoreError> {
        let guard = self.selector.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    fn set(&self, id: &ProfileId) -> Result<bool, StoreError> {
        let mut guard = self.selector.write().map_err(|_| StoreError::LockPoisoned)?;
        let changed = guard.as_ref() != Some(id);
        *guard = Some(id.clone());
        Ok(changed)
    }

    fn clear(&self) -> Result<bool, StoreError> {
        let mut guard = self.selector.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(guard.take().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wallet_disconnect_drops_the_address() {
        let wallet = InMemoryWallet::connected(Address::new("0xA"));
        wallet.disconnect().await.unwrap();
        assert_eq!(wallet.address(), None);
        assert_eq!(wallet.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn unknown_wallet_owns_nothing() {
        let registry = InMemoryProfileRegistry::new();
        let owned = registry
            .profiles_owned_by(&Address::new("0xDEAD"))
            .await
            .unwrap();
        assert!(owned.profiles.is_empty());
    }

    #[tokio::test]
    async fn failing_registry_reports_unavailable() {
        let registry = InMemoryProfileRegistry::new();
        registry.set_failing(true);
        let result = registry.profiles_owned_by(&Address::new("0xA")).await;
        assert!(matches!(result, Err(RegistryError::Unavailable(_))));
    }

    #[test]
    fn selector_set_reports_whether_it_changed() {
        let store = InMemorySelectorStore::new();
        let id = ProfileId::new("0x01");
        assert!(store.set(&id).unwrap());
        assert!(!store.set(&id).unwrap());
        assert!(store.set(&ProfileId::new("0x02")).unwrap());
    }

    #[test]
    fn selector_clear_reports_presence() {
        let store = InMemorySelectorStore::holding(ProfileId::new("0x01"));
        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
    }

    #[tokio::test]
    async fn messaging_failure_still_counts_the_attempt() {
        let messaging = InMemoryMessaging::new();
        messaging.fail_with("transport gone");
        assert!(messaging.disconnect_session().await.is_err());
        assert_eq!(messaging.disconnect_count(), 1);
    }
}
