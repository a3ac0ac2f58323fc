//! Collaborator seams consumed by the session manager.
//!
//! The manager never talks to a wallet, network, registry, token store, or
//! messaging transport directly; everything outside the reconciliation core
//! arrives through these traits. Reference in-memory implementations live in
//! [`crate::memory`], a durable selector store in [`crate::store`].

use crate::error::{RegistryError, StoreError, TeardownError};
use async_trait::async_trait;
use hawser_types::{Address, NetworkId, OwnedProfiles, ProfileId};

/// Connection to the user's signing device.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Canonical address of the connected account, absent while disconnected.
    fn address(&self) -> Option<Address>;

    /// Severs the wallet connection. Idempotent: disconnecting an already
    /// disconnected wallet succeeds.
    async fn disconnect(&self) -> Result<(), TeardownError>;
}

/// Reports which network the wallet currently operates on.
pub trait NetworkProvider: Send + Sync {
    fn network(&self) -> Option<NetworkId>;
}

/// Remote registry of application profiles.
#[async_trait]
pub trait ProfileRegistry: Send + Sync {
    /// Every profile owned by `address`, plus the wallet's current signing
    /// nonce. A wallet without profiles yields an empty set, not an error.
    /// Timeouts and retries are the implementation's concern.
    async fn profiles_owned_by(&self, address: &Address) -> Result<OwnedProfiles, RegistryError>;
}

/// Holds the access/refresh token material issued by the login flow.
pub trait AuthTokenStore: Send + Sync {
    /// Whether usable token material is present. Expiry rules are the
    /// implementation's concern.
    fn has_valid_tokens(&self) -> bool;

    /// Drops all token material. Idempotent.
    fn clear(&self) -> Result<(), TeardownError>;
}

/// End-to-end messaging transport bound to the session.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Drops the active messaging session. Idempotent.
    async fn disconnect_session(&self) -> Result<(), TeardownError>;
}

/// Durable storage for the persisted profile selector.
///
/// The selector is the only durable state the reconciliation core owns: it is
/// written by the external login flow and read or cleared here.
pub trait SelectorStore: Send + Sync {
    fn get(&self) -> Result<Option<ProfileId>, StoreError>;

    /// Stores `id`, returning whether the stored value changed.
    fn set(&self, id: &ProfileId) -> Result<bool, StoreError>;

    /// Removes the selector, returning whether one was present.
    fn clear(&self) -> Result<bool, StoreError>;
}
