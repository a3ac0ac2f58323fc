//! Session validation and reconciliation for wallet-bound profile sessions.
//!
//! The manager here owns the third leg of the reconciliation core: it watches
//! the wallet identity, keeps the persisted selector consistent with the
//! profiles the wallet actually owns, and tears the session down when the
//! identity moves out from under it. Profile ordering lives in
//! `hawser-resolver` and tier classification in `hawser-policy`; this crate
//! drives both and talks to everything external through the traits in
//! [`traits`].

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod manager;
pub mod memory;
pub mod store;
pub mod traits;
pub mod validity;

pub use config::SessionConfig;
pub use error::{RegistryError, SessionError, StoreError, TeardownError};
pub use manager::{Collaborators, SessionHandle, SessionManager};
pub use store::JsonFileSelectorStore;
pub use traits::{
    AuthTokenStore, MessagingClient, NetworkProvider, ProfileRegistry, SelectorStore,
    WalletConnector,
};
