//! Core data model for the hawser wallet-session reconciliation core.
//!
//! This crate centralizes the vocabulary shared by the resolver, the policy
//! classifier, and the session validator: wallet identity, profiles, policy
//! tiers, derived session state, and the session event stream. It carries no
//! behavior beyond plain data and cheap accessors so the pure components can
//! depend on it without dragging in runtime concerns.

#![deny(unsafe_code)]

pub mod event;
pub mod identity;
pub mod policy;
pub mod profile;
pub mod session;

pub use event::{
    EventSeverity, IdentityChange, InvalidationReason, SelectorClearCause, SessionEvent,
    SessionEventEnvelope, TeardownStep,
};
pub use identity::{Address, NetworkId, WalletIdentity};
pub use policy::{GatingPolicy, PolicyTier};
pub use profile::{OwnedProfiles, Profile, ProfileId};
pub use session::{SessionPhase, SessionSnapshot, SessionState};
