//! Derived session state and its lifecycle phases.

use crate::policy::PolicyTier;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the wallet-bound session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No persisted selector; the wallet is treated as never logged in.
    LoggedOut,
    /// A selector is bound to the wallet and has survived validation.
    Authenticated,
    /// Transient: teardown in progress, always exits to [`SessionPhase::LoggedOut`].
    Invalidating,
}

/// Session state derived from one reconciliation pass.
///
/// Recomputed wholesale on every successful registry fetch and discarded on
/// invalidation; never partially mutated across passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Profiles owned by the wallet: default profile first, then ascending
    /// numeric id.
    pub profiles: Vec<Profile>,
    /// The profile currently acting for the session, if any.
    pub current_profile: Option<Profile>,
    /// On-chain signing nonce from the most recent successful fetch.
    pub sig_nonce: Option<u64>,
    pub policy_tier: PolicyTier,
    /// Static-allowlist capability flag for the selected profile.
    pub privileged: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::LoggedOut,
            profiles: Vec::new(),
            current_profile: None,
            sig_nonce: None,
            policy_tier: PolicyTier::default(),
            privileged: false,
        }
    }
}

impl SessionState {
    /// The state every invalidation resets to.
    pub fn logged_out() -> Self {
        Self::default()
    }
}

/// Read-only view of the session handed to UI consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub profiles: Vec<Profile>,
    pub current_profile: Option<Profile>,
    pub sig_nonce: Option<u64>,
    pub policy_tier: PolicyTier,
    pub privileged: bool,
    /// True once the first reconciliation pass has completed.
    pub ready: bool,
}

impl SessionSnapshot {
    pub fn from_state(state: &SessionState, ready: bool) -> Self {
        Self {
            phase: state.phase,
            profiles: state.profiles.clone(),
            current_profile: state.current_profile.clone(),
            sig_nonce: state.sig_nonce,
            policy_tier: state.policy_tier,
            privileged: state.privileged,
            ready,
        }
    }
}
