//! Event vocabulary emitted by the session manager.

use crate::policy::PolicyTier;
use crate::profile::ProfileId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What prompted a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityChange {
    /// First observation after construction.
    Mounted,
    AddressChanged,
    NetworkChanged,
    SelectorChanged,
}

/// Why a session failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationReason {
    MissingAuthTokens,
    WrongNetwork,
    AccountSwitched,
}

/// Why the persisted selector was cleared outside a full teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorClearCause {
    /// Registry fetch failed; the in-memory session survives.
    FetchFailed,
    /// Registry returned an empty owned set.
    NoProfiles,
    /// Selector named a profile absent from the owned set.
    SelectorMiss,
}

/// Teardown steps in execution order. Each step is best-effort; a failure
/// is reported and the sequence continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownStep {
    MessagingDisconnect,
    SelectorReset,
    AuthTokenClear,
    WalletDisconnect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Info,
    Warning,
    Error,
}

/// Session lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A pass completed with a usable owned set.
    ProfilesReconciled {
        profile_count: usize,
        selected: Option<ProfileId>,
        policy_tier: PolicyTier,
    },
    SelectorCleared {
        cause: SelectorClearCause,
    },
    SessionInvalidated {
        reasons: Vec<InvalidationReason>,
    },
    TeardownStepFailed {
        step: TeardownStep,
        message: String,
    },
}

/// Envelope attached to every emitted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub severity: EventSeverity,
    pub event: SessionEvent,
}

impl SessionEventEnvelope {
    pub fn new(event: SessionEvent, severity: EventSeverity) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            severity,
            event,
        }
    }

    pub fn info(event: SessionEvent) -> Self {
        Self::new(event, EventSeverity::Info)
    }

    pub fn warning(event: SessionEvent) -> Self {
        Self::new(event, EventSeverity::Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelopes_get_unique_ids() {
        let a = SessionEventEnvelope::info(SessionEvent::SelectorCleared {
            cause: SelectorClearCause::FetchFailed,
        });
        let b = SessionEventEnvelope::info(SessionEvent::SelectorCleared {
            cause: SelectorClearCause::FetchFailed,
        });
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn severity_helpers_tag_envelopes() {
        let info = SessionEventEnvelope::info(SessionEvent::ProfilesReconciled {
            profile_count: 2,
            selected: None,
            policy_tier: PolicyTier::Broad,
        });
        assert_eq!(info.severity, EventSeverity::Info);

        let warning = SessionEventEnvelope::warning(SessionEvent::SessionInvalidated {
            reasons: vec![InvalidationReason::AccountSwitched],
        });
        assert_eq!(warning.severity, EventSeverity::Warning);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = SessionEvent::SelectorCleared {
            cause: SelectorClearCause::NoProfiles,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "selector_cleared");
        assert_eq!(json["cause"], "no_profiles");
    }
}
