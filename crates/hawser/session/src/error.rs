//! Error types for the session crate's collaborator seams and manager.

use thiserror::Error;

/// Errors from the remote profile registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),

    #[error("registry rejected the query: {0}")]
    Rejected(String),

    #[error("malformed registry response: {0}")]
    Malformed(String),
}

/// Errors from the persisted selector store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("selector store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("selector store serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("selector store lock poisoned")]
    LockPoisoned,
}

/// Failure of a best-effort teardown side effect.
///
/// Teardown steps are independent; a step returning this is reported and the
/// remaining steps still run.
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Manager-level failures.
///
/// None of these are user-visible; the run loop logs them and keeps serving
/// later passes.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session state lock poisoned")]
    StatePoisoned,

    #[error("selector store: {0}")]
    Store(#[from] StoreError),

    #[error("session manager stopped")]
    ManagerStopped,
}
