//! Reconciliation manager: drives validation, fetches, and teardown.

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::traits::{
    AuthTokenStore, MessagingClient, NetworkProvider, ProfileRegistry, SelectorStore,
    WalletConnector,
};
use crate::validity;
use hawser_resolver::resolve;
use hawser_types::{
    EventSeverity, IdentityChange, OwnedProfiles, PolicyTier, Profile, ProfileId,
    SelectorClearCause, SessionEvent, SessionEventEnvelope, SessionPhase, SessionSnapshot,
    SessionState, TeardownStep, WalletIdentity,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::{broadcast, mpsc};

/// External collaborators the manager drives.
pub struct Collaborators {
    pub wallet: Arc<dyn WalletConnector>,
    pub network: Arc<dyn NetworkProvider>,
    pub registry: Arc<dyn ProfileRegistry>,
    pub auth_tokens: Arc<dyn AuthTokenStore>,
    pub messaging: Arc<dyn MessagingClient>,
    pub selector_store: Arc<dyn SelectorStore>,
}

/// Cloneable handle for submitting identity-change notifications.
#[derive(Clone)]
pub struct SessionHandle {
    generation: Arc<AtomicU64>,
    change_tx: mpsc::Sender<IdentityChange>,
}

impl SessionHandle {
    /// Queues a reconciliation pass for `change`.
    ///
    /// The generation counter advances before the event is queued, so a
    /// profile fetch already in flight for an older identity is discarded
    /// instead of applied over the newer one.
    pub async fn notify(&self, change: IdentityChange) -> Result<(), SessionError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.change_tx
            .send(change)
            .await
            .map_err(|_| SessionError::ManagerStopped)
    }
}

/// Binds a wallet identity to an application profile session and keeps the
/// two reconciled.
///
/// One pass runs per identity change, to completion, on a single loop; the
/// registry fetch is the only suspending step and its result is discarded
/// when a newer change arrived while it was in flight. Session state is
/// recomputed wholesale per pass, never incrementally shared between passes.
pub struct SessionManager {
    config: SessionConfig,
    wallet: Arc<dyn WalletConnector>,
    network: Arc<dyn NetworkProvider>,
    registry: Arc<dyn ProfileRegistry>,
    auth_tokens: Arc<dyn AuthTokenStore>,
    messaging: Arc<dyn MessagingClient>,
    selector_store: Arc<dyn SelectorStore>,
    state: RwLock<SessionState>,
    ready: AtomicBool,
    generation: Arc<AtomicU64>,
    event_tx: broadcast::Sender<SessionEventEnvelope>,
}

impl SessionManager {
    /// Builds the manager along with the handle that feeds it and the
    /// receiver [`SessionManager::start`] drains.
    ///
    /// A selector persisted by an earlier run means the session starts
    /// authenticated, pending the first validation pass.
    pub fn new(
        config: SessionConfig,
        collaborators: Collaborators,
    ) -> Result<(Arc<Self>, SessionHandle, mpsc::Receiver<IdentityChange>), SessionError> {
        // Both tokio channel constructors panic on a zero capacity.
        let (change_tx, change_rx) = mpsc::channel(config.change_queue_capacity.max(1));
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        let generation = Arc::new(AtomicU64::new(0));

        let initial_phase = if collaborators.selector_store.get()?.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::LoggedOut
        };
        let state = SessionState {
            phase: initial_phase,
            ..SessionState::default()
        };

        let manager = Arc::new(Self {
            config,
            wallet: collaborators.wallet,
            network: collaborators.network,
            registry: collaborators.registry,
            auth_tokens: collaborators.auth_tokens,
            messaging: collaborators.messaging,
            selector_store: collaborators.selector_store,
            state: RwLock::new(state),
            ready: AtomicBool::new(false),
            generation: Arc::clone(&generation),
            event_tx,
        });
        let handle = SessionHandle {
            generation,
            change_tx,
        };

        Ok((manager, handle, change_rx))
    }

    /// Runs the reconciliation loop: one initial pass, then one pass per
    /// queued identity change. Returns once every [`SessionHandle`] clone
    /// has been dropped and the queue is drained.
    pub async fn start(self: Arc<Self>, mut change_rx: mpsc::Receiver<IdentityChange>) {
        tracing::info!("Session manager started");

        if let Err(e) = self.reconcile(IdentityChange::Mounted).await {
            tracing::error!(error = %e, "Initial reconciliation failed");
        }

        while let Some(change) = change_rx.recv().await {
            if let Err(e) = self.reconcile(change).await {
                tracing::error!(change = ?change, error = %e, "Reconciliation pass failed");
            }
        }

        tracing::info!("Session manager stopped");
    }

    /// Read-only view of the current session.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let state = self.state.read().map_err(|_| SessionError::StatePoisoned)?;
        Ok(SessionSnapshot::from_state(
            &state,
            self.ready.load(Ordering::SeqCst),
        ))
    }

    /// Subscribes to the session event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEventEnvelope> {
        self.event_tx.subscribe()
    }

    /// Runs the full teardown sequence, as an explicit logout does.
    ///
    /// Safe to repeat: every step is idempotent and a torn-down session
    /// tears down to the same place.
    pub async fn invalidate(&self) -> Result<(), SessionError> {
        tracing::info!("Explicit invalidation requested");
        self.teardown_steps().await
    }

    async fn reconcile(&self, change: IdentityChange) -> Result<(), SessionError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let wallet = WalletIdentity {
            address: self.wallet.address(),
            network: self.network.network(),
        };
        tracing::debug!(change = ?change, address = ?wallet.address, "Reconciliation pass");

        // Validation runs before any suspension so an invalid session is
        // torn down before a fetch for the new identity can land.
        self.validate_and_teardown(&wallet).await?;

        let Some(selector) = self.selector_store.get()? else {
            self.finish_pass();
            return Ok(());
        };

        let cleared = match wallet.address.as_ref() {
            // No owner to fetch for: the owned set is necessarily empty.
            None => {
                self.apply_empty_set()?;
                true
            }
            Some(address) => {
                let fetched = self.registry.profiles_owned_by(address).await;
                // A stale outcome, failed or not, must not touch the session;
                // the queued newer event refetches.
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::warn!(change = ?change, "Discarding stale profile fetch");
                    self.finish_pass();
                    return Ok(());
                }
                match fetched {
                    Ok(owned) => self.apply_owned(owned, &selector)?,
                    Err(e) => {
                        tracing::warn!(error = %e, "Profile fetch failed; clearing selector");
                        self.selector_store.clear()?;
                        self.emit(
                            SessionEvent::SelectorCleared {
                                cause: SelectorClearCause::FetchFailed,
                            },
                            EventSeverity::Warning,
                        );
                        true
                    }
                }
            }
        };

        // Clearing the selector is itself an identity change. Re-running the
        // validity check is benign: its selector conjunction now fails.
        if cleared {
            self.validate_and_teardown(&wallet).await?;
        }

        self.finish_pass();
        Ok(())
    }

    /// Applies a successful fetch. Returns whether the selector was cleared.
    fn apply_owned(&self, owned: OwnedProfiles, selector: &ProfileId) -> Result<bool, SessionError> {
        if owned.profiles.is_empty() {
            self.apply_empty_set()?;
            return Ok(true);
        }

        let resolution = resolve(&owned.profiles, Some(selector));
        match resolution.selected {
            Some(profile) => {
                self.apply_selection(resolution.ordered, profile, owned.sig_nonce)?;
                Ok(false)
            }
            None => {
                self.apply_selector_miss(resolution.ordered, owned.sig_nonce)?;
                Ok(true)
            }
        }
    }

    fn apply_selection(
        &self,
        ordered: Vec<Profile>,
        selected: Profile,
        sig_nonce: u64,
    ) -> Result<(), SessionError> {
        let tier = hawser_policy::classify(&selected);
        let privileged = hawser_policy::is_privileged(&selected.id);

        // Re-persisting the matching selector normalizes the stored value;
        // the store reports it unchanged.
        self.selector_store.set(&selected.id)?;

        let profile_count = ordered.len();
        let selected_id = selected.id.clone();
        self.with_state(|state| {
            *state = SessionState {
                phase: SessionPhase::Authenticated,
                profiles: ordered,
                current_profile: Some(selected),
                sig_nonce: Some(sig_nonce),
                policy_tier: tier,
                privileged,
            };
        })?;

        tracing::info!(profile = %selected_id, tier = ?tier, "Profile applied");
        self.emit(
            SessionEvent::ProfilesReconciled {
                profile_count,
                selected: Some(selected_id),
                policy_tier: tier,
            },
            EventSeverity::Info,
        );
        Ok(())
    }

    /// The selector named a profile absent from the owned set: selector and
    /// current profile reset together, while the fetched profiles and nonce
    /// stay cached. The list is valid wallet data independent of which
    /// profile was previously chosen.
    fn apply_selector_miss(
        &self,
        ordered: Vec<Profile>,
        sig_nonce: u64,
    ) -> Result<(), SessionError> {
        self.selector_store.clear()?;

        let profile_count = ordered.len();
        self.with_state(|state| {
            *state = SessionState {
                phase: SessionPhase::LoggedOut,
                profiles: ordered,
                current_profile: None,
                sig_nonce: Some(sig_nonce),
                policy_tier: PolicyTier::default(),
                privileged: false,
            };
        })?;

        tracing::warn!(profiles = profile_count, "Selector missed the owned set; clearing it");
        self.emit(
            SessionEvent::SelectorCleared {
                cause: SelectorClearCause::SelectorMiss,
            },
            EventSeverity::Warning,
        );
        self.emit(
            SessionEvent::ProfilesReconciled {
                profile_count,
                selected: None,
                policy_tier: PolicyTier::default(),
            },
            EventSeverity::Info,
        );
        Ok(())
    }

    /// The wallet owns no profiles: selector and current profile clear
    /// together and the state resets wholesale, without collaborator
    /// teardown side effects.
    fn apply_empty_set(&self) -> Result<(), SessionError> {
        self.selector_store.clear()?;
        self.with_state(|state| *state = SessionState::logged_out())?;

        tracing::info!("Wallet owns no profiles; resetting session");
        self.emit(
            SessionEvent::SelectorCleared {
                cause: SelectorClearCause::NoProfiles,
            },
            EventSeverity::Warning,
        );
        Ok(())
    }

    /// Evaluates the validity predicate and tears the session down when it
    /// fails. Returns whether teardown ran.
    async fn validate_and_teardown(&self, wallet: &WalletIdentity) -> Result<bool, SessionError> {
        // The selector conjunction keeps never-logged-in wallets free of
        // teardown side effects.
        if self.selector_store.get()?.is_none() {
            return Ok(false);
        }

        let current_owner = self.with_state(|state| {
            state
                .current_profile
                .as_ref()
                .map(|profile| profile.owned_by.clone())
        })?;
        let reasons = validity::violations(
            wallet,
            self.config.required_network,
            self.auth_tokens.has_valid_tokens(),
            current_owner.as_ref(),
        );
        if reasons.is_empty() {
            return Ok(false);
        }

        tracing::info!(reasons = ?reasons, "Session invalid; tearing down");
        self.emit(
            SessionEvent::SessionInvalidated { reasons },
            EventSeverity::Warning,
        );
        self.teardown_steps().await?;
        Ok(true)
    }

    /// The teardown sequence. Each step is best-effort: a failure is
    /// reported and the remaining steps still run.
    async fn teardown_steps(&self) -> Result<(), SessionError> {
        self.with_state(|state| state.phase = SessionPhase::Invalidating)?;

        if let Err(e) = self.messaging.disconnect_session().await {
            self.report_teardown_failure(TeardownStep::MessagingDisconnect, &e);
        }

        // Selector and current profile go together; the rest of the session
        // state is discarded wholesale.
        if let Err(e) = self.selector_store.clear() {
            self.report_teardown_failure(TeardownStep::SelectorReset, &e);
        }
        self.with_state(|state| *state = SessionState::logged_out())?;

        if let Err(e) = self.auth_tokens.clear() {
            self.report_teardown_failure(TeardownStep::AuthTokenClear, &e);
        }

        if let Err(e) = self.wallet.disconnect().await {
            self.report_teardown_failure(TeardownStep::WalletDisconnect, &e);
        }

        Ok(())
    }

    fn report_teardown_failure(&self, step: TeardownStep, error: &dyn std::error::Error) {
        tracing::warn!(step = ?step, error = %error, "Teardown step failed; continuing");
        self.emit(
            SessionEvent::TeardownStepFailed {
                step,
                message: error.to_string(),
            },
            EventSeverity::Warning,
        );
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> Result<T, SessionError> {
        let mut state = self.state.write().map_err(|_| SessionError::StatePoisoned)?;
        Ok(f(&mut state))
    }

    fn finish_pass(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }

    fn emit(&self, event: SessionEvent, severity: EventSeverity) {
        let _ = self
            .event_tx
            .send(SessionEventEnvelope::new(event, severity));
    }
}
