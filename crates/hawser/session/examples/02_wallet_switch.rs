//! # Wallet Switch Example
//!
//! This example demonstrates session invalidation:
//! - Binding a session to one wallet account
//! - Switching the wallet to a different account without a fresh login
//! - Watching the teardown through the session event stream
//!
//! Run with: `cargo run --example 02_wallet_switch`

use hawser_session::memory::{
    InMemoryAuthTokens, InMemoryMessaging, InMemoryNetwork, InMemoryProfileRegistry,
    InMemorySelectorStore, InMemoryWallet,
};
use hawser_session::{AuthTokenStore, Collaborators, SessionConfig, SessionManager};
use hawser_types::{
    Address, IdentityChange, NetworkId, OwnedProfiles, Profile, ProfileId, SessionEvent,
    SessionPhase,
};
use std::sync::Arc;
use std::time::Duration;

const NETWORK: NetworkId = NetworkId::new(137);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for observability
    tracing_subscriber::fmt::init();

    println!("⚓ Hawser - Wallet Switch Example\n");

    // Step 1: Bind a session to wallet 0xA.
    println!("🔑 Binding session to wallet 0xA...");
    let wallet = Arc::new(InMemoryWallet::connected(Address::new("0xA")));
    let registry = Arc::new(InMemoryProfileRegistry::new());
    registry.set_owned(
        Address::new("0xA"),
        OwnedProfiles {
            profiles: vec![Profile {
                id: ProfileId::new("0x01"),
                owned_by: Address::new("0xA"),
                is_default: true,
                total_following: Some(5),
            }],
            sig_nonce: 1,
        },
    );
    let auth_tokens = Arc::new(InMemoryAuthTokens::with_valid_tokens());
    let messaging = Arc::new(InMemoryMessaging::new());

    let (manager, handle, change_rx) = SessionManager::new(
        SessionConfig::new(NETWORK),
        Collaborators {
            wallet: wallet.clone(),
            network: Arc::new(InMemoryNetwork::on(NETWORK)),
            registry,
            auth_tokens: auth_tokens.clone(),
            messaging: messaging.clone(),
            selector_store: Arc::new(InMemorySelectorStore::holding(ProfileId::new("0x01"))),
        },
    )?;
    let mut events = manager.subscribe();
    let loop_task = tokio::spawn(manager.clone().start(change_rx));

    while manager.snapshot()?.phase != SessionPhase::Authenticated {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    println!("✅ Authenticated as 0x01\n");

    // Step 2: The user switches accounts in the wallet UI.
    println!("🔀 Switching wallet to 0xB without a fresh login...");
    wallet.set_address(Some(Address::new("0xB")));
    handle.notify(IdentityChange::AddressChanged).await?;

    while manager.snapshot()?.phase != SessionPhase::LoggedOut {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    println!("✅ Session torn down\n");

    // Step 3: Review what happened through the event stream.
    println!("📰 Session events:");
    while let Ok(envelope) = events.try_recv() {
        match envelope.event {
            SessionEvent::ProfilesReconciled {
                profile_count,
                selected,
                ..
            } => println!("   • reconciled {profile_count} profile(s), selected {selected:?}"),
            SessionEvent::SessionInvalidated { reasons } => {
                println!("   • invalidated: {reasons:?}")
            }
            SessionEvent::SelectorCleared { cause } => println!("   • selector cleared: {cause:?}"),
            SessionEvent::TeardownStepFailed { step, message } => {
                println!("   • teardown step {step:?} failed: {message}")
            }
        }
    }

    println!("\n📊 Final state:");
    println!("   • Phase: {:?}", manager.snapshot()?.phase);
    println!("   • Messaging disconnects: {}", messaging.disconnect_count());
    println!("   • Wallet disconnects: {}", wallet.disconnect_count());
    println!("   • Tokens valid: {}", auth_tokens.has_valid_tokens());

    drop(handle);
    loop_task.await?;
    Ok(())
}
