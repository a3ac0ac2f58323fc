//! # Session Lifecycle Example
//!
//! This example demonstrates the core reconciliation flow:
//! - Wiring the collaborator seams with in-memory adapters
//! - Resuming a session from a persisted selector
//! - Reading the derived session snapshot
//!
//! Run with: `cargo run --example 01_session_lifecycle`

use hawser_session::memory::{
    InMemoryAuthTokens, InMemoryMessaging, InMemoryNetwork, InMemoryProfileRegistry,
    InMemorySelectorStore, InMemoryWallet,
};
use hawser_session::{Collaborators, SessionConfig, SessionManager};
use hawser_types::{Address, NetworkId, OwnedProfiles, Profile, ProfileId};
use std::sync::Arc;
use std::time::Duration;

const NETWORK: NetworkId = NetworkId::new(137);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for observability
    tracing_subscriber::fmt::init();

    println!("⚓ Hawser - Session Lifecycle Example\n");

    // Step 1: Wire the collaborators. A previous login left a selector behind.
    println!("📦 Wiring collaborators...");
    let wallet = Arc::new(InMemoryWallet::connected(Address::new("0xA11CE")));
    let registry = Arc::new(InMemoryProfileRegistry::new());
    registry.set_owned(
        Address::new("0xA11CE"),
        OwnedProfiles {
            profiles: vec![
                Profile {
                    id: ProfileId::new("0x05"),
                    owned_by: Address::new("0xA11CE"),
                    is_default: false,
                    total_following: Some(42),
                },
                Profile {
                    id: ProfileId::new("0x02"),
                    owned_by: Address::new("0xA11CE"),
                    is_default: true,
                    total_following: Some(3),
                },
            ],
            sig_nonce: 9,
        },
    );
    let selector_store = Arc::new(InMemorySelectorStore::holding(ProfileId::new("0x02")));

    let (manager, handle, change_rx) = SessionManager::new(
        SessionConfig::new(NETWORK),
        Collaborators {
            wallet,
            network: Arc::new(InMemoryNetwork::on(NETWORK)),
            registry,
            auth_tokens: Arc::new(InMemoryAuthTokens::with_valid_tokens()),
            messaging: Arc::new(InMemoryMessaging::new()),
            selector_store,
        },
    )?;
    println!("✅ Manager constructed\n");

    // Step 2: Start the reconciliation loop; the mount pass runs first.
    println!("🔄 Starting the reconciliation loop...");
    let loop_task = tokio::spawn(manager.clone().start(change_rx));

    while !manager.snapshot()?.ready {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    println!("✅ First pass complete\n");

    // Step 3: Read the derived session state.
    let snapshot = manager.snapshot()?;
    println!("📊 Session Snapshot:");
    println!("   • Phase: {:?}", snapshot.phase);
    if let Some(profile) = &snapshot.current_profile {
        println!("   • Current profile: {}", profile.id);
    }
    println!(
        "   • Owned profiles (default first): {:?}",
        snapshot
            .profiles
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>()
    );
    println!("   • Policy tier: {:?}", snapshot.policy_tier);
    println!("   • Privileged: {}", snapshot.privileged);
    println!("   • Signing nonce: {:?}\n", snapshot.sig_nonce);

    // Step 4: Shut down by dropping the handle.
    println!("🛑 Shutting down...");
    drop(handle);
    loop_task.await?;
    println!("✅ Loop stopped");

    Ok(())
}
