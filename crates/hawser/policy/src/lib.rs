//! Policy classification for wallet-bound profiles.
//!
//! Two independent rules: a follower-count threshold that picks the
//! content-interaction gating tier, and a static allowlist granting a
//! privileged capability flag to named profile ids. The allowlist never
//! feeds into the tier rule.

#![deny(unsafe_code)]

pub mod allowlist;
pub mod tier;

pub use allowlist::{is_privileged, PRIVILEGED_PROFILE_IDS};
pub use tier::{classify, gating_policy, RESTRICTED_FOLLOWING_THRESHOLD};
