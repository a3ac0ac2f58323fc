//! Deterministic ordering and selection over a wallet's owned profiles.
//!
//! Ordering is a pair of composed stable sorts: ascending numeric id first,
//! then default-flagged profiles moved to the front. The composition matters:
//! the second sort must not disturb the ascending order the first one
//! established within each flag group.

#![deny(unsafe_code)]

use hawser_types::{Profile, ProfileId};

/// Outcome of resolving a wallet's raw profile set against a persisted
/// selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Profiles in presentation order: defaults first, ascending numeric id
    /// within each group.
    pub ordered: Vec<Profile>,
    /// The profile the selector names, when it exists in the set.
    pub selected: Option<Profile>,
}

impl Resolution {
    /// True when a selector was given but named a profile absent from the
    /// set. An absent selector is not a miss.
    pub fn selector_missed(&self, selector: Option<&ProfileId>) -> bool {
        selector.is_some() && self.selected.is_none()
    }
}

/// Orders `raw` and picks the profile named by `selector`.
///
/// Empty input yields an empty ordering and no selection; the caller decides
/// what an empty owned set means for the session.
pub fn resolve(raw: &[Profile], selector: Option<&ProfileId>) -> Resolution {
    let mut ordered = raw.to_vec();
    ordered.sort_by_key(id_sort_key);
    ordered.sort_by_key(|profile| !profile.is_default);

    let selected = selector.and_then(|wanted| {
        ordered
            .iter()
            .find(|profile| &profile.id == wanted)
            .cloned()
    });

    Resolution { ordered, selected }
}

/// Ids without a numeric value sort after all numeric ones, keeping their
/// relative order.
fn id_sort_key(profile: &Profile) -> (bool, u128) {
    match profile.id.numeric() {
        Some(value) => (false, value),
        None => (true, 0),
    }
}
