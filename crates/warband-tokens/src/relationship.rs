//! Relationship resolution and the policy/relationship visibility table.
//!
//! Both functions are pure and cheap; nothing here is cached.

use warband_types::{Relationship, Visibility};

use crate::faction::Faction;

/// Classify `owner` from the point of view of `viewer`.
///
/// Checks run in a fixed order: own, ally, enemy, then neutral. An id
/// listed in both of the viewer's sets therefore resolves to
/// [`Relationship::Ally`].
pub fn relationship_of(viewer: &Faction, owner: &Faction) -> Relationship {
    let owner_id = owner.id();
    if viewer.id() == owner_id {
        Relationship::Own
    } else if viewer.allies().contains(&owner_id) {
        Relationship::Ally
    } else if viewer.enemies().contains(&owner_id) {
        Relationship::Enemy
    } else {
        Relationship::Neutral
    }
}

/// Whether a token with `policy` may be seen by a viewer standing in
/// `relationship` to its owner.
///
/// | policy     | admitted relationships     |
/// |------------|----------------------------|
/// | `own`      | own                        |
/// | `allies`   | own, ally                  |
/// | `neutrals` | own, ally, neutral         |
/// | `enemies`  | own, ally, neutral, enemy  |
///
/// [`Visibility::Unrecognized`] admits nothing.
pub const fn admits(policy: Visibility, relationship: Relationship) -> bool {
    match policy {
        Visibility::Own => matches!(relationship, Relationship::Own),
        Visibility::Allies => matches!(relationship, Relationship::Own | Relationship::Ally),
        Visibility::Neutrals => !matches!(relationship, Relationship::Enemy),
        Visibility::Enemies => true,
        Visibility::Unrecognized => false,
    }
}
