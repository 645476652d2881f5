//! Error types for the warband-tokens crate.
//!
//! Visibility queries and consumption triggers never fail. Errors only come
//! from the stricter faction mutations that callers may opt into.

use warband_types::{FactionId, TokenId};

/// Errors that can occur when mutating a [`Faction`](crate::Faction).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactionError {
    /// A faction cannot be its own ally or enemy.
    #[error("faction {0} cannot hold a relationship with itself")]
    SelfRelation(FactionId),

    /// The faction already owns a token with this id.
    #[error("duplicate token id: {0}")]
    DuplicateToken(TokenId),
}
