//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Factions and tokens carry strongly-typed IDs so that a token id can
//! never be passed where a faction id is expected. IDs are caller-assigned
//! and opaque; `new()` generates a UUID v7 for callers that have no id
//! scheme of their own.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a faction (army) taking part in a game session.
    FactionId
}

define_id! {
    /// Unique identifier for a buff token. Never reused once assigned.
    TokenId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = FactionId::new();
        let b = FactionId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn caller_assigned_id_is_preserved() {
        let raw = Uuid::from_u128(42);
        let token = TokenId::from(raw);
        assert_eq!(Uuid::from(token), raw);
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = TokenId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<TokenId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = FactionId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
