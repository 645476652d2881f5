//! Shared type definitions for Warband buff tokens.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for factions and tokens
//! - [`enums`] -- Buff kinds, visibility policies, and relationships

pub mod enums;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use enums::{BuffKind, Relationship, Visibility};
pub use ids::{FactionId, TokenId};
