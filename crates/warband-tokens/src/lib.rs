//! Buff token visibility and consumption for Warband factions.
//!
//! This crate is the pure logic layer: no I/O, no clock reads outside of
//! [`Token::new`], no background work. Callers hand in time points and
//! event names; factions apply them to the tokens they own, and visibility
//! is resolved on demand from the current relationship sets.
//!
//! # Modules
//!
//! - [`error`] -- Error types for faction mutations ([`FactionError`])
//! - [`faction`] -- Factions, their relationship sets and owned tokens ([`Faction`])
//! - [`relationship`] -- Relationship resolution and the visibility table
//! - [`token`] -- Buff tokens and the consumption state machine ([`Token`], [`Consumption`])
//!
//! # Invariant
//!
//! A consumed token is invisible to every viewer. The consumed flag is the
//! first thing [`Token::is_visible_to`] checks, and it never reverts.

pub mod error;
pub mod faction;
pub mod relationship;
pub mod token;

// Re-export primary types at crate root for convenience.
pub use error::FactionError;
pub use faction::Faction;
pub use relationship::{admits, relationship_of};
pub use token::{Consumption, Token};
pub use warband_types::{BuffKind, FactionId, Relationship, TokenId, Visibility};
