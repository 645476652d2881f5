//! Factions: relationship sets plus the buff tokens they own.
//!
//! A faction owns its tokens for their whole lifetime. Tokens are appended
//! and never removed; consumption only flags them, so insertion order and
//! the unfiltered count stay stable. Every query filters on the spot.
//!
//! # Relationships
//!
//! `allies` and `enemies` are plain id sets. Direct mutation through
//! [`Faction::allies_mut`] and [`Faction::enemies_mut`] may leave an id in
//! both; resolution then treats it as an ally. The diplomacy helpers
//! ([`Faction::form_alliance`], [`Faction::declare_enemy`],
//! [`Faction::make_neutral`]) keep the two sets disjoint.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::debug;
use warband_types::{FactionId, TokenId};

use crate::error::FactionError;
use crate::token::Token;

/// A game party with relationship sets and an owned token collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faction {
    id: FactionId,
    display_name: String,
    allies: BTreeSet<FactionId>,
    enemies: BTreeSet<FactionId>,
    tokens: Vec<Token>,
}

impl Faction {
    /// Create a faction with no relationships and no tokens.
    pub fn new(id: FactionId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            allies: BTreeSet::new(),
            enemies: BTreeSet::new(),
            tokens: Vec::new(),
        }
    }

    /// The faction's identifier.
    pub const fn id(&self) -> FactionId {
        self.id
    }

    /// The cosmetic display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Factions this faction considers allies.
    pub const fn allies(&self) -> &BTreeSet<FactionId> {
        &self.allies
    }

    /// Factions this faction considers enemies.
    pub const fn enemies(&self) -> &BTreeSet<FactionId> {
        &self.enemies
    }

    /// Mutable access to the ally set. Changes apply to the next query.
    pub const fn allies_mut(&mut self) -> &mut BTreeSet<FactionId> {
        &mut self.allies
    }

    /// Mutable access to the enemy set. Changes apply to the next query.
    pub const fn enemies_mut(&mut self) -> &mut BTreeSet<FactionId> {
        &mut self.enemies
    }

    // -----------------------------------------------------------------------
    // Diplomacy
    // -----------------------------------------------------------------------

    /// Record `other` as an ally, dropping it from the enemy set.
    ///
    /// Returns whether either set changed.
    pub fn form_alliance(&mut self, other: FactionId) -> Result<bool, FactionError> {
        self.reject_self(other)?;
        let removed = self.enemies.remove(&other);
        let inserted = self.allies.insert(other);
        Ok(removed || inserted)
    }

    /// Record `other` as an enemy, dropping it from the ally set.
    ///
    /// Returns whether either set changed.
    pub fn declare_enemy(&mut self, other: FactionId) -> Result<bool, FactionError> {
        self.reject_self(other)?;
        let removed = self.allies.remove(&other);
        let inserted = self.enemies.insert(other);
        Ok(removed || inserted)
    }

    /// Remove `other` from both sets. Returns whether anything was removed.
    pub fn make_neutral(&mut self, other: FactionId) -> bool {
        let from_allies = self.allies.remove(&other);
        let from_enemies = self.enemies.remove(&other);
        from_allies || from_enemies
    }

    /// Ids listed as both ally and enemy. These resolve as allies.
    pub fn overlapping_relations(&self) -> BTreeSet<FactionId> {
        self.allies.intersection(&self.enemies).copied().collect()
    }

    fn reject_self(&self, other: FactionId) -> Result<(), FactionError> {
        if other == self.id {
            return Err(FactionError::SelfRelation(other));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tokens
    // -----------------------------------------------------------------------

    /// Append a token. Token ids are not checked for uniqueness.
    pub fn add_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Append a token, rejecting it if a token with the same id is owned.
    pub fn try_add_token(&mut self, token: Token) -> Result<(), FactionError> {
        if self.token(token.id()).is_some() {
            return Err(FactionError::DuplicateToken(token.id()));
        }
        self.tokens.push(token);
        Ok(())
    }

    /// Every owned token, consumed ones included, in insertion order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The first owned token with the given id.
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id() == id)
    }

    /// Owned tokens that have not been consumed, in insertion order.
    pub fn active_tokens(&self) -> Vec<&Token> {
        self.tokens.iter().filter(|t| !t.is_consumed()).collect()
    }

    /// Tokens `viewer` may currently see, in insertion order.
    pub fn visible_tokens(&self, viewer: &Self) -> Vec<&Token> {
        self.tokens
            .iter()
            .filter(|t| t.is_visible_to(viewer, self))
            .collect()
    }

    /// Expire every time-based token whose ttl has elapsed at `now`.
    ///
    /// Returns the ids consumed by this call; already-consumed tokens are
    /// not reported again.
    pub fn process_time_expiration(&mut self, now: DateTime<Utc>) -> Vec<TokenId> {
        let faction = self.id;
        let mut consumed = Vec::new();
        for token in &mut self.tokens {
            if token.should_expire(now) && token.expire() {
                debug!(%faction, token = %token.id(), cause = "time", "Token consumed");
                consumed.push(token.id());
            }
        }
        consumed
    }

    /// Consume every event-based token waiting on `event`.
    ///
    /// Returns the ids consumed by this call.
    pub fn process_event(&mut self, event: &str) -> Vec<TokenId> {
        let faction = self.id;
        let mut consumed = Vec::new();
        for token in &mut self.tokens {
            if token.consume_by_event(event) {
                debug!(%faction, token = %token.id(), cause = "event", event, "Token consumed");
                consumed.push(token.id());
            }
        }
        consumed
    }
}
