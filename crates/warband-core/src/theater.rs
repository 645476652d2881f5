//! The theater: every faction of one game session.
//!
//! [`Theater`] owns the factions, indexes them by id and by the short key
//! used in scenario files, and fans time points and events out to every
//! faction. It adds no caching on top of the token rules; every query goes
//! straight to [`Faction::visible_tokens`].

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{info, warn};
use warband_tokens::{Faction, Token};
use warband_types::{FactionId, TokenId};

use crate::config::ScenarioConfig;
use crate::error::TheaterError;

/// How many of `owner`'s tokens `viewer` can currently see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityRow {
    /// The faction owning the tokens.
    pub owner: FactionId,
    /// The faction looking at them.
    pub viewer: FactionId,
    /// Number of visible tokens.
    pub visible: usize,
}

/// Registry of all factions in a session.
#[derive(Debug, Clone, Default)]
pub struct Theater {
    factions: BTreeMap<FactionId, Faction>,
    keys: BTreeMap<String, FactionId>,
}

impl Theater {
    /// Create an empty theater.
    pub const fn new() -> Self {
        Self {
            factions: BTreeMap::new(),
            keys: BTreeMap::new(),
        }
    }

    /// Build a theater from a scenario.
    ///
    /// Token creation times are `epoch` plus each token's `created_at_ms`.
    /// Relationship keys are copied into the raw ally/enemy sets as written;
    /// factions listing a key on both sides are logged and resolve as allies.
    ///
    /// # Errors
    ///
    /// Returns [`TheaterError::UnknownFaction`] for a key that names no
    /// faction, [`TheaterError::DuplicateFaction`] for a repeated faction
    /// key, and [`TheaterError::Faction`] for a repeated token id.
    pub fn from_config(
        config: &ScenarioConfig,
        epoch: DateTime<Utc>,
    ) -> Result<Self, TheaterError> {
        let mut theater = Self::new();

        for entry in &config.factions {
            theater.insert(
                entry.key.clone(),
                Faction::new(FactionId::new(), entry.display_name()),
            )?;
        }

        for entry in &config.factions {
            let id = theater.id_of(&entry.key)?;
            let allies = theater.ids_of(&entry.allies)?;
            let enemies = theater.ids_of(&entry.enemies)?;
            let faction = theater.get_mut(id)?;
            faction.allies_mut().extend(allies);
            faction.enemies_mut().extend(enemies);

            let overlap = faction.overlapping_relations();
            if !overlap.is_empty() {
                warn!(
                    faction = %entry.key,
                    overlapping = overlap.len(),
                    "Faction lists the same factions as ally and enemy; ally takes precedence"
                );
            }
        }

        for entry in &config.tokens {
            let owner = theater.id_of(&entry.owner)?;
            let created_at = offset(epoch, entry.created_at_ms)?;
            let token = Token::new_at(
                entry.id.unwrap_or_default(),
                entry.kind.clone(),
                entry.magnitude,
                entry.visibility,
                entry.consumption.to_consumption(),
                created_at,
            );
            theater.get_mut(owner)?.try_add_token(token)?;
        }

        info!(
            factions = theater.factions.len(),
            tokens = config.tokens.len(),
            "Theater assembled"
        );
        Ok(theater)
    }

    /// Register a faction under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TheaterError::DuplicateFaction`] if the key is taken.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        faction: Faction,
    ) -> Result<FactionId, TheaterError> {
        let key = key.into();
        if self.keys.contains_key(&key) {
            return Err(TheaterError::DuplicateFaction(key));
        }
        let id = faction.id();
        self.keys.insert(key, id);
        self.factions.insert(id, faction);
        Ok(id)
    }

    /// Resolve a scenario key to its faction id.
    ///
    /// # Errors
    ///
    /// Returns [`TheaterError::UnknownFaction`] if no faction has this key.
    pub fn id_of(&self, key: &str) -> Result<FactionId, TheaterError> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| TheaterError::UnknownFaction(key.to_owned()))
    }

    /// The scenario key a faction was registered under.
    pub fn key_of(&self, id: FactionId) -> Option<&str> {
        self.keys
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.as_str())
    }

    fn ids_of(&self, keys: &[String]) -> Result<Vec<FactionId>, TheaterError> {
        keys.iter().map(|k| self.id_of(k)).collect()
    }

    /// Look up a faction.
    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(&id)
    }

    /// Look up a faction for mutation.
    pub fn faction_mut(&mut self, id: FactionId) -> Option<&mut Faction> {
        self.factions.get_mut(&id)
    }

    fn get(&self, id: FactionId) -> Result<&Faction, TheaterError> {
        self.faction(id).ok_or(TheaterError::FactionNotFound(id))
    }

    fn get_mut(&mut self, id: FactionId) -> Result<&mut Faction, TheaterError> {
        self.faction_mut(id).ok_or(TheaterError::FactionNotFound(id))
    }

    /// All factions, ordered by id.
    pub fn factions(&self) -> impl Iterator<Item = &Faction> {
        self.factions.values()
    }

    /// Tokens of `owner` that `viewer` can currently see.
    ///
    /// # Errors
    ///
    /// Returns [`TheaterError::FactionNotFound`] if either id is unknown.
    pub fn visible_tokens(
        &self,
        owner: FactionId,
        viewer: FactionId,
    ) -> Result<Vec<&Token>, TheaterError> {
        let owner = self.get(owner)?;
        let viewer = self.get(viewer)?;
        Ok(owner.visible_tokens(viewer))
    }

    /// Apply a time point to every faction.
    ///
    /// Returns the ids of tokens this call consumed.
    pub fn advance_time(&mut self, now: DateTime<Utc>) -> Vec<TokenId> {
        self.factions
            .values_mut()
            .flat_map(|f| f.process_time_expiration(now))
            .collect()
    }

    /// Raise an event on every faction.
    ///
    /// Returns the ids of tokens this call consumed.
    pub fn raise_event(&mut self, event: &str) -> Vec<TokenId> {
        self.factions
            .values_mut()
            .flat_map(|f| f.process_event(event))
            .collect()
    }

    /// Visible token counts for every (owner, viewer) pair, self included.
    pub fn visibility_report(&self) -> Vec<VisibilityRow> {
        let mut rows = Vec::new();
        for owner in self.factions.values() {
            for viewer in self.factions.values() {
                rows.push(VisibilityRow {
                    owner: owner.id(),
                    viewer: viewer.id(),
                    visible: owner.visible_tokens(viewer).len(),
                });
            }
        }
        rows
    }
}

/// `epoch` shifted forward by `ms` milliseconds.
///
/// # Errors
///
/// Returns [`TheaterError::TimeOutOfRange`] if the result is not
/// representable.
pub fn offset(epoch: DateTime<Utc>, ms: u64) -> Result<DateTime<Utc>, TheaterError> {
    i64::try_from(ms)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .and_then(|delta| epoch.checked_add_signed(delta))
        .ok_or(TheaterError::TimeOutOfRange(ms))
}
