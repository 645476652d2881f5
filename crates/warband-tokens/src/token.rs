//! Buff tokens and their consumption state machine.
//!
//! A token is either active or consumed. Two triggers can consume it:
//!
//! - **Time** -- [`Token::should_expire`] followed by [`Token::expire`] once
//!   the elapsed time since creation reaches the token's ttl.
//! - **Event** -- [`Token::consume_by_event`] when the raised event name
//!   matches the one the token was created with.
//!
//! Each token has exactly one [`Consumption`] policy, so a time token is
//! never consumed by an event and an event token never expires by time.
//! Consumption is one-way: nothing sets the flag back to false.

use chrono::{DateTime, TimeDelta, Utc};
use warband_types::{BuffKind, TokenId, Visibility};

use crate::faction::Faction;
use crate::relationship::{admits, relationship_of};

/// How a token stops existing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consumption {
    /// Expires once `ttl` has elapsed since the token was created.
    Time {
        /// Lifetime measured from `created_at`.
        ttl: TimeDelta,
    },
    /// Consumed when an event with exactly this name is raised.
    Event {
        /// The event name that consumes the token.
        name: String,
    },
}

impl Consumption {
    /// A time-based policy with the given lifetime.
    pub const fn time(ttl: TimeDelta) -> Self {
        Self::Time { ttl }
    }

    /// An event-based policy triggered by `name`.
    pub fn event(name: impl Into<String>) -> Self {
        Self::Event { name: name.into() }
    }
}

/// A transient buff owned by exactly one faction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    id: TokenId,
    kind: BuffKind,
    magnitude: i32,
    visibility: Visibility,
    consumption: Consumption,
    created_at: DateTime<Utc>,
    consumed: bool,
}

impl Token {
    /// Create an active token stamped with the current wall-clock time.
    pub fn new(
        id: TokenId,
        kind: BuffKind,
        magnitude: i32,
        visibility: Visibility,
        consumption: Consumption,
    ) -> Self {
        Self::new_at(id, kind, magnitude, visibility, consumption, Utc::now())
    }

    /// Create an active token with an explicit creation time.
    pub const fn new_at(
        id: TokenId,
        kind: BuffKind,
        magnitude: i32,
        visibility: Visibility,
        consumption: Consumption,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            magnitude,
            visibility,
            consumption,
            created_at,
            consumed: false,
        }
    }

    /// The token's identifier.
    pub const fn id(&self) -> TokenId {
        self.id
    }

    /// The buff kind.
    pub const fn kind(&self) -> &BuffKind {
        &self.kind
    }

    /// The buff's effect size.
    pub const fn magnitude(&self) -> i32 {
        self.magnitude
    }

    /// The visibility policy fixed at creation.
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The consumption policy fixed at creation.
    pub const fn consumption(&self) -> &Consumption {
        &self.consumption
    }

    /// When the token was created.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the token has been consumed.
    pub const fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Whether `viewer` may see this token, given that `owner` owns it.
    ///
    /// A consumed token is invisible to everyone, and that check runs
    /// before any relationship is resolved.
    pub fn is_visible_to(&self, viewer: &Faction, owner: &Faction) -> bool {
        if self.consumed {
            return false;
        }
        admits(self.visibility, relationship_of(viewer, owner))
    }

    /// Whether this token's time policy has run out at `now`.
    ///
    /// Always false for consumed tokens and for event-based tokens.
    pub fn should_expire(&self, now: DateTime<Utc>) -> bool {
        if self.consumed {
            return false;
        }
        match &self.consumption {
            Consumption::Time { ttl } => now.signed_duration_since(self.created_at) >= *ttl,
            Consumption::Event { .. } => false,
        }
    }

    /// Mark the token consumed.
    ///
    /// Returns `false` if it was already consumed.
    pub const fn expire(&mut self) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        true
    }

    /// Consume the token if its event policy names `event`.
    ///
    /// Returns `true` only when this call moved the token from active to
    /// consumed.
    pub fn consume_by_event(&mut self, event: &str) -> bool {
        if self.consumed {
            return false;
        }
        let names_match = matches!(&self.consumption, Consumption::Event { name } if name == event);
        names_match && self.expire()
    }
}
