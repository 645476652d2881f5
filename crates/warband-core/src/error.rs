//! Error types for theater assembly and script playback.

use warband_tokens::FactionError;
use warband_types::FactionId;

/// Errors raised while building or driving a [`Theater`](crate::theater::Theater).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TheaterError {
    /// A configuration key does not name any registered faction.
    #[error("unknown faction key: {0}")]
    UnknownFaction(String),

    /// No faction is registered under this id.
    #[error("faction not found: {0}")]
    FactionNotFound(FactionId),

    /// Two factions were registered under the same key.
    #[error("duplicate faction key: {0}")]
    DuplicateFaction(String),

    /// A millisecond offset from the scenario epoch is not representable.
    #[error("time offset out of range: {0} ms")]
    TimeOutOfRange(u64),

    /// A faction rejected a mutation.
    #[error("faction error: {0}")]
    Faction(#[from] FactionError),
}
