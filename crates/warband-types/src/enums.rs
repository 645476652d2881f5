//! Enumeration types shared by the Warband crates.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Buff kinds
// ---------------------------------------------------------------------------

/// The semantic tag of a buff token.
///
/// Carried for the caller's benefit only: visibility and consumption never
/// look at it. The three common tags get their own variants; any other tag
/// is kept verbatim in [`BuffKind::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuffKind {
    /// Increases damage dealt.
    Attack,
    /// Reduces damage taken.
    Defense,
    /// Increases movement or initiative.
    Speed,
    /// Any caller-defined tag.
    Other(String),
}

impl BuffKind {
    /// The tag as written in scenario files.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::Speed => "speed",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for BuffKind {
    fn from(value: &str) -> Self {
        match value {
            "attack" => Self::Attack,
            "defense" => Self::Defense,
            "speed" => Self::Speed,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for BuffKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "attack" => Self::Attack,
            "defense" => Self::Defense,
            "speed" => Self::Speed,
            _ => Self::Other(value),
        }
    }
}

impl From<BuffKind> for String {
    fn from(kind: BuffKind) -> Self {
        match kind {
            BuffKind::Other(tag) => tag,
            named => named.as_str().to_owned(),
        }
    }
}

impl core::fmt::Display for BuffKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Visibility policy
// ---------------------------------------------------------------------------

/// Which relationship classes may observe a token.
///
/// The policies form a lattice by audience size:
/// `Own` < `Allies` < `Neutrals` < `Enemies`. The widest policy is named
/// `Enemies` because it reaches all the way to enemies, i.e. everyone.
///
/// Policy strings that do not name one of the four policies parse to
/// [`Visibility::Unrecognized`], which admits nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Visibility {
    /// Visible to the owning faction only.
    Own,
    /// Visible to the owner and its allies.
    Allies,
    /// Visible to everyone except enemies.
    Neutrals,
    /// Visible to everyone, enemies included.
    Enemies,
    /// A policy value that was not understood. Visible to nobody.
    Unrecognized,
}

impl Visibility {
    /// The canonical lowercase name of this policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Allies => "allies",
            Self::Neutrals => "neutrals",
            Self::Enemies => "enemies",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl From<&str> for Visibility {
    fn from(value: &str) -> Self {
        match value {
            "own" => Self::Own,
            "allies" => Self::Allies,
            "neutrals" => Self::Neutrals,
            "enemies" => Self::Enemies,
            _ => Self::Unrecognized,
        }
    }
}

impl From<String> for Visibility {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl core::fmt::Display for Visibility {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// How one faction classifies another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// The viewer is the owner.
    Own,
    /// The owner is in the viewer's ally set.
    Ally,
    /// The owner is in the viewer's enemy set (and not in its ally set).
    Enemy,
    /// Neither ally nor enemy.
    Neutral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_parses_known_policies() {
        assert_eq!(Visibility::from("own"), Visibility::Own);
        assert_eq!(Visibility::from("allies"), Visibility::Allies);
        assert_eq!(Visibility::from("neutrals"), Visibility::Neutrals);
        assert_eq!(Visibility::from("enemies"), Visibility::Enemies);
    }

    #[test]
    fn unknown_visibility_is_unrecognized() {
        assert_eq!(Visibility::from("public"), Visibility::Unrecognized);
        assert_eq!(Visibility::from("Allies"), Visibility::Unrecognized);
        assert_eq!(Visibility::from(""), Visibility::Unrecognized);
    }

    #[test]
    fn visibility_deserializes_leniently() {
        let known: Result<Visibility, _> = serde_json::from_str("\"neutrals\"");
        assert_eq!(known.ok(), Some(Visibility::Neutrals));

        let unknown: Result<Visibility, _> = serde_json::from_str("\"everyone\"");
        assert_eq!(unknown.ok(), Some(Visibility::Unrecognized));
    }

    #[test]
    fn visibility_serializes_snake_case() {
        let json = serde_json::to_string(&Visibility::Enemies).ok();
        assert_eq!(json.as_deref(), Some("\"enemies\""));
    }

    #[test]
    fn visibility_display_matches_as_str() {
        assert_eq!(Visibility::Allies.to_string(), "allies");
    }

    #[test]
    fn buff_kind_serde_names() {
        let kind: Result<BuffKind, _> = serde_json::from_str("\"defense\"");
        assert_eq!(kind.ok(), Some(BuffKind::Defense));
    }

    #[test]
    fn custom_buff_kind_round_trips() {
        let kind: Result<BuffKind, _> = serde_json::from_str("\"morale\"");
        assert_eq!(kind.as_ref().ok(), Some(&BuffKind::Other("morale".to_owned())));

        let json = kind.ok().and_then(|k| serde_json::to_string(&k).ok());
        assert_eq!(json.as_deref(), Some("\"morale\""));
    }

    #[test]
    fn named_buff_kinds_do_not_fall_back() {
        assert_eq!(BuffKind::from("speed".to_owned()), BuffKind::Speed);
        assert_eq!(BuffKind::from("Speed"), BuffKind::Other("Speed".to_owned()));
        assert_eq!(BuffKind::Attack.to_string(), "attack");
    }
}
