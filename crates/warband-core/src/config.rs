//! Scenario configuration for Warband.
//!
//! A scenario file (`warband-scenario.yaml` by default) lists the factions
//! of a session, their ally/enemy keys, the tokens each one starts with,
//! and an optional script of stimuli to play back. Factions are referred to
//! by short human keys; [`Theater::from_config`] maps them to ids.
//!
//! Unknown visibility strings load as [`Visibility::Unrecognized`] so a
//! typo hides a token instead of failing the whole scenario.
//!
//! [`Theater::from_config`]: crate::theater::Theater::from_config

use std::path::Path;

use chrono::TimeDelta;
use serde::Deserialize;
use warband_tokens::Consumption;
use warband_types::{BuffKind, TokenId, Visibility};

use crate::script::ScriptStep;

/// Errors that can occur when loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the scenario file from disk.
    #[error("failed to read scenario file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level scenario configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScenarioConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Factions taking part in the session.
    #[serde(default)]
    pub factions: Vec<FactionConfig>,

    /// Tokens attached to factions at load time.
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,

    /// Stimuli to play back, in order.
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not a valid scenario.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not a valid scenario.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// One faction of the scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FactionConfig {
    /// Short key other entries use to refer to this faction.
    pub key: String,

    /// Display name. Defaults to the key.
    #[serde(default)]
    pub name: Option<String>,

    /// Keys of factions this faction considers allies.
    #[serde(default)]
    pub allies: Vec<String>,

    /// Keys of factions this faction considers enemies.
    #[serde(default)]
    pub enemies: Vec<String>,
}

impl FactionConfig {
    /// The display name, falling back to the key.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

/// One token attached at load time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenConfig {
    /// Optional fixed id. A fresh id is generated when absent.
    #[serde(default)]
    pub id: Option<TokenId>,

    /// Key of the owning faction.
    pub owner: String,

    /// Buff kind.
    pub kind: BuffKind,

    /// Effect size. Whole numbers only.
    #[serde(default)]
    pub magnitude: i32,

    /// Visibility policy.
    pub visibility: Visibility,

    /// Consumption policy.
    pub consumption: ConsumptionConfig,

    /// Creation time as a millisecond offset from the scenario epoch.
    #[serde(default)]
    pub created_at_ms: u64,
}

/// Consumption policy as written in YAML: `{ time_ms: 100 }` or
/// `{ event: battle }`. A map naming both keys matches neither.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum ConsumptionConfig {
    /// Expire after `time_ms` milliseconds.
    TimeMs {
        /// Lifetime in milliseconds.
        time_ms: u64,
    },
    /// Consume when `event` is raised.
    Event {
        /// The triggering event name.
        event: String,
    },
}

impl ConsumptionConfig {
    /// Convert to the runtime policy. Lifetimes beyond the range of
    /// [`TimeDelta`] saturate to [`TimeDelta::MAX`].
    pub fn to_consumption(&self) -> Consumption {
        match self {
            Self::TimeMs { time_ms } => {
                let ttl = i64::try_from(*time_ms)
                    .ok()
                    .and_then(TimeDelta::try_milliseconds)
                    .unwrap_or(TimeDelta::MAX);
                Consumption::time(ttl)
            }
            Self::Event { event } => Consumption::event(event.clone()),
        }
    }
}
