//! Error types for the scenario runner binary.
//!
//! [`EngineError`] wraps every failure mode of startup and playback so that
//! `main` can propagate with `?`.

/// Top-level error for the scenario runner.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Scenario loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: warband_core::config::ConfigError,
    },

    /// Theater assembly or script playback failed.
    #[error("theater error: {source}")]
    Theater {
        /// The underlying theater error.
        #[from]
        source: warband_core::error::TheaterError,
    },
}
