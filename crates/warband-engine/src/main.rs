//! Scenario runner for Warband buff tokens.
//!
//! Loads a scenario, assembles the theater, plays the scenario script and
//! logs what every faction can see after each report step.
//!
//! # Startup Sequence
//!
//! 1. Load the scenario from the path given as the first argument, or from
//!    `warband-scenario.yaml` in the working directory
//! 2. Initialize structured logging (tracing), `RUST_LOG` overriding the
//!    scenario's `logging.level`
//! 3. Build the theater with the current time as scenario epoch
//! 4. Play the script
//! 5. Log the final visibility report

mod error;

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warband_core::config::ScenarioConfig;
use warband_core::script::{StepOutcome, run_script};
use warband_core::theater::{Theater, VisibilityRow};

use crate::error::EngineError;

/// Default scenario path, relative to the working directory.
const DEFAULT_SCENARIO: &str = "warband-scenario.yaml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load the scenario. Logging is not up yet, so a missing default
    //    file falls back to an empty scenario silently and is logged below.
    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_SCENARIO), PathBuf::from);
    let (config, loaded) = load_scenario(&path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(path = %path.display(), loaded, "warband-engine starting");

    // 3. Build the theater.
    let epoch = Utc::now();
    let mut theater = Theater::from_config(&config, epoch).map_err(EngineError::from)?;

    // 4. Play the script.
    let outcomes = run_script(&mut theater, &config.script, epoch).map_err(EngineError::from)?;
    for outcome in &outcomes {
        if let StepOutcome::Report(rows) = outcome {
            log_report(&theater, rows);
        }
    }

    // 5. Final state.
    log_report(&theater, &theater.visibility_report());
    info!(steps = outcomes.len(), "warband-engine shutdown complete");

    Ok(())
}

/// Load the scenario at `path`, falling back to an empty one when the
/// default file is absent. Returns whether a file was read.
fn load_scenario(path: &Path) -> Result<(ScenarioConfig, bool), EngineError> {
    if path.exists() || path != Path::new(DEFAULT_SCENARIO) {
        let config = ScenarioConfig::from_file(path)?;
        Ok((config, true))
    } else {
        Ok((ScenarioConfig::default(), false))
    }
}

fn log_report(theater: &Theater, rows: &[VisibilityRow]) {
    for row in rows {
        info!(
            owner = theater.key_of(row.owner).unwrap_or("?"),
            viewer = theater.key_of(row.viewer).unwrap_or("?"),
            visible = row.visible,
            "Visible tokens"
        );
    }
}
