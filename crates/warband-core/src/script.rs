//! Scripted stimulus playback.
//!
//! A script is an ordered list of [`ScriptStep`]s read from the scenario.
//! [`run_script`] applies them one at a time to a [`Theater`]. Time points
//! are millisecond offsets from the scenario epoch, so playback never reads
//! the wall clock and two runs over the same scenario produce the same
//! outcomes.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use warband_tokens::Faction;

use crate::error::TheaterError;
use crate::theater::{Theater, VisibilityRow, offset};

/// One stimulus in a scenario script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Process time expiry at `epoch + at_ms`.
    AdvanceTime {
        /// Offset from the scenario epoch in milliseconds.
        at_ms: u64,
    },
    /// Raise a named event on every faction.
    RaiseEvent {
        /// The event name.
        name: String,
    },
    /// `faction` starts treating `with` as an ally.
    Ally {
        /// Key of the faction whose view changes.
        faction: String,
        /// Key of the faction being reclassified.
        with: String,
    },
    /// `faction` starts treating `with` as an enemy.
    Enemy {
        /// Key of the faction whose view changes.
        faction: String,
        /// Key of the faction being reclassified.
        with: String,
    },
    /// `faction` stops treating `with` as ally or enemy.
    Neutral {
        /// Key of the faction whose view changes.
        faction: String,
        /// Key of the faction being reclassified.
        with: String,
    },
    /// Snapshot visible token counts for every pair of factions.
    Report,
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Number of tokens consumed by a time or event step.
    Consumed(usize),
    /// Whether a diplomacy step changed any relationship set.
    Relations(bool),
    /// Visible counts captured by a report step.
    Report(Vec<VisibilityRow>),
}

/// Apply `steps` to `theater` in order.
///
/// # Errors
///
/// Stops at the first step that names an unknown faction, asks a faction
/// to relate to itself, or uses an unrepresentable time offset.
pub fn run_script(
    theater: &mut Theater,
    steps: &[ScriptStep],
    epoch: DateTime<Utc>,
) -> Result<Vec<StepOutcome>, TheaterError> {
    let mut outcomes = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        let outcome = run_step(theater, step, epoch)?;
        info!(step = index, ?step, ?outcome, "Script step applied");
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

fn run_step(
    theater: &mut Theater,
    step: &ScriptStep,
    epoch: DateTime<Utc>,
) -> Result<StepOutcome, TheaterError> {
    let outcome = match step {
        ScriptStep::AdvanceTime { at_ms } => {
            let now = offset(epoch, *at_ms)?;
            StepOutcome::Consumed(theater.advance_time(now).len())
        }
        ScriptStep::RaiseEvent { name } => StepOutcome::Consumed(theater.raise_event(name).len()),
        ScriptStep::Ally { faction, with } => {
            let other = theater.id_of(with)?;
            let changed = faction_mut(theater, faction)?.form_alliance(other)?;
            StepOutcome::Relations(changed)
        }
        ScriptStep::Enemy { faction, with } => {
            let other = theater.id_of(with)?;
            let changed = faction_mut(theater, faction)?.declare_enemy(other)?;
            StepOutcome::Relations(changed)
        }
        ScriptStep::Neutral { faction, with } => {
            let other = theater.id_of(with)?;
            StepOutcome::Relations(faction_mut(theater, faction)?.make_neutral(other))
        }
        ScriptStep::Report => StepOutcome::Report(theater.visibility_report()),
    };
    Ok(outcome)
}

fn faction_mut<'a>(
    theater: &'a mut Theater,
    key: &str,
) -> Result<&'a mut Faction, TheaterError> {
    let id = theater.id_of(key)?;
    theater
        .faction_mut(id)
        .ok_or(TheaterError::FactionNotFound(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use warband_tokens::FactionError;

    use super::*;
    use crate::config::ScenarioConfig;

    const SCENARIO: &str = r"
factions:
  - key: A
    allies: [B]
  - key: B
    allies: [A]
  - key: C
tokens:
  - owner: A
    kind: attack
    magnitude: 15
    visibility: allies
    consumption: { event: battle }
  - owner: A
    kind: speed
    visibility: enemies
    consumption: { time_ms: 100 }
script:
  - action: report
  - action: raise_event
    name: siege
  - action: neutral
    faction: B
    with: A
  - action: report
  - action: ally
    faction: B
    with: A
  - action: raise_event
    name: battle
  - action: advance_time
    at_ms: 50
  - action: advance_time
    at_ms: 150
  - action: report
";

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn load() -> (Theater, ScenarioConfig) {
        let config = ScenarioConfig::parse(SCENARIO).unwrap();
        let theater = Theater::from_config(&config, epoch()).unwrap();
        (theater, config)
    }

    fn visible(theater: &Theater, rows: &[VisibilityRow], owner: &str, viewer: &str) -> usize {
        let owner = theater.id_of(owner).unwrap();
        let viewer = theater.id_of(viewer).unwrap();
        rows.iter()
            .find(|r| r.owner == owner && r.viewer == viewer)
            .map_or(0, |r| r.visible)
    }

    #[test]
    fn plays_full_script() {
        let (mut theater, config) = load();
        let outcomes = run_script(&mut theater, &config.script, epoch()).unwrap();
        assert_eq!(outcomes.len(), 9);

        let Some(StepOutcome::Report(initial)) = outcomes.first() else {
            panic!("first step should be a report");
        };
        assert_eq!(visible(&theater, initial, "A", "A"), 2);
        assert_eq!(visible(&theater, initial, "A", "B"), 2);
        assert_eq!(visible(&theater, initial, "A", "C"), 1);

        assert_eq!(outcomes.get(1), Some(&StepOutcome::Consumed(0)));
        assert_eq!(outcomes.get(2), Some(&StepOutcome::Relations(true)));

        let Some(StepOutcome::Report(after_neutral)) = outcomes.get(3) else {
            panic!("fourth step should be a report");
        };
        assert_eq!(visible(&theater, after_neutral, "A", "B"), 1);

        assert_eq!(outcomes.get(4), Some(&StepOutcome::Relations(true)));
        assert_eq!(outcomes.get(5), Some(&StepOutcome::Consumed(1)));
        assert_eq!(outcomes.get(6), Some(&StepOutcome::Consumed(0)));
        assert_eq!(outcomes.get(7), Some(&StepOutcome::Consumed(1)));

        let Some(StepOutcome::Report(last)) = outcomes.get(8) else {
            panic!("last step should be a report");
        };
        assert!(last.iter().all(|r| r.visible == 0));
    }

    #[test]
    fn replay_is_deterministic() {
        let (mut first, config) = load();
        let (mut second, _) = load();
        let a = run_script(&mut first, &config.script, epoch()).unwrap();
        let b = run_script(&mut second, &config.script, epoch()).unwrap();

        let consumed = |outcomes: &[StepOutcome]| -> Vec<StepOutcome> {
            outcomes
                .iter()
                .filter(|o| !matches!(o, StepOutcome::Report(_)))
                .cloned()
                .collect()
        };
        assert_eq!(consumed(&a), consumed(&b));
    }

    #[test]
    fn unknown_key_stops_playback() {
        let (mut theater, _) = load();
        let steps = [
            ScriptStep::RaiseEvent {
                name: "battle".to_owned(),
            },
            ScriptStep::Enemy {
                faction: "Z".to_owned(),
                with: "A".to_owned(),
            },
        ];
        let result = run_script(&mut theater, &steps, epoch());
        assert_eq!(result.err(), Some(TheaterError::UnknownFaction("Z".to_owned())));
    }

    #[test]
    fn self_relation_is_rejected() {
        let (mut theater, _) = load();
        let a = theater.id_of("A").unwrap();
        let steps = [ScriptStep::Enemy {
            faction: "A".to_owned(),
            with: "A".to_owned(),
        }];
        let result = run_script(&mut theater, &steps, epoch());
        assert_eq!(
            result.err(),
            Some(TheaterError::Faction(FactionError::SelfRelation(a)))
        );
    }
}
