//! Single-game simulation loop.
//!
//! Each iteration is one plate appearance:
//! 1. Count the plate appearance and bring up the next hitter
//! 2. Mark the appearance cell for (inning, slot)
//! 3. Ask the rotation policy who pitches, recording any change
//! 4. Resolve the matchup through the outcome model
//! 5. Count an out on `k` / `oip`
//! 6. Credit the matchup's expected runs to the runs cell
//!
//! The loop ends at 27 outs.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Lineup, PitcherRole, PitchingStaff};
use crate::outcome::{evaluate, OutcomeError};

use super::grid::InningGrid;
use super::rotation::PitcherRotation;
use super::state::{GameState, OUTS_PER_GAME};

/// Hard ceiling on plate appearances in one game. Reachable when the out
/// probability is near zero relative to the ceiling, which valid but extreme
/// rate profiles can produce.
pub const MAX_PLATE_APPEARANCES: u32 = 1_000;

/// Whether a matchup's out probability is too low to expect 27 outs within
/// [`MAX_PLATE_APPEARANCES`] if every plate appearance looked like it.
pub fn stall_prone(out_probability: f64) -> bool {
    out_probability * f64::from(MAX_PLATE_APPEARANCES) < f64::from(OUTS_PER_GAME)
}

/// Errors from simulating a game.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("plate appearance {plate_appearance} could not be resolved: {source}")]
    Outcome {
        plate_appearance: u32,
        #[source]
        source: OutcomeError,
    },

    #[error("game stalled at {outs} outs after {plate_appearances} plate appearances")]
    Stalled { plate_appearances: u32, outs: u8 },
}

/// A pitching change, recorded at the plate appearance it took effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingChange {
    pub plate_appearance: u32,
    pub outs: u8,
    pub from: PitcherRole,
    pub to: PitcherRole,
}

/// Everything one simulated game produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Expected runs created, summed per (inning, slot).
    pub runs: InningGrid,
    /// 1.0 where the slot batted in that inning at least once.
    pub appearances: InningGrid,
    pub plate_appearances: u32,
    pub outs: u8,
    pub pitching_changes: Vec<PitchingChange>,
}

impl GameOutcome {
    pub fn expected_runs(&self) -> f64 {
        self.runs.total()
    }
}

/// Simulate one game of `lineup` against `staff` under `rotation`.
pub fn simulate_game<R: Rng + ?Sized>(
    staff: &PitchingStaff,
    lineup: &Lineup,
    rotation: &dyn PitcherRotation,
    rng: &mut R,
) -> Result<GameOutcome, GameError> {
    let mut state = GameState::new(rotation.starting_pitcher());
    let mut runs = InningGrid::zeros();
    let mut appearances = InningGrid::zeros();
    let mut pitching_changes = Vec::new();

    while !state.is_over() {
        if state.plate_appearances() >= MAX_PLATE_APPEARANCES {
            return Err(GameError::Stalled {
                plate_appearances: state.plate_appearances(),
                outs: state.outs(),
            });
        }

        state.advance_batter();
        let inning = state.inning();
        let slot = state.slot();
        appearances.set(inning, slot, 1.0);

        let next = rotation.next_pitcher(&state);
        if next != state.pitcher() {
            pitching_changes.push(PitchingChange {
                plate_appearance: state.plate_appearances(),
                outs: state.outs(),
                from: state.pitcher(),
                to: next,
            });
            state.change_pitcher(next);
        }

        let hitter = &lineup.hitter(slot).profile;
        let pitcher = &staff.pitcher(state.pitcher()).profile;
        let pa = evaluate(hitter, pitcher, rng).map_err(|source| GameError::Outcome {
            plate_appearance: state.plate_appearances(),
            source,
        })?;

        if pa.event.is_out() {
            state.record_out();
        }
        runs.add(inning, slot, pa.expected_runs);
    }

    tracing::trace!(
        rotation = rotation.name(),
        plate_appearances = state.plate_appearances(),
        changes = pitching_changes.len(),
        "game complete"
    );

    Ok(GameOutcome {
        runs,
        appearances,
        plate_appearances: state.plate_appearances(),
        outs: state.outs(),
        pitching_changes,
    })
}
