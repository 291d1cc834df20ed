//! Batch runner — repeats the game simulator and averages the results.
//!
//! Two entry points:
//! - `run_batch()`: N trials of one strategy, averaged into a `BatchResult`.
//! - `run_strategies()`: one batch per strategy with shared settings, plus the
//!   opener-minus-starter difference when both are present.
//!
//! Trials are seeded from `RngHierarchy(seed)` by `(strategy, trial)`, grouped
//! into fixed chunks, and summed in trial order within each chunk and in chunk
//! order across chunks. The parallel and sequential paths therefore produce
//! bit-identical grids.

use std::ops::AddAssign;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use openerlab_core::domain::{Lineup, PitchingStaff};
use openerlab_core::engine::{
    simulate_game, stall_prone, GameError, InningGrid, PitcherRotation, Strategy,
};
use openerlab_core::outcome::matchup_table;
use openerlab_core::rng::RngHierarchy;

/// Trials summed sequentially inside one unit of parallel work.
const TRIALS_PER_CHUNK: usize = 64;

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("trial count must be at least 1")]
    NoTrials,

    #[error("{strategy} trial {trial} failed: {source}")]
    Game {
        strategy: Strategy,
        trial: usize,
        #[source]
        source: GameError,
    },
}

/// Monte Carlo settings for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub trials: usize,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            trials: 500,
            seed: 42,
            parallel: true,
        }
    }
}

/// Averaged output of one strategy's batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub strategy: Strategy,
    pub trials: usize,
    pub seed: u64,
    /// Grand total of the averaged runs grid.
    pub expected_runs: f64,
    /// Mean expected runs created per (inning, slot).
    pub runs: InningGrid,
    /// Share of games in which each slot batted in each inning.
    pub appearances: InningGrid,
    pub mean_plate_appearances: f64,
}

/// Results for several strategies run under the same settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub results: Vec<BatchResult>,
    /// Present when both opener-first and starter-first were run.
    pub opener_minus_starter: Option<f64>,
}

impl StrategyComparison {
    pub fn result(&self, strategy: Strategy) -> Option<&BatchResult> {
        self.results.iter().find(|r| r.strategy == strategy)
    }
}

/// Running sums across trials.
#[derive(Debug, Clone, Copy, Default)]
struct TrialTotals {
    runs: InningGrid,
    appearances: InningGrid,
    plate_appearances: u64,
}

impl AddAssign<&TrialTotals> for TrialTotals {
    fn add_assign(&mut self, other: &TrialTotals) {
        self.runs += &other.runs;
        self.appearances += &other.appearances;
        self.plate_appearances += other.plate_appearances;
    }
}

/// Simulate `config.trials` games of `strategy` and average them.
pub fn run_batch(
    staff: &PitchingStaff,
    lineup: &Lineup,
    strategy: Strategy,
    config: &BatchConfig,
) -> Result<BatchResult, RunError> {
    if config.trials == 0 {
        return Err(RunError::NoTrials);
    }

    let started = Instant::now();
    let rotation = strategy.rotation();
    let hierarchy = RngHierarchy::new(config.seed);

    let chunks: Vec<(usize, usize)> = (0..config.trials)
        .step_by(TRIALS_PER_CHUNK)
        .map(|start| (start, (start + TRIALS_PER_CHUNK).min(config.trials)))
        .collect();

    let run = |&(start, end): &(usize, usize)| {
        run_chunk(
            staff,
            lineup,
            strategy,
            rotation.as_ref(),
            &hierarchy,
            start..end,
        )
    };
    let partials: Vec<TrialTotals> = if config.parallel {
        chunks.par_iter().map(run).collect::<Result<Vec<_>, _>>()?
    } else {
        chunks.iter().map(run).collect::<Result<Vec<_>, _>>()?
    };

    let mut totals = TrialTotals::default();
    for partial in &partials {
        totals += partial;
    }

    let trials = config.trials as f64;
    let runs = totals.runs.scaled(trials);
    let result = BatchResult {
        strategy,
        trials: config.trials,
        seed: config.seed,
        expected_runs: runs.total(),
        runs,
        appearances: totals.appearances.scaled(trials),
        mean_plate_appearances: totals.plate_appearances as f64 / trials,
    };

    tracing::info!(
        strategy = %strategy,
        trials = config.trials,
        seed = hierarchy.master_seed(),
        expected_runs = result.expected_runs,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch complete"
    );
    Ok(result)
}

fn run_chunk(
    staff: &PitchingStaff,
    lineup: &Lineup,
    strategy: Strategy,
    rotation: &dyn PitcherRotation,
    hierarchy: &RngHierarchy,
    trials: std::ops::Range<usize>,
) -> Result<TrialTotals, RunError> {
    let mut totals = TrialTotals::default();
    for trial in trials {
        let mut rng = hierarchy.rng_for(strategy.label(), trial as u64);
        let game = simulate_game(staff, lineup, rotation, &mut rng).map_err(|source| {
            RunError::Game {
                strategy,
                trial,
                source,
            }
        })?;
        totals.runs += &game.runs;
        totals.appearances += &game.appearances;
        totals.plate_appearances += u64::from(game.plate_appearances);
    }
    Ok(totals)
}

/// Run one batch per strategy with the same settings.
pub fn run_strategies(
    staff: &PitchingStaff,
    lineup: &Lineup,
    strategies: &[Strategy],
    config: &BatchConfig,
) -> Result<StrategyComparison, RunError> {
    warn_on_risky_matchups(staff, lineup);

    let results = strategies
        .iter()
        .map(|&strategy| run_batch(staff, lineup, strategy, config))
        .collect::<Result<Vec<_>, _>>()?;

    let opener_minus_starter = {
        let find = |s: Strategy| results.iter().find(|r| r.strategy == s);
        match (find(Strategy::OpenerFirst), find(Strategy::StarterFirst)) {
            (Some(opener), Some(starter)) => Some(opener.expected_runs - starter.expected_runs),
            _ => None,
        }
    };

    Ok(StrategyComparison {
        results,
        opener_minus_starter,
    })
}

/// Run both strategies and report the difference.
pub fn compare_strategies(
    staff: &PitchingStaff,
    lineup: &Lineup,
    config: &BatchConfig,
) -> Result<StrategyComparison, RunError> {
    run_strategies(staff, lineup, &Strategy::ALL, config)
}

/// Log matchups the simulator handles poorly and return how many were flagged.
///
/// Negative derived probabilities are drawn with zero weight, which usually
/// means the input rates are extreme. A matchup whose out probability cannot
/// be expected to produce 27 outs within the plate-appearance ceiling makes
/// games stall when enough of the lineup looks like it.
fn warn_on_risky_matchups(staff: &PitchingStaff, lineup: &Lineup) -> usize {
    let mut flagged = 0;
    for matchup in matchup_table(staff, lineup) {
        let negative = matchup.probabilities.negative_events();
        let out_probability = matchup.probabilities.out_probability();
        let stalls = stall_prone(out_probability);

        if !negative.is_empty() {
            let events: Vec<&str> = negative.iter().map(|e| e.code()).collect();
            tracing::warn!(
                slot = matchup.slot.number(),
                role = %matchup.role,
                hitter = %matchup.hitter,
                pitcher = %matchup.pitcher,
                events = ?events,
                "negative outcome probability clamped to zero"
            );
        }
        if stalls {
            tracing::warn!(
                slot = matchup.slot.number(),
                role = %matchup.role,
                hitter = %matchup.hitter,
                pitcher = %matchup.pitcher,
                out_probability,
                "out probability too low to finish a game reliably"
            );
        }
        if stalls || !negative.is_empty() {
            flagged += 1;
        }
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use openerlab_core::domain::{Player, RateProfile, RawRates};

    fn player(name: &str) -> Player {
        let profile = RateProfile::new(RawRates {
            k_pct: 0.20,
            bb_pct: 0.08,
            single_pct: 0.15,
            double_pct: 0.05,
            triple_pct: 0.005,
            hr_pct: 0.03,
            hbp_pct: 0.01,
        })
        .unwrap();
        Player::new(name, profile)
    }

    fn roster() -> (PitchingStaff, Lineup) {
        (
            PitchingStaff::new(player("o"), player("s"), player("b")),
            Lineup::new(std::array::from_fn(|i| player(&format!("h{i}")))),
        )
    }

    #[test]
    fn zero_trials_rejected() {
        let (staff, lineup) = roster();
        let config = BatchConfig {
            trials: 0,
            ..BatchConfig::default()
        };
        assert!(matches!(
            run_batch(&staff, &lineup, Strategy::OpenerFirst, &config),
            Err(RunError::NoTrials)
        ));
    }

    #[test]
    fn scalar_is_total_of_averaged_grid() {
        let (staff, lineup) = roster();
        let config = BatchConfig {
            trials: 20,
            seed: 1,
            parallel: false,
        };
        let result = run_batch(&staff, &lineup, Strategy::StarterFirst, &config).unwrap();
        assert_eq!(result.expected_runs, result.runs.total());
        assert_eq!(result.trials, 20);
        assert!(result.mean_plate_appearances >= 27.0);
    }

    #[test]
    fn partial_final_chunk_counted() {
        let (staff, lineup) = roster();
        // 70 trials = one full chunk of 64 plus a chunk of 6.
        let config = BatchConfig {
            trials: 70,
            seed: 3,
            parallel: false,
        };
        let result = run_batch(&staff, &lineup, Strategy::OpenerFirst, &config).unwrap();
        // Slot 1 leads off every game, so its first-inning share is exactly 1.
        let leadoff = result
            .appearances
            .get(1, openerlab_core::domain::BattingSlot::FIRST);
        assert!((leadoff - 1.0).abs() < 1e-12);
    }

    #[test]
    fn average_roster_raises_no_warnings() {
        let (staff, lineup) = roster();
        assert_eq!(warn_on_risky_matchups(&staff, &lineup), 0);
    }

    #[test]
    fn low_out_matchups_flagged_before_running() {
        let free_swinger = RateProfile::new(RawRates {
            k_pct: 0.001,
            bb_pct: 0.5,
            single_pct: 0.5,
            double_pct: 0.3,
            triple_pct: 0.1,
            hr_pct: 0.3,
            hbp_pct: 0.3,
        })
        .unwrap();
        let (staff, _) = roster();
        let lineup = Lineup::new(std::array::from_fn(|i| {
            if i == 0 {
                Player::new("free swinger", free_swinger)
            } else {
                player(&format!("h{i}"))
            }
        }));
        // Slot 1 against each of the three pitchers.
        assert_eq!(warn_on_risky_matchups(&staff, &lineup), 3);
    }

    #[test]
    fn difference_only_when_both_strategies_run() {
        let (staff, lineup) = roster();
        let config = BatchConfig {
            trials: 10,
            seed: 5,
            parallel: false,
        };
        let single = run_strategies(&staff, &lineup, &[Strategy::OpenerFirst], &config).unwrap();
        assert!(single.opener_minus_starter.is_none());

        let both = compare_strategies(&staff, &lineup, &config).unwrap();
        let opener = both.result(Strategy::OpenerFirst).unwrap().expected_runs;
        let starter = both.result(Strategy::StarterFirst).unwrap().expected_runs;
        assert_eq!(both.opener_minus_starter, Some(opener - starter));
    }
}
