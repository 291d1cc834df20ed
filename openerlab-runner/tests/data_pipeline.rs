//! End-to-end: config file → roster CSVs → comparison → artifacts on disk.

use std::path::PathBuf;

use openerlab_core::domain::{BattingSlot, PitcherRole};
use openerlab_core::engine::Strategy;
use openerlab_runner::export::load_artifacts;
use openerlab_runner::{load_roster, run_strategies, save_artifacts, SimulationConfig, SimulationReport};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn config_resolves_roster_next_to_file() {
    let config = SimulationConfig::from_file(&fixture("sim.toml")).unwrap();
    assert_eq!(config.simulation.sample_size, 200);
    assert_eq!(config.simulation.seed, 2019);

    let paths = config.roster_paths().unwrap();
    assert!(paths.pitchers.ends_with("fixtures/pitcher_pcts.csv"));
    assert!(paths.hitters.is_file());
}

#[test]
fn roster_rows_land_in_order_column_positions() {
    let config = SimulationConfig::from_file(&fixture("sim.toml")).unwrap();
    let roster = load_roster(config.roster_paths().unwrap()).unwrap();

    assert_eq!(roster.lineup.hitter(BattingSlot::FIRST).name, "Reyes");
    assert_eq!(roster.lineup.hitter(BattingSlot::new(4).unwrap()).name, "Castillo");
    assert_eq!(roster.lineup.hitter(BattingSlot::LAST).name, "Whitaker");
    assert_eq!(roster.staff.pitcher(PitcherRole::Opener).name, "Opener");
    assert_eq!(roster.staff.pitcher(PitcherRole::Starter).name, "Starter");
}

#[test]
fn full_run_writes_artifacts() {
    let config = SimulationConfig::from_file(&fixture("sim.toml")).unwrap();
    let roster = load_roster(config.roster_paths().unwrap()).unwrap();

    let comparison = run_strategies(
        &roster.staff,
        &roster.lineup,
        &config.simulation.strategies,
        &config.batch(),
    )
    .unwrap();
    assert_eq!(comparison.results.len(), 2);
    assert!(comparison.opener_minus_starter.unwrap().is_finite());
    for result in &comparison.results {
        assert_eq!(result.trials, 200);
        assert_eq!(result.seed, 2019);
    }

    let report = SimulationReport::new(config.clone(), comparison);
    let out = tempfile::tempdir().unwrap();
    let run_dir = save_artifacts(&report, out.path()).unwrap();

    for strategy in Strategy::ALL {
        let label = strategy.label();
        let runs_csv = std::fs::read_to_string(run_dir.join(format!("{label}_runs.csv"))).unwrap();
        // Header, nine innings, totals.
        assert_eq!(runs_csv.lines().count(), 11);
    }

    let loaded = load_artifacts(&run_dir).unwrap();
    assert_eq!(loaded.run_id, config.run_id());
    assert_eq!(loaded.config, config);
}
