//! OpenerLab Runner — batch orchestration, roster loading, export.
//!
//! This crate builds on `openerlab-core` to provide:
//! - Roster loading from CSV with load-time validation
//! - TOML simulation config with defaults
//! - Batch runner: N seeded trials per strategy, averaged grids, parallel or sequential
//! - Opener-first vs. starter-first comparison
//! - JSON manifest and per-strategy grid CSV export

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use config::{ConfigError, RosterPaths, RunId, SimulationConfig, SimulationSection};
pub use data_loader::{load_lineup, load_roster, load_staff, LoadError, Roster};
pub use export::{
    export_grid_csv, export_json, import_json, load_artifacts, save_artifacts, SimulationReport,
};
pub use runner::{
    compare_strategies, run_batch, run_strategies, BatchConfig, BatchResult, RunError,
    StrategyComparison,
};
