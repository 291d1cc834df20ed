//! Reporting and export — JSON and CSV artifact generation.
//!
//! - **JSON**: the full `SimulationReport` with schema versioning
//! - **CSV**: one 9×9 grid per file, innings as rows and batting slots as
//!   columns, for external charting tools
//!
//! Persisted reports include a `schema_version` field. Newer versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use openerlab_core::domain::LINEUP_SIZE;
use openerlab_core::engine::InningGrid;

use crate::config::{RunId, SimulationConfig};
use crate::runner::{StrategyComparison, SCHEMA_VERSION};

/// Everything a simulation run produced, as persisted to `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub generated_at: String,
    pub config: SimulationConfig,
    pub comparison: StrategyComparison,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl SimulationReport {
    pub fn new(config: SimulationConfig, comparison: StrategyComparison) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            run_id: config.run_id(),
            generated_at: chrono::Local::now().to_rfc3339(),
            config,
            comparison,
        }
    }
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SimulationReport` to pretty JSON.
pub fn export_json(report: &SimulationReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize SimulationReport to JSON")
}

/// Deserialize a `SimulationReport`, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SimulationReport> {
    let report: SimulationReport =
        serde_json::from_str(json).context("failed to deserialize SimulationReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export a grid as CSV.
///
/// Columns: inning, slot_1 … slot_9, total. One row per inning followed by a
/// `total` row of per-slot sums.
pub fn export_grid_csv(grid: &InningGrid) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["inning".to_string()];
    header.extend((1..=LINEUP_SIZE).map(|slot| format!("slot_{slot}")));
    header.push("total".to_string());
    wtr.write_record(&header)?;

    let inning_totals = grid.inning_totals();
    for (i, row) in grid.rows().iter().enumerate() {
        let mut record = vec![(i + 1).to_string()];
        record.extend(row.iter().map(|v| format!("{v:.6}")));
        record.push(format!("{:.6}", inning_totals[i]));
        wtr.write_record(&record)?;
    }

    let mut footer = vec!["total".to_string()];
    footer.extend(grid.slot_totals().iter().map(|v| format!("{v:.6}")));
    footer.push(format!("{:.6}", grid.total()));
    wtr.write_record(&footer)?;

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a simulation run.
///
/// Creates a directory named `{run_id prefix}_{timestamp}/` under
/// `output_dir` containing:
/// - `manifest.json` — the full `SimulationReport`
/// - `{strategy}_runs.csv` — averaged expected runs per (inning, slot)
/// - `{strategy}_appearances.csv` — plate-appearance likelihood per (inning, slot)
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &SimulationReport, output_dir: &Path) -> Result<PathBuf> {
    let prefix: String = report.run_id.chars().take(12).collect();
    let dirname = format!("{}_{}", prefix, chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join("manifest.json"), &json)?;

    for result in &report.comparison.results {
        let label = result.strategy.label();
        std::fs::write(
            run_dir.join(format!("{label}_runs.csv")),
            export_grid_csv(&result.runs)?,
        )?;
        std::fs::write(
            run_dir.join(format!("{label}_appearances.csv")),
            export_grid_csv(&result.appearances)?,
        )?;
    }

    tracing::info!(dir = %run_dir.display(), "artifacts saved");
    Ok(run_dir)
}

/// Load a `SimulationReport` from an artifact directory's manifest.json.
pub fn load_artifacts(dir: &Path) -> Result<SimulationReport> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use openerlab_core::domain::BattingSlot;
    use openerlab_core::engine::Strategy;

    use crate::runner::BatchResult;

    fn sample_report() -> SimulationReport {
        let mut runs = InningGrid::zeros();
        runs.add(1, BattingSlot::FIRST, 0.05);
        runs.add(9, BattingSlot::LAST, 0.02);
        let mut appearances = InningGrid::zeros();
        appearances.set(1, BattingSlot::FIRST, 1.0);

        let result = BatchResult {
            strategy: Strategy::OpenerFirst,
            trials: 10,
            seed: 42,
            expected_runs: runs.total(),
            runs,
            appearances,
            mean_plate_appearances: 38.5,
        };
        SimulationReport::new(
            SimulationConfig::default(),
            StrategyComparison {
                results: vec![result],
                opener_minus_starter: None,
            },
        )
    }

    #[test]
    fn grid_csv_has_header_rows_and_totals() {
        let report = sample_report();
        let csv = export_grid_csv(&report.comparison.results[0].runs).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("inning,slot_1"));
        assert!(lines[0].ends_with("slot_9,total"));
        assert!(lines[1].starts_with("1,0.050000"));
        assert!(lines[10].starts_with("total,0.050000"));
        assert!(lines[10].ends_with("0.070000"));
    }

    #[test]
    fn json_round_trip_preserves_grids() {
        let report = sample_report();
        let json = export_json(&report).unwrap();
        let back = import_json(&json).unwrap();
        assert_eq!(back.run_id, report.run_id);
        assert_grids_close(&back.comparison, &report.comparison);
    }

    #[test]
    fn newer_schema_rejected() {
        let mut report = sample_report();
        report.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&report).unwrap();
        assert!(import_json(&json).is_err());
    }

    #[test]
    fn artifacts_written_per_strategy() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();
        let run_dir = save_artifacts(&report, dir.path()).unwrap();

        assert!(run_dir.join("manifest.json").exists());
        assert!(run_dir.join("opener_first_runs.csv").exists());
        assert!(run_dir.join("opener_first_appearances.csv").exists());
        assert!(!run_dir.join("starter_first_runs.csv").exists());

        let loaded = load_artifacts(&run_dir).unwrap();
        assert_grids_close(&loaded.comparison, &report.comparison);
    }

    fn assert_grids_close(a: &StrategyComparison, b: &StrategyComparison) {
        assert_eq!(a.results.len(), b.results.len());
        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.strategy, y.strategy);
            assert!((x.expected_runs - y.expected_runs).abs() < 1e-12);
            for (rx, ry) in x.runs.rows().iter().zip(y.runs.rows()) {
                for (cx, cy) in rx.iter().zip(ry) {
                    assert!((cx - cy).abs() < 1e-12);
                }
            }
        }
    }
}
