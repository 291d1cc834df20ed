//! Roster loading from CSV.
//!
//! Each file has a header row naming at least the seven rate columns and an
//! `order` column. Pitcher files use `order` 1 = opener, 2 = starter,
//! 3 = bullpen; hitter files use the batting slot 1–9. An optional `name`
//! column labels reports. Any other columns are ignored.
//!
//! Rows are validated as they are read; a bad rate or a malformed roster
//! fails the load before any simulation starts.

use std::io::Read;
use std::path::{Path, PathBuf};

use openerlab_core::domain::{
    Lineup, PitchingStaff, Player, ProfileError, RateProfile, RawRates, RosterError,
};
use serde::Deserialize;
use thiserror::Error;

use crate::config::RosterPaths;

/// Errors from the roster loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{source_name} row {row}: {source}")]
    Profile {
        source_name: String,
        row: usize,
        #[source]
        source: ProfileError,
    },

    #[error("{source_name}: {source}")]
    Roster {
        source_name: String,
        #[source]
        source: RosterError,
    },
}

/// A lineup and staff loaded together.
#[derive(Debug, Clone)]
pub struct Roster {
    pub staff: PitchingStaff,
    pub lineup: Lineup,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(default)]
    name: Option<String>,
    order: i64,
    k_pct: f64,
    bb_pct: f64,
    single_pct: f64,
    double_pct: f64,
    triple_pct: f64,
    hr_pct: f64,
    hbp_pct: f64,
}

impl RosterRow {
    fn rates(&self) -> RawRates {
        RawRates {
            k_pct: self.k_pct,
            bb_pct: self.bb_pct,
            single_pct: self.single_pct,
            double_pct: self.double_pct,
            triple_pct: self.triple_pct,
            hr_pct: self.hr_pct,
            hbp_pct: self.hbp_pct,
        }
    }
}

/// Load both roster files.
pub fn load_roster(paths: &RosterPaths) -> Result<Roster, LoadError> {
    let staff = load_staff(&paths.pitchers)?;
    let lineup = load_lineup(&paths.hitters)?;
    tracing::debug!(
        pitchers = %paths.pitchers.display(),
        hitters = %paths.hitters.display(),
        "roster loaded"
    );
    Ok(Roster { staff, lineup })
}

pub fn load_staff(path: &Path) -> Result<PitchingStaff, LoadError> {
    let file = open(path)?;
    read_staff(file, &path.display().to_string())
}

pub fn load_lineup(path: &Path) -> Result<Lineup, LoadError> {
    let file = open(path)?;
    read_lineup(file, &path.display().to_string())
}

/// Parse a pitching staff from any reader. `source_name` labels errors.
pub fn read_staff<R: Read>(reader: R, source_name: &str) -> Result<PitchingStaff, LoadError> {
    let rows = read_rows(reader, source_name, "pitcher")?;
    PitchingStaff::from_ordered(rows).map_err(|source| LoadError::Roster {
        source_name: source_name.to_string(),
        source,
    })
}

/// Parse a lineup from any reader. `source_name` labels errors.
pub fn read_lineup<R: Read>(reader: R, source_name: &str) -> Result<Lineup, LoadError> {
    let rows = read_rows(reader, source_name, "hitter")?;
    Lineup::from_ordered(rows).map_err(|source| LoadError::Roster {
        source_name: source_name.to_string(),
        source,
    })
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_rows<R: Read>(
    reader: R,
    source_name: &str,
    default_label: &str,
) -> Result<Vec<(i64, Player)>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = record.map_err(|source| LoadError::Csv {
            source_name: source_name.to_string(),
            source,
        })?;
        // Row numbers are 1-based data rows (header excluded).
        let profile = RateProfile::new(row.rates()).map_err(|source| LoadError::Profile {
            source_name: source_name.to_string(),
            row: i + 1,
            source,
        })?;
        let name = row
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{default_label} {}", row.order));
        rows.push((row.order, Player::new(name, profile)));
    }
    Ok(rows)
}
