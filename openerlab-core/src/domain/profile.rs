//! Player rate profiles.
//!
//! A profile holds the seven per-plate-appearance rates the outcome model
//! consumes. Profiles are validated on construction: every rate must be finite
//! and in (0, 1]. The log-linear regressions are undefined at zero, so a
//! profile that reaches the engine is always safe to take logarithms of.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The seven rate statistics carried by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateStat {
    KPct,
    BbPct,
    SinglePct,
    DoublePct,
    TriplePct,
    HrPct,
    HbpPct,
}

impl RateStat {
    pub const ALL: [RateStat; 7] = [
        RateStat::KPct,
        RateStat::BbPct,
        RateStat::SinglePct,
        RateStat::DoublePct,
        RateStat::TriplePct,
        RateStat::HrPct,
        RateStat::HbpPct,
    ];

    /// Column name used in roster files.
    pub fn column(self) -> &'static str {
        match self {
            RateStat::KPct => "k_pct",
            RateStat::BbPct => "bb_pct",
            RateStat::SinglePct => "single_pct",
            RateStat::DoublePct => "double_pct",
            RateStat::TriplePct => "triple_pct",
            RateStat::HrPct => "hr_pct",
            RateStat::HbpPct => "hbp_pct",
        }
    }
}

impl fmt::Display for RateStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Errors from profile construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("{stat} must be greater than zero (got {value})")]
    NonPositive { stat: RateStat, value: f64 },

    #[error("{stat} must be a finite number (got {value})")]
    NonFinite { stat: RateStat, value: f64 },

    #[error("{stat} must not exceed 1.0 (got {value})")]
    AboveOne { stat: RateStat, value: f64 },
}

/// Raw, unvalidated rates. Field names match the roster column names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRates {
    pub k_pct: f64,
    pub bb_pct: f64,
    pub single_pct: f64,
    pub double_pct: f64,
    pub triple_pct: f64,
    pub hr_pct: f64,
    pub hbp_pct: f64,
}

/// Validated per-plate-appearance rates for one hitter or pitcher.
///
/// Immutable after construction; use [`RateProfile::new`] or
/// `RateProfile::try_from(RawRates)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRates", into = "RawRates")]
pub struct RateProfile {
    rates: RawRates,
}

impl RateProfile {
    pub fn new(rates: RawRates) -> Result<Self, ProfileError> {
        for stat in RateStat::ALL {
            let value = rates.get(stat);
            if !value.is_finite() {
                return Err(ProfileError::NonFinite { stat, value });
            }
            if value <= 0.0 {
                return Err(ProfileError::NonPositive { stat, value });
            }
            if value > 1.0 {
                return Err(ProfileError::AboveOne { stat, value });
            }
        }
        Ok(Self { rates })
    }

    pub fn get(&self, stat: RateStat) -> f64 {
        self.rates.get(stat)
    }

    pub fn k_pct(&self) -> f64 {
        self.rates.k_pct
    }

    pub fn bb_pct(&self) -> f64 {
        self.rates.bb_pct
    }

    pub fn single_pct(&self) -> f64 {
        self.rates.single_pct
    }

    pub fn double_pct(&self) -> f64 {
        self.rates.double_pct
    }

    pub fn triple_pct(&self) -> f64 {
        self.rates.triple_pct
    }

    pub fn hr_pct(&self) -> f64 {
        self.rates.hr_pct
    }

    pub fn hbp_pct(&self) -> f64 {
        self.rates.hbp_pct
    }
}

impl RawRates {
    pub fn get(&self, stat: RateStat) -> f64 {
        match stat {
            RateStat::KPct => self.k_pct,
            RateStat::BbPct => self.bb_pct,
            RateStat::SinglePct => self.single_pct,
            RateStat::DoublePct => self.double_pct,
            RateStat::TriplePct => self.triple_pct,
            RateStat::HrPct => self.hr_pct,
            RateStat::HbpPct => self.hbp_pct,
        }
    }
}

impl TryFrom<RawRates> for RateProfile {
    type Error = ProfileError;

    fn try_from(rates: RawRates) -> Result<Self, Self::Error> {
        Self::new(rates)
    }
}

impl From<RateProfile> for RawRates {
    fn from(profile: RateProfile) -> Self {
        profile.rates
    }
}
