//! Hitter/pitcher rate regressions.
//!
//! Coefficients from the FanGraphs "Outcome Machine" study, which fit each
//! event rate against the hitter's and pitcher's rates over historical league
//! data. They are calibration constants and must not be tuned.

/// Base of the log-linear regressions. The published fit exponentiates with
/// this truncated constant rather than `e`.
pub const CALIBRATION_BASE: f64 = 2.71828;

/// Share of balls in play that become errors.
pub const ERROR_RATE_ON_BALLS_IN_PLAY: f64 = 0.016;

/// `base^(hitter * ln(h) + pitcher * ln(p) + intercept)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLinear {
    pub hitter: f64,
    pub pitcher: f64,
    pub intercept: f64,
}

impl LogLinear {
    pub const fn new(hitter: f64, pitcher: f64, intercept: f64) -> Self {
        Self {
            hitter,
            pitcher,
            intercept,
        }
    }

    /// Both rates must be strictly positive.
    pub fn apply(&self, hitter_rate: f64, pitcher_rate: f64) -> f64 {
        let exponent =
            self.hitter * hitter_rate.ln() + self.pitcher * pitcher_rate.ln() + self.intercept;
        CALIBRATION_BASE.powf(exponent)
    }
}

/// `hitter * h + pitcher * p + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    pub hitter: f64,
    pub pitcher: f64,
    pub intercept: f64,
}

impl Linear {
    pub const fn new(hitter: f64, pitcher: f64, intercept: f64) -> Self {
        Self {
            hitter,
            pitcher,
            intercept,
        }
    }

    pub fn apply(&self, hitter_rate: f64, pitcher_rate: f64) -> f64 {
        self.hitter * hitter_rate + self.pitcher * pitcher_rate + self.intercept
    }
}

pub const STRIKEOUT: LogLinear = LogLinear::new(0.9427, 0.9254, 1.5268);
pub const WALK: LogLinear = LogLinear::new(0.906, 0.8644, 1.9975);
pub const SINGLE: LogLinear = LogLinear::new(1.01, 1.017, 1.943);
pub const DOUBLE: Linear = Linear::new(0.9206, 0.95779, -0.03968);
pub const TRIPLE: LogLinear = LogLinear::new(0.8435, 0.8698, 3.8809);
pub const HOME_RUN: LogLinear = LogLinear::new(0.9576, 0.9268, 3.2129);
pub const HIT_BY_PITCH: LogLinear = LogLinear::new(0.8761, 0.7623, 2.995);
