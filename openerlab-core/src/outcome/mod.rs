//! Plate-appearance outcome model.
//!
//! Given a hitter and a pitcher, derives the probability of each of the nine
//! event categories, scores the matchup in expected runs created, and draws
//! one event.
//!
//! Seven rates come from regressions (see [`regression`]). Errors are a fixed
//! share of balls in play, and outs in play take the residual, so the vector
//! sums to 1 by construction. Extreme inputs can push the derived `e` or `oip`
//! below zero; such entries are treated as zero weight in the draw, and a
//! vector with no positive mass left is reported as
//! [`OutcomeError::DegenerateDistribution`].

pub mod regression;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    BattingSlot, EventCategory, Lineup, PitcherRole, PitchingStaff, RateProfile,
};

/// Errors from resolving a plate appearance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutcomeError {
    #[error("no positive probability mass to draw from: {probabilities:?}")]
    DegenerateDistribution { probabilities: [f64; 9] },
}

/// Probabilities of the nine event categories, indexed in
/// [`EventCategory::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    values: [f64; 9],
}

impl OutcomeProbabilities {
    /// Derive the matchup probabilities for `hitter` facing `pitcher`.
    pub fn derive(hitter: &RateProfile, pitcher: &RateProfile) -> Self {
        let k = regression::STRIKEOUT.apply(hitter.k_pct(), pitcher.k_pct());
        let bb = regression::WALK.apply(hitter.bb_pct(), pitcher.bb_pct());
        let single = regression::SINGLE.apply(hitter.single_pct(), pitcher.single_pct());
        let double = regression::DOUBLE.apply(hitter.double_pct(), pitcher.double_pct());
        let triple = regression::TRIPLE.apply(hitter.triple_pct(), pitcher.triple_pct());
        let hr = regression::HOME_RUN.apply(hitter.hr_pct(), pitcher.hr_pct());
        let hbp = regression::HIT_BY_PITCH.apply(hitter.hbp_pct(), pitcher.hbp_pct());

        let error = (1.0 - (k + bb + hbp)) * regression::ERROR_RATE_ON_BALLS_IN_PLAY;
        let out_in_play = 1.0 - (k + bb + single + double + triple + hr + hbp + error);

        Self {
            values: [k, bb, single, double, triple, hr, hbp, error, out_in_play],
        }
    }

    pub fn get(&self, event: EventCategory) -> f64 {
        self.values[event.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EventCategory, f64)> + '_ {
        EventCategory::ALL.into_iter().zip(self.values.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Expected runs created: probabilities dotted with the linear weights.
    pub fn expected_runs(&self) -> f64 {
        self.iter().map(|(event, p)| event.linear_weight() * p).sum()
    }

    /// Probability that the plate appearance records an out.
    pub fn out_probability(&self) -> f64 {
        self.iter()
            .filter(|(event, _)| event.is_out())
            .map(|(_, p)| p.max(0.0))
            .sum()
    }

    /// Categories whose derived probability is below zero.
    pub fn negative_events(&self) -> Vec<EventCategory> {
        self.iter()
            .filter(|(_, p)| *p < 0.0)
            .map(|(event, _)| event)
            .collect()
    }

    /// Draw one event, weighting by probability with negatives clamped to 0.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EventCategory, OutcomeError> {
        let degenerate = || OutcomeError::DegenerateDistribution {
            probabilities: self.values,
        };
        if self.values.iter().any(|p| !p.is_finite()) {
            return Err(degenerate());
        }
        let weights = self.values.map(|p| p.max(0.0));
        let index = WeightedIndex::new(weights).map_err(|_| degenerate())?;
        Ok(EventCategory::ALL[index.sample(rng)])
    }
}

/// A resolved plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateAppearance {
    pub event: EventCategory,
    pub expected_runs: f64,
}

/// Resolve one plate appearance between `hitter` and `pitcher`.
pub fn evaluate<R: Rng + ?Sized>(
    hitter: &RateProfile,
    pitcher: &RateProfile,
    rng: &mut R,
) -> Result<PlateAppearance, OutcomeError> {
    let probabilities = OutcomeProbabilities::derive(hitter, pitcher);
    let event = probabilities.draw(rng)?;
    Ok(PlateAppearance {
        event,
        expected_runs: probabilities.expected_runs(),
    })
}

/// One cell of the lineup-by-staff matchup table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matchup {
    pub slot: BattingSlot,
    pub role: PitcherRole,
    pub hitter: String,
    pub pitcher: String,
    pub probabilities: OutcomeProbabilities,
    pub expected_runs: f64,
}

/// Every (batting slot, pitcher role) pairing, slot-major.
pub fn matchup_table(staff: &PitchingStaff, lineup: &Lineup) -> Vec<Matchup> {
    lineup
        .iter()
        .flat_map(|(slot, hitter)| {
            staff.iter().map(move |(role, pitcher)| {
                let probabilities = OutcomeProbabilities::derive(&hitter.profile, &pitcher.profile);
                Matchup {
                    slot,
                    role,
                    hitter: hitter.name.clone(),
                    pitcher: pitcher.name.clone(),
                    expected_runs: probabilities.expected_runs(),
                    probabilities,
                }
            })
        })
        .collect()
}
