//! Plate-appearance event categories and their linear run weights.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the nine mutually exclusive plate-appearance outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "k")]
    Strikeout,
    #[serde(rename = "bb")]
    Walk,
    #[serde(rename = "1b")]
    Single,
    #[serde(rename = "2b")]
    Double,
    #[serde(rename = "3b")]
    Triple,
    #[serde(rename = "hr")]
    HomeRun,
    #[serde(rename = "hbp")]
    HitByPitch,
    #[serde(rename = "e")]
    Error,
    #[serde(rename = "oip")]
    OutInPlay,
}

impl EventCategory {
    /// All categories in canonical order. Probability vectors are indexed by
    /// position in this array.
    pub const ALL: [EventCategory; 9] = [
        EventCategory::Strikeout,
        EventCategory::Walk,
        EventCategory::Single,
        EventCategory::Double,
        EventCategory::Triple,
        EventCategory::HomeRun,
        EventCategory::HitByPitch,
        EventCategory::Error,
        EventCategory::OutInPlay,
    ];

    /// Linear run weight of this event.
    pub fn linear_weight(self) -> f64 {
        match self {
            EventCategory::Strikeout => -0.26,
            EventCategory::Walk => 0.29,
            EventCategory::Single => 0.44,
            EventCategory::Double => 0.74,
            EventCategory::Triple => 1.01,
            EventCategory::HomeRun => 1.39,
            EventCategory::HitByPitch => 0.31,
            EventCategory::Error => -0.26,
            EventCategory::OutInPlay => -0.26,
        }
    }

    /// Whether the event records an out.
    pub fn is_out(self) -> bool {
        matches!(self, EventCategory::Strikeout | EventCategory::OutInPlay)
    }

    /// Short code used in reports (`k`, `bb`, `1b`, ...).
    pub fn code(self) -> &'static str {
        match self {
            EventCategory::Strikeout => "k",
            EventCategory::Walk => "bb",
            EventCategory::Single => "1b",
            EventCategory::Double => "2b",
            EventCategory::Triple => "3b",
            EventCategory::HomeRun => "hr",
            EventCategory::HitByPitch => "hbp",
            EventCategory::Error => "e",
            EventCategory::OutInPlay => "oip",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
