//! Rosters keyed by explicit batting slot and pitcher role.
//!
//! Input rows carry an `order` column. Rosters are built from `(order, player)`
//! pairs and validated here, so the engine indexes by slot/role and never relies
//! on the row order of the source table.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::profile::RateProfile;

/// Number of hitters in a lineup.
pub const LINEUP_SIZE: usize = 9;

/// Number of pitcher roles in a staff.
pub const STAFF_SIZE: usize = 3;

/// Errors from roster construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("{kind} roster needs exactly {expected} rows, got {actual}")]
    WrongSize {
        kind: RosterKind,
        expected: usize,
        actual: usize,
    },

    #[error("{kind} order {order} is out of range 1..={max}")]
    OrderOutOfRange { kind: RosterKind, order: i64, max: usize },

    #[error("{kind} order {order} appears more than once")]
    DuplicateOrder { kind: RosterKind, order: i64 },
}

/// Which roster a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKind {
    Lineup,
    Staff,
}

impl fmt::Display for RosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterKind::Lineup => f.write_str("lineup"),
            RosterKind::Staff => f.write_str("pitching staff"),
        }
    }
}

/// A named rate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub profile: RateProfile,
}

impl Player {
    pub fn new(name: impl Into<String>, profile: RateProfile) -> Self {
        Self {
            name: name.into(),
            profile,
        }
    }
}

/// Position in the batting order, 1 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattingSlot(u8);

impl BattingSlot {
    pub const FIRST: BattingSlot = BattingSlot(1);
    pub const LAST: BattingSlot = BattingSlot(LINEUP_SIZE as u8);

    pub fn new(slot: u8) -> Option<Self> {
        (1..=LINEUP_SIZE as u8).contains(&slot).then_some(Self(slot))
    }

    /// The slot that bats after this one (9 wraps to 1).
    pub fn next(self) -> Self {
        Self(self.0 % LINEUP_SIZE as u8 + 1)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index for array access.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn all() -> impl Iterator<Item = BattingSlot> {
        (1..=LINEUP_SIZE as u8).map(BattingSlot)
    }
}

impl fmt::Display for BattingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pitching role. The discriminant is the `order` value in staff files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitcherRole {
    Opener = 1,
    Starter = 2,
    Bullpen = 3,
}

impl PitcherRole {
    pub const ALL: [PitcherRole; STAFF_SIZE] =
        [PitcherRole::Opener, PitcherRole::Starter, PitcherRole::Bullpen];

    pub fn from_order(order: i64) -> Option<Self> {
        match order {
            1 => Some(PitcherRole::Opener),
            2 => Some(PitcherRole::Starter),
            3 => Some(PitcherRole::Bullpen),
            _ => None,
        }
    }

    pub fn order(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize - 1
    }
}

impl fmt::Display for PitcherRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitcherRole::Opener => f.write_str("opener"),
            PitcherRole::Starter => f.write_str("starter"),
            PitcherRole::Bullpen => f.write_str("bullpen"),
        }
    }
}

/// Nine hitters keyed by batting slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    hitters: [Player; LINEUP_SIZE],
}

impl Lineup {
    pub fn new(hitters: [Player; LINEUP_SIZE]) -> Self {
        Self { hitters }
    }

    /// Build a lineup from `(order, player)` rows. Each order 1..=9 must appear
    /// exactly once.
    pub fn from_ordered(rows: Vec<(i64, Player)>) -> Result<Self, RosterError> {
        let hitters = place_by_order::<LINEUP_SIZE>(rows, RosterKind::Lineup)?;
        Ok(Self { hitters })
    }

    pub fn hitter(&self, slot: BattingSlot) -> &Player {
        &self.hitters[slot.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BattingSlot, &Player)> {
        BattingSlot::all().zip(self.hitters.iter())
    }
}

/// Opener, starter and bullpen keyed by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchingStaff {
    pitchers: [Player; STAFF_SIZE],
}

impl PitchingStaff {
    pub fn new(opener: Player, starter: Player, bullpen: Player) -> Self {
        Self {
            pitchers: [opener, starter, bullpen],
        }
    }

    /// Build a staff from `(order, player)` rows where order 1 = opener,
    /// 2 = starter, 3 = bullpen.
    pub fn from_ordered(rows: Vec<(i64, Player)>) -> Result<Self, RosterError> {
        let pitchers = place_by_order::<STAFF_SIZE>(rows, RosterKind::Staff)?;
        Ok(Self { pitchers })
    }

    pub fn pitcher(&self, role: PitcherRole) -> &Player {
        &self.pitchers[role.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PitcherRole, &Player)> {
        PitcherRole::ALL.into_iter().zip(self.pitchers.iter())
    }
}

fn place_by_order<const N: usize>(
    rows: Vec<(i64, Player)>,
    kind: RosterKind,
) -> Result<[Player; N], RosterError> {
    if rows.len() != N {
        return Err(RosterError::WrongSize {
            kind,
            expected: N,
            actual: rows.len(),
        });
    }

    let mut placed: [Option<Player>; N] = std::array::from_fn(|_| None);
    for (order, player) in rows {
        if order < 1 || order > N as i64 {
            return Err(RosterError::OrderOutOfRange { kind, order, max: N });
        }
        let cell = &mut placed[(order - 1) as usize];
        if cell.is_some() {
            return Err(RosterError::DuplicateOrder { kind, order });
        }
        *cell = Some(player);
    }

    let players: Vec<Player> = placed.into_iter().flatten().collect();
    players
        .try_into()
        .map_err(|short: Vec<Player>| RosterError::WrongSize {
            kind,
            expected: N,
            actual: short.len(),
        })
}
