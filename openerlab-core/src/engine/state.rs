//! Mutable per-game state.

use serde::{Deserialize, Serialize};

use crate::domain::{BattingSlot, PitcherRole};

/// Outs in a regulation nine-inning game.
pub const OUTS_PER_GAME: u8 = 27;

/// Outs per inning.
pub const OUTS_PER_INNING: u8 = 3;

/// State that evolves plate appearance by plate appearance within one game.
///
/// Created at first pitch and dropped when the game ends; never shared
/// between games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    outs: u8,
    plate_appearances: u32,
    slot: BattingSlot,
    pitcher: PitcherRole,
    /// Outs recorded when the most recent pitching change happened.
    last_change_outs: Option<u8>,
}

impl GameState {
    /// Fresh state before the first plate appearance. The batting slot sits
    /// at 9 so that the first advance brings up the leadoff hitter.
    pub fn new(starting_pitcher: PitcherRole) -> Self {
        Self {
            outs: 0,
            plate_appearances: 0,
            slot: BattingSlot::LAST,
            pitcher: starting_pitcher,
            last_change_outs: None,
        }
    }

    pub fn outs(&self) -> u8 {
        self.outs
    }

    pub fn plate_appearances(&self) -> u32 {
        self.plate_appearances
    }

    pub fn slot(&self) -> BattingSlot {
        self.slot
    }

    pub fn pitcher(&self) -> PitcherRole {
        self.pitcher
    }

    pub fn last_change_outs(&self) -> Option<u8> {
        self.last_change_outs
    }

    /// Current inning, 1-based, derived from the out count.
    pub fn inning(&self) -> usize {
        (self.outs / OUTS_PER_INNING) as usize + 1
    }

    pub fn is_over(&self) -> bool {
        self.outs >= OUTS_PER_GAME
    }

    /// Count a new plate appearance and bring up the next hitter.
    pub fn advance_batter(&mut self) {
        self.plate_appearances += 1;
        self.slot = self.slot.next();
    }

    pub fn record_out(&mut self) {
        self.outs += 1;
    }

    pub fn change_pitcher(&mut self, role: PitcherRole) {
        self.pitcher = role;
        self.last_change_outs = Some(self.outs);
    }
}
