//! Pitcher rotation policies.
//!
//! A policy decides, before each plate appearance, which role should be on the
//! mound. The simulator applies whatever role the policy returns and records
//! the change; it never branches on which policy is active.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::PitcherRole;

use super::state::GameState;

/// Decides which pitcher faces the next hitter.
pub trait PitcherRotation: Send + Sync {
    /// Human-readable name (e.g., "opener_first").
    fn name(&self) -> &str;

    /// Role on the mound for the first plate appearance.
    fn starting_pitcher(&self) -> PitcherRole;

    /// Role that should face the hitter now coming up. Called after the plate
    /// appearance has been counted and before it is resolved.
    fn next_pitcher(&self, state: &GameState) -> PitcherRole;
}

/// Opener pitches the first inning, the starter bridges the middle innings,
/// then the bullpen finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenerFirst {
    /// Outs the opener records before the bridge enters.
    pub opener_outs: u8,
    /// Plate appearances after which the bridge gives way to the bullpen.
    pub bridge_exit_after: u32,
}

impl Default for OpenerFirst {
    fn default() -> Self {
        Self {
            opener_outs: 3,
            bridge_exit_after: 27,
        }
    }
}

impl PitcherRotation for OpenerFirst {
    fn name(&self) -> &str {
        "opener_first"
    }

    fn starting_pitcher(&self) -> PitcherRole {
        PitcherRole::Opener
    }

    fn next_pitcher(&self, state: &GameState) -> PitcherRole {
        let mut role = state.pitcher();
        if role == PitcherRole::Opener && state.outs() == self.opener_outs {
            role = PitcherRole::Starter;
        }
        if role == PitcherRole::Starter && state.plate_appearances() > self.bridge_exit_after {
            role = PitcherRole::Bullpen;
        }
        role
    }
}

/// Starter goes through the order roughly three times, the opener relieves
/// for a fixed number of outs, then the bullpen finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterFirst {
    /// Plate appearances after which the starter is relieved.
    pub starter_exit_after: u32,
    /// Outs the reliever records before the bullpen enters.
    pub relief_outs: u8,
}

impl Default for StarterFirst {
    fn default() -> Self {
        Self {
            starter_exit_after: 24,
            relief_outs: 3,
        }
    }
}

impl PitcherRotation for StarterFirst {
    fn name(&self) -> &str {
        "starter_first"
    }

    fn starting_pitcher(&self) -> PitcherRole {
        PitcherRole::Starter
    }

    fn next_pitcher(&self, state: &GameState) -> PitcherRole {
        match state.pitcher() {
            PitcherRole::Starter if state.plate_appearances() > self.starter_exit_after => {
                PitcherRole::Opener
            }
            PitcherRole::Opener
                if state
                    .last_change_outs()
                    .and_then(|outs| outs.checked_add(self.relief_outs))
                    == Some(state.outs()) =>
            {
                PitcherRole::Bullpen
            }
            role => role,
        }
    }
}

/// Pitching-usage strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    OpenerFirst,
    StarterFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::OpenerFirst, Strategy::StarterFirst];

    /// The rotation policy for this strategy with its standard thresholds.
    pub fn rotation(self) -> Box<dyn PitcherRotation> {
        match self {
            Strategy::OpenerFirst => Box::new(OpenerFirst::default()),
            Strategy::StarterFirst => Box::new(StarterFirst::default()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::OpenerFirst => "opener_first",
            Strategy::StarterFirst => "starter_first",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive a state to the given counters, keeping `pitcher` on the mound.
    fn state_at(pitcher: PitcherRole, outs: u8, plate_appearances: u32) -> GameState {
        let mut state = GameState::new(pitcher);
        for _ in 0..plate_appearances {
            state.advance_batter();
        }
        for _ in 0..outs {
            state.record_out();
        }
        state
    }

    #[test]
    fn opener_stays_through_two_outs() {
        let policy = OpenerFirst::default();
        let state = state_at(PitcherRole::Opener, 2, 5);
        assert_eq!(policy.next_pitcher(&state), PitcherRole::Opener);
    }

    #[test]
    fn opener_hands_off_at_third_out() {
        let policy = OpenerFirst::default();
        let state = state_at(PitcherRole::Opener, 3, 6);
        assert_eq!(policy.next_pitcher(&state), PitcherRole::Starter);
    }

    #[test]
    fn bridge_exits_after_twenty_seventh_batter() {
        let policy = OpenerFirst::default();
        assert_eq!(
            policy.next_pitcher(&state_at(PitcherRole::Starter, 15, 27)),
            PitcherRole::Starter
        );
        assert_eq!(
            policy.next_pitcher(&state_at(PitcherRole::Starter, 15, 28)),
            PitcherRole::Bullpen
        );
    }

    #[test]
    fn opener_first_both_changes_in_one_step() {
        let policy = OpenerFirst::default();
        let state = state_at(PitcherRole::Opener, 3, 30);
        assert_eq!(policy.next_pitcher(&state), PitcherRole::Bullpen);
    }

    #[test]
    fn starter_relieved_after_twenty_fourth_batter() {
        let policy = StarterFirst::default();
        assert_eq!(
            policy.next_pitcher(&state_at(PitcherRole::Starter, 16, 24)),
            PitcherRole::Starter
        );
        assert_eq!(
            policy.next_pitcher(&state_at(PitcherRole::Starter, 16, 25)),
            PitcherRole::Opener
        );
    }

    #[test]
    fn reliever_exits_three_outs_after_entering() {
        let policy = StarterFirst::default();
        let mut state = state_at(PitcherRole::Starter, 16, 25);
        state.change_pitcher(PitcherRole::Opener);

        state.record_out();
        state.record_out();
        assert_eq!(policy.next_pitcher(&state), PitcherRole::Opener);

        state.record_out();
        assert_eq!(policy.next_pitcher(&state), PitcherRole::Bullpen);
    }

    #[test]
    fn oversized_relief_window_keeps_reliever_in() {
        let policy = StarterFirst {
            starter_exit_after: 24,
            relief_outs: 250,
        };
        let mut state = state_at(PitcherRole::Starter, 10, 25);
        state.change_pitcher(PitcherRole::Opener);
        for _ in 0..17 {
            state.record_out();
        }
        assert_eq!(policy.next_pitcher(&state), PitcherRole::Opener);
    }

    #[test]
    fn bullpen_is_terminal() {
        let opener_first = OpenerFirst::default();
        let starter_first = StarterFirst::default();
        let state = state_at(PitcherRole::Bullpen, 3, 40);
        assert_eq!(opener_first.next_pitcher(&state), PitcherRole::Bullpen);
        assert_eq!(starter_first.next_pitcher(&state), PitcherRole::Bullpen);
    }

    #[test]
    fn strategy_selects_starting_role() {
        assert_eq!(
            Strategy::OpenerFirst.rotation().starting_pitcher(),
            PitcherRole::Opener
        );
        assert_eq!(
            Strategy::StarterFirst.rotation().starting_pitcher(),
            PitcherRole::Starter
        );
        assert_eq!(Strategy::StarterFirst.rotation().name(), "starter_first");
    }
}
