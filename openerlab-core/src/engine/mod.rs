//! Game engine: per-game state, rotation policies, inning grids, and the
//! plate-appearance loop.

pub mod game;
pub mod grid;
pub mod rotation;
pub mod state;

pub use game::{
    simulate_game, stall_prone, GameError, GameOutcome, PitchingChange, MAX_PLATE_APPEARANCES,
};
pub use grid::{InningGrid, INNINGS};
pub use rotation::{OpenerFirst, PitcherRotation, StarterFirst, Strategy};
pub use state::{GameState, OUTS_PER_GAME, OUTS_PER_INNING};
