//! Domain types: rate profiles, event categories, rosters.

pub mod event;
pub mod profile;
pub mod roster;

pub use event::EventCategory;
pub use profile::{ProfileError, RateProfile, RateStat, RawRates};
pub use roster::{
    BattingSlot, Lineup, PitcherRole, PitchingStaff, Player, RosterError, RosterKind, LINEUP_SIZE,
    STAFF_SIZE,
};
