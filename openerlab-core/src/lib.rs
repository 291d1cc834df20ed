//! OpenerLab Core — rate profiles, outcome model, game engine.
//!
//! This crate contains the simulation itself, with no I/O:
//! - Domain types (rate profiles, event categories, lineups, pitching staffs)
//! - Plate-appearance outcome model (regressions, expected runs, weighted draw)
//! - Game loop driven to 27 outs with pluggable pitcher rotation policies
//! - Inning × batting-slot accumulators
//! - Deterministic per-trial RNG hierarchy

pub mod domain;
pub mod engine;
pub mod outcome;
pub mod rng;
