//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    Avatar, EndCause, ObstacleSet, RoundPhase, RoundState, RoundSummary, Segment, SegmentKind,
};
pub use tick::{Command, TickInput, TickOutcome, spawn_step, tick};
