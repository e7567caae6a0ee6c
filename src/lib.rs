//! Flappy Gates - a side-scrolling gate-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar physics, gates, collisions, scoring)
//! - `session`: Menu / round / game-over shell that owns the high score
//! - `platform`: Tick pacing and input delivery
//! - `renderer`: Draw-list types handed to the presentation layer
//! - `tuning`: Data-driven game constants

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::{Flow, Screen, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal inter-frame delay in milliseconds (~60 Hz)
    pub const FRAME_DELAY_MS: u64 = 16;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (origin top-left, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 1500.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Avatar box and spawn point
    pub const AVATAR_WIDTH: f32 = 50.0;
    pub const AVATAR_HEIGHT: f32 = 30.0;
    pub const AVATAR_START_X: f32 = PLAYFIELD_WIDTH / 4.0;
    pub const AVATAR_START_Y: f32 = PLAYFIELD_HEIGHT / 2.0;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -9.0;

    /// Gate bars
    pub const BAR_WIDTH: f32 = 30.0;
    pub const BAR_SPEED: f32 = 6.0;
    /// Vertical opening between a gate's top and bottom bars
    pub const GATE_GAP: f32 = 150.0;
    /// Smallest top-bar height; also offsets the upper bound of the draw
    pub const MIN_GATE_MARGIN: i32 = 50;

    /// Ticks between gate spawns
    pub const SPAWN_CADENCE: u64 = 60;
    /// Gates spawned at or before this frame award nothing
    pub const WARMUP_TICKS: u64 = 120;
}
