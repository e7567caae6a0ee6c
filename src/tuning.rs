//! Game tuning constants
//!
//! Every number the simulation depends on lives here so a round can be
//! replayed with a different feel. The defaults reproduce `consts` exactly.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning set cannot drive a round
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A size or cadence that must be strictly positive is not
    NonPositive(&'static str),
    /// The top-bar draw can leave no room for the gap plus a bottom bar
    GateDoesNotFit { max_top: f32, limit: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NonPositive(field) => write!(f, "{field} must be positive"),
            TuningError::GateDoesNotFit { max_top, limit } => write!(
                f,
                "top bar may reach {max_top} but must stay below {limit} to fit the gap"
            ),
        }
    }
}

impl std::error::Error for TuningError {}

/// Data-driven round constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Avatar ===
    pub avatar_width: f32,
    pub avatar_height: f32,
    pub avatar_start_x: f32,
    pub avatar_start_y: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity after a jump (negative is up)
    pub jump_impulse: f32,

    // === Gates ===
    pub bar_width: f32,
    /// Leftward distance per tick
    pub bar_speed: f32,
    pub gate_gap: f32,
    pub min_gate_margin: i32,

    // === Cadence ===
    pub spawn_cadence: u64,
    pub warmup_ticks: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            avatar_width: AVATAR_WIDTH,
            avatar_height: AVATAR_HEIGHT,
            avatar_start_x: AVATAR_START_X,
            avatar_start_y: AVATAR_START_Y,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            bar_width: BAR_WIDTH,
            bar_speed: BAR_SPEED,
            gate_gap: GATE_GAP,
            min_gate_margin: MIN_GATE_MARGIN,

            spawn_cadence: SPAWN_CADENCE,
            warmup_ticks: WARMUP_TICKS,
        }
    }
}

impl Tuning {
    /// Half-open range the top-bar height is drawn from
    pub fn top_height_range(&self) -> std::ops::Range<i32> {
        let low = self.min_gate_margin;
        let high = (self.playfield_height / 2.0) as i32 + self.min_gate_margin;
        low..high
    }

    /// Bars spawn flush with the right edge of the playfield
    pub fn spawn_x(&self) -> f32 {
        self.playfield_width - self.bar_width
    }

    /// Check that a round built from this tuning keeps its invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("avatar_width", self.avatar_width),
            ("avatar_height", self.avatar_height),
            ("bar_width", self.bar_width),
            ("gate_gap", self.gate_gap),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(TuningError::NonPositive(*field));
        }
        if self.spawn_cadence == 0 {
            return Err(TuningError::NonPositive("spawn_cadence"));
        }
        if self.min_gate_margin <= 0 {
            return Err(TuningError::NonPositive("min_gate_margin"));
        }

        // Largest drawable top height is one below the exclusive bound
        let max_top = (self.top_height_range().end - 1) as f32;
        let limit = self.playfield_height - self.gate_gap;
        if max_top >= limit {
            return Err(TuningError::GateDoesNotFit { max_top, limit });
        }
        Ok(())
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => match tuning.validate() {
                Ok(()) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Rejected tuning {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not parse tuning {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
