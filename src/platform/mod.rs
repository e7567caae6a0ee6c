//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (fixed-rate tick source and pacing)
//! - Input events (latest-event delivery)

pub mod input;
pub mod time;

pub use input::{InputEvent, InputLatch, InputSource};
pub use time::{FixedTicker, Pacer};
