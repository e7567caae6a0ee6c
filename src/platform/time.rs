//! Tick sources
//!
//! `FixedTicker` turns variable frame times into whole simulation ticks.
//! `Pacer` throttles a blocking loop to a fixed inter-frame delay.

use std::time::{Duration, Instant};

use crate::consts::{FRAME_DELAY_MS, MAX_SUBSTEPS, SIM_DT};

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedTicker {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTicker {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_substeps,
        }
    }

    /// Add elapsed frame time. Returns how many ticks to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Long stalls (tab switch, debugger) are not replayed
        self.accumulator += frame_dt.min(self.dt * self.max_substeps as f32);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        steps
    }
}

/// Sleeps out the remainder of each frame period
#[derive(Debug, Clone)]
pub struct Pacer {
    period: Duration,
    last: Option<Instant>,
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(FRAME_DELAY_MS))
    }
}

impl Pacer {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// A pacer that never sleeps (headless fast-forward)
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until one period has passed since the previous call
    pub fn wait(&mut self) {
        if !self.period.is_zero() {
            if let Some(last) = self.last {
                let elapsed = last.elapsed();
                if elapsed < self.period {
                    std::thread::sleep(self.period - elapsed);
                }
            }
        }
        self.last = Some(Instant::now());
    }
}
