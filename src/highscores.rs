//! High score tracking
//!
//! Lives only as long as the process. The session owns one and hands it to
//! round-end handling; nothing is written to disk.

use serde::{Deserialize, Serialize};

use crate::sim::RoundSummary;

/// A finished round as remembered by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u32,
    /// Frames survived
    pub frames: u64,
}

/// Best score of the process plus the rounds that led to it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u32,
    runs: Vec<RunRecord>,
}

impl HighScore {
    /// Start at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Rounds that reached game over (aborted rounds are not recorded)
    pub fn rounds_played(&self) -> usize {
        self.runs.len()
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Check if a score would raise the best
    pub fn beats(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished round. Returns true if it set a new best.
    pub fn record(&mut self, summary: &RoundSummary) -> bool {
        self.runs.push(RunRecord {
            score: summary.score,
            frames: summary.frames,
        });

        if self.beats(summary.score) {
            log::info!("New high score: {} (was {})", summary.score, self.best);
            self.best = summary.score;
            true
        } else {
            false
        }
    }
}
