//! Presentation boundary
//!
//! The core never draws. Each tick it builds a `Frame` of rectangles and
//! hands it, together with menu and game-over screens, to a `Presenter`
//! supplied by the host.

pub mod rect;

pub use rect::{RectInstance, colors};

use serde::Serialize;

use crate::sim::{RoundState, RoundSummary};

/// Everything needed to draw one in-round frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub score: u32,
    /// Avatar first, then bars in spawn order
    pub rects: Vec<RectInstance>,
}

impl Frame {
    /// Snapshot the drawable state of a round
    pub fn capture(state: &RoundState) -> Self {
        let mut rects = Vec::with_capacity(1 + state.obstacles.len());
        rects.push(RectInstance::from_aabb(
            &state.avatar.bounds(),
            colors::AVATAR,
        ));
        rects.extend(
            state
                .obstacles
                .segments()
                .iter()
                .map(|s| RectInstance::from_aabb(&s.bounds(), rect::bar_color(s.kind))),
        );
        Self {
            score: state.score,
            rects,
        }
    }

    pub fn avatar(&self) -> Option<&RectInstance> {
        self.rects.first()
    }

    pub fn bars(&self) -> &[RectInstance] {
        self.rects.get(1..).unwrap_or(&[])
    }

    /// Raw bytes for uploading as an instance buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.rects)
    }
}

/// Data for the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverScreen {
    pub summary: RoundSummary,
    pub high_score: u32,
    /// This round set the high score
    pub new_best: bool,
    pub rounds_played: usize,
}

/// Host-side drawing collaborator
pub trait Presenter {
    /// Title screen offering start or exit
    fn show_menu(&mut self);

    /// One in-round frame
    fn draw_frame(&mut self, frame: &Frame);

    /// Final score and high score, offering restart or exit
    fn show_game_over(&mut self, screen: &GameOverScreen);
}
