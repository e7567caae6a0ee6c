//! Axis-aligned box collision
//!
//! Everything in the playfield is a rectangle, so one overlap test covers
//! avatar vs. bar. Edges are closed: boxes that only touch still collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box with its top-left corner at `pos`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Closed-interval overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right() >= other.pos.x
            && self.pos.x <= other.right()
            && self.pos.y <= other.bottom()
            && self.bottom() >= other.pos.y
    }
}
