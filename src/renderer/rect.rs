//! Rectangle instances for 2D drawing

use bytemuck::{Pod, Zeroable};

use crate::sim::{Aabb, SegmentKind};

/// One filled rectangle in playfield pixels (origin top-left)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    /// x, y, width, height
    pub rect: [f32; 4],
    pub color: [f32; 4],
}

impl RectInstance {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Self {
        Self {
            rect: [x, y, w, h],
            color,
        }
    }

    pub fn from_aabb(aabb: &Aabb, color: [f32; 4]) -> Self {
        Self::new(aabb.pos.x, aabb.pos.y, aabb.size.x, aabb.size.y, color)
    }

    pub fn x(&self) -> f32 {
        self.rect[0]
    }

    pub fn y(&self) -> f32 {
        self.rect[1]
    }

    pub fn width(&self) -> f32 {
        self.rect[2]
    }

    pub fn height(&self) -> f32 {
        self.rect[3]
    }
}

/// Colors for game elements
pub mod colors {
    pub const AVATAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BAR_TOP: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BAR_BOTTOM: [f32; 4] = [0.0, 0.85, 0.0, 1.0];
}

pub fn bar_color(kind: SegmentKind) -> [f32; 4] {
    match kind {
        SegmentKind::Top => colors::BAR_TOP,
        SegmentKind::Bottom => colors::BAR_BOTTOM,
    }
}
