//! Axis-aligned rectangle collision
//!
//! The one geometric primitive the game needs: everything on screen is an
//! axis-aligned rectangle, and every interaction is an overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Bottom-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Overlap test. Rectangles that merely share an edge do not collide.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.max().x
            && other.pos.x < self.max().x
            && self.pos.y < other.max().y
            && other.pos.y < self.max().y
    }

    /// Check if a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.max().x
            && point.y >= self.pos.y
            && point.y <= self.max().y
    }
}
