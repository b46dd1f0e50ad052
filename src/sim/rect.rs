//! Axis-aligned rectangle geometry for entity boxes
//!
//! Every gameplay entity is a box anchored at its top-left corner:
//! - pos: top-left corner in arena pixels (y grows downward)
//! - size: width and height

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in arena space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Box spanning `min..max`
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            pos: min,
            size: max - min,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap test. Boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// Whether a point lies inside the box, edges included
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.pos.x && p.x <= self.pos.x + self.size.x && p.y >= self.pos.y && p.y <= self.pos.y + self.size.y
    }

    /// Grow the box by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect {
            pos: self.pos - Vec2::splat(margin),
            size: self.size + Vec2::splat(margin * 2.0),
        }
    }

    /// Clamp a top-left position so a box of `size` stays inside this one
    pub fn clamp_box(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let max = (self.max() - size).max(self.pos);
        pos.clamp(self.pos, max)
    }
}

/// Anything with a collision box
pub trait Boxed {
    fn rect(&self) -> Rect;
}

impl Boxed for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}
