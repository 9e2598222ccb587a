use super::{Margins, Vec2};

/// Axis-aligned rectangle, position + size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rect at the origin with the given size.
    #[inline]
    pub const fn from_size(w: f64, h: f64) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Half-open containment: the right and bottom edges are outside.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Shrink by per-edge margins. Degenerate results collapse to zero size.
    pub fn inset(&self, m: Margins) -> Rect {
        Rect {
            x: self.x + m.left,
            y: self.y + m.top,
            w: (self.w - m.horizontal()).max(0.0),
            h: (self.h - m.vertical()).max(0.0),
        }
    }

    #[inline]
    pub fn translate(&self, d: Vec2) -> Rect {
        Rect { x: self.x + d.x, y: self.y + d.y, ..*self }
    }
}
