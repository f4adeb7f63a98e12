//! Axis-aligned collision geometry
//!
//! Every entity is tested as a rectangle in screen space (y grows down).
//! Overlap is strict: rectangles that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Inclusive point containment (edges count as inside)
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// True if the vertical span [top, bottom] comes within `margin` of `other`'s
    pub fn vertically_near(&self, other: &Rect, margin: f32) -> bool {
        self.top() < other.bottom() + margin && self.bottom() > other.top() - margin
    }
}

/// Heading of ships and torpedoes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit vector in screen space
    pub fn to_vec(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Check whether a rectangle has completely left `bounds` through the edge
/// it is travelling toward
pub fn has_exited(rect: &Rect, direction: Direction, bounds: &Rect) -> bool {
    match direction {
        Direction::Up => rect.bottom() <= bounds.top(),
        Direction::Right => rect.left() >= bounds.right(),
        Direction::Down => rect.top() >= bounds.bottom(),
        Direction::Left => rect.right() <= bounds.left(),
    }
}

/// Check whether a travelling rectangle's centre has crossed the screen
/// midline perpendicular to its heading
pub fn has_crossed_midline(center: Vec2, direction: Direction, bounds: &Rect) -> bool {
    let mid = bounds.center();
    match direction {
        Direction::Right => center.x > mid.x,
        Direction::Left => center.x < mid.x,
        Direction::Down => center.y > mid.y,
        Direction::Up => center.y < mid.y,
    }
}
