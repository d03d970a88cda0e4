use core::ops::Sub;

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate. `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point2i {
    type Output = (i32, i32);

    fn sub(self, rhs: Point2i) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned pixel rectangle, `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> usize {
        self.x + self.width
    }

    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Column test only; rows are ignored.
    pub fn contains_x(&self, x: i32) -> bool {
        x >= 0 && (x as usize) >= self.x && (x as usize) < self.right()
    }

    pub fn contains(&self, p: Point2i) -> bool {
        self.contains_x(p.x)
            && p.y >= 0
            && (p.y as usize) >= self.y
            && (p.y as usize) < self.bottom()
    }

    /// Offset of `p` relative to the rectangle origin, if `p` lies inside.
    pub fn local(&self, p: Point2i) -> Option<(usize, usize)> {
        self.contains(p)
            .then(|| (p.x as usize - self.x, p.y as usize - self.y))
    }
}

/// Closed boundary polygon; the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    pub points: Vec<Point2i>,
}

impl Polygon {
    pub fn new(points: Vec<Point2i>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<Point2i> {
        self.points.get(i).copied()
    }

    pub fn as_slice(&self) -> &[Point2i] {
        &self.points
    }
}

impl From<Vec<Point2i>> for Polygon {
    fn from(points: Vec<Point2i>) -> Self {
        Self { points }
    }
}
