//! Geometry type definitions

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Integer width × height.
///
/// Negative extents are clamped to zero on construction, so `width()` and
/// `height()` are always `>= 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Creates a size, clamping negative extents to zero.
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// True when either extent is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of texels covered, widened so it cannot overflow.
    #[inline]
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Integer 2D offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Vector2d {
    pub x: i32,
    pub y: i32,
}

impl Vector2d {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vector2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.x, self.y)
    }
}

/// Axis-aligned integer rectangle covering `[x, right) × [y, bottom)`.
///
/// Width and height are never negative. A rectangle with a zero extent is
/// empty and intersects nothing, including itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Creates a rectangle, clamping negative extents to zero.
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Rectangle at the origin with the given size.
    #[inline]
    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width(), size.height())
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the overlap of two rectangles.
    ///
    /// Disjoint or empty inputs produce `Rect::default()`.
    pub fn intersection(&self, other: &Rect) -> Rect {
        if self.is_empty() || other.is_empty() {
            return Rect::default();
        }

        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left >= right || top >= bottom {
            return Rect::default();
        }

        Rect::new(left, top, right - left, bottom - top)
    }

    /// True when the rectangles share at least one texel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.is_empty()
            || other.is_empty()
            || other.x >= self.right()
            || other.right() <= self.x
            || other.y >= self.bottom()
            || other.bottom() <= self.y)
    }

    /// Smallest rectangle containing both inputs. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// True when `other` is non-empty and lies entirely within `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_empty()
            && other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }
}

impl From<Size> for Rect {
    fn from(size: Size) -> Self {
        Rect::from_size(size)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Column/row address of one tile in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileIndex {
    /// Column, 0 at the left edge
    pub x: i32,
    /// Row, 0 at the top edge
    pub y: i32,
}

impl TileIndex {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<TileIndex> for (i32, i32) {
    fn from(index: TileIndex) -> Self {
        (index.x, index.y)
    }
}

impl From<(i32, i32)> for TileIndex {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Errors that can occur when parsing geometry from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseGeometryError {
    /// Input was empty or whitespace only
    #[error("Empty geometry value")]
    Empty,

    /// Expected separator was not found
    #[error("Invalid geometry '{input}': expected {expected}")]
    Malformed { input: String, expected: &'static str },

    /// A component was not a valid integer
    #[error("Invalid geometry '{input}': '{component}' is not an integer")]
    InvalidNumber { input: String, component: String },

    /// Width or height was negative
    #[error("Invalid geometry '{input}': width and height must not be negative")]
    NegativeExtent { input: String },
}
