//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the match-3 workspace.
//! All types are plain data with no behaviour beyond geometry, making them usable
//! in any context (grid logic, engine, headless simulation, an external renderer).
//!
//! # Coordinates
//!
//! - **x** grows to the right, columns `0..width`
//! - **y** grows upwards, rows `0..height`; row `0` is the bottom row
//! - Tiles fall towards `y = 0`, fresh tiles enter at `y = height - 1`
//!
//! # Colors
//!
//! A [`Color`] is a small integer in `1..=num_colors`. [`EMPTY`] (`0`) only
//! appears transiently while a resolve step clears and collapses cells.
//!
//! # Limits
//!
//! | Constant | Value | Enforced by |
//! |----------|-------|-------------|
//! | `MIN_GRID_SIDE` | 4 | engine (`InvalidConfiguration`) |
//! | `MIN_COLORS` | 3 | engine (`InvalidConfiguration`) |
//! | `MAX_RECOMMENDED_SIDE` | 30 | callers only |
//! | `MAX_RECOMMENDED_COLORS` | 10 | callers only |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Point, Side};
//!
//! let p = Point::new(2, 3);
//! assert_eq!(p.neighbor(Side::Up), Point::new(2, 4));
//! assert_eq!(p.neighbor(Side::DoubleLeft), Point::new(0, 3));
//!
//! // The side that leads from one point to another
//! assert_eq!(Side::between(p, Point::new(3, 3)), Some(Side::Right));
//! assert_eq!(Side::between(p, Point::new(3, 4)), None);
//! ```

use serde::{Deserialize, Serialize};

/// Tile color. `0` is [`EMPTY`], real colors are `1..=num_colors`.
pub type Color = u8;

/// Transient "no tile" marker used during clear/fall processing.
pub const EMPTY: Color = 0;

/// Smallest accepted width or height.
pub const MIN_GRID_SIDE: u16 = 4;

/// Smallest accepted palette size.
pub const MIN_COLORS: u8 = 3;

/// Largest width/height the settings screen accepts. Not enforced by the engine.
pub const MAX_RECOMMENDED_SIDE: u16 = 30;

/// Largest palette the settings screen accepts. Not enforced by the engine.
pub const MAX_RECOMMENDED_COLORS: u8 = 10;

/// A cell coordinate.
///
/// Signed so that neighbor offsets may step outside the grid; validity is
/// decided by [`GridSize::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Point shifted by `(dx, dy)`, saturating at the `i32` limits
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Point on the given side of this one
    pub fn neighbor(self, side: Side) -> Self {
        let (dx, dy) = side.delta();
        self.offset(dx, dy)
    }

    pub fn up(self) -> Self {
        self.neighbor(Side::Up)
    }

    pub fn down(self) -> Self {
        self.neighbor(Side::Down)
    }

    pub fn left(self) -> Self {
        self.neighbor(Side::Left)
    }

    pub fn right(self) -> Self {
        self.neighbor(Side::Right)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight directional offsets
///
/// Four unit steps plus four double steps along the same axis. Double steps are
/// geometry helpers for match scanning; gameplay only swaps along unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Up,
    DoubleUp,
    Right,
    DoubleRight,
    Down,
    DoubleDown,
    Left,
    DoubleLeft,
}

impl Side {
    /// All eight sides
    pub const ALL: [Side; 8] = [
        Side::Up,
        Side::DoubleUp,
        Side::Right,
        Side::DoubleRight,
        Side::Down,
        Side::DoubleDown,
        Side::Left,
        Side::DoubleLeft,
    ];

    /// The four unit sides a player can swap towards
    pub const UNIT: [Side; 4] = [Side::Up, Side::Down, Side::Right, Side::Left];

    /// `(dx, dy)` for this side
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Side::Up => (0, 1),
            Side::DoubleUp => (0, 2),
            Side::Right => (1, 0),
            Side::DoubleRight => (2, 0),
            Side::Down => (0, -1),
            Side::DoubleDown => (0, -2),
            Side::Left => (-1, 0),
            Side::DoubleLeft => (-2, 0),
        }
    }

    pub const fn is_double(self) -> bool {
        matches!(
            self,
            Side::DoubleUp | Side::DoubleRight | Side::DoubleDown | Side::DoubleLeft
        )
    }

    /// Double step along the same axis (double sides map to themselves)
    pub const fn doubled(self) -> Self {
        match self {
            Side::Up | Side::DoubleUp => Side::DoubleUp,
            Side::Right | Side::DoubleRight => Side::DoubleRight,
            Side::Down | Side::DoubleDown => Side::DoubleDown,
            Side::Left | Side::DoubleLeft => Side::DoubleLeft,
        }
    }

    /// Side leading from `from` to `to`, if `to` is one of the eight offsets
    pub fn between(from: Point, to: Point) -> Option<Side> {
        let delta = (to.x.checked_sub(from.x)?, to.y.checked_sub(from.y)?);
        Side::ALL.into_iter().find(|side| side.delta() == delta)
    }

    /// Parse side from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::Side;
    ///
    /// assert_eq!(Side::from_str("up"), Some(Side::Up));
    /// assert_eq!(Side::from_str("L"), Some(Side::Left));
    /// assert_eq!(Side::from_str("doubleDown"), Some(Side::DoubleDown));
    /// assert_eq!(Side::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Side::Up),
            "doubleup" => Some(Side::DoubleUp),
            "right" | "r" => Some(Side::Right),
            "doubleright" => Some(Side::DoubleRight),
            "down" | "d" => Some(Side::Down),
            "doubledown" => Some(Side::DoubleDown),
            "left" | "l" => Some(Side::Left),
            "doubleleft" => Some(Side::DoubleLeft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Up => "up",
            Side::DoubleUp => "doubleUp",
            Side::Right => "right",
            Side::DoubleRight => "doubleRight",
            Side::Down => "down",
            Side::DoubleDown => "doubleDown",
            Side::Left => "left",
            Side::DoubleLeft => "doubleLeft",
        }
    }
}

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Total number of cells
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `p` lies inside `0..width` x `0..height`
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < i32::from(self.width) && p.y >= 0 && p.y < i32::from(self.height)
    }

    /// Row-major flat index (`y * width + x`), `None` when out of bounds
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Every coordinate in scan order: x outer, y inner.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (w, h) = (i32::from(self.width), i32::from(self.height));
        (0..w).flat_map(move |x| (0..h).map(move |y| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_match_settings_screen() {
        assert_eq!(MIN_GRID_SIDE, 4);
        assert_eq!(MIN_COLORS, 3);
        assert_eq!(MAX_RECOMMENDED_SIDE, 30);
        assert_eq!(MAX_RECOMMENDED_COLORS, 10);
    }

    #[test]
    fn test_double_sides_are_twice_the_unit_step() {
        let pairs = [
            (Side::Up, Side::DoubleUp),
            (Side::Right, Side::DoubleRight),
            (Side::Down, Side::DoubleDown),
            (Side::Left, Side::DoubleLeft),
        ];
        for (unit, double) in pairs {
            let (ux, uy) = unit.delta();
            assert_eq!(double.delta(), (ux * 2, uy * 2));
            assert!(!unit.is_double());
            assert!(double.is_double());
        }
    }

    #[test]
    fn test_between_finds_all_eight_offsets() {
        let origin = Point::new(5, 5);
        for side in Side::ALL {
            assert_eq!(Side::between(origin, origin.neighbor(side)), Some(side));
        }
        assert_eq!(Side::between(origin, origin), None);
        assert_eq!(Side::between(origin, Point::new(8, 5)), None);
    }

    #[test]
    fn test_offsets_saturate_at_extremes() {
        let far = Point::new(i32::MAX, i32::MIN);
        assert_eq!(far.right(), far);
        assert_eq!(far.down(), far);
        assert_eq!(far.neighbor(Side::DoubleLeft), Point::new(i32::MAX - 2, i32::MIN));
        assert_eq!(Side::between(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0)), None);
        assert!(!GridSize::new(30, 30).contains(far.right()));
    }

    #[test]
    fn test_side_string_roundtrip() {
        for side in Side::ALL {
            assert_eq!(Side::from_str(side.as_str()), Some(side));
        }
    }

    #[test]
    fn test_grid_size_index_and_bounds() {
        let size = GridSize::new(4, 5);
        assert_eq!(size.area(), 20);
        assert_eq!(size.index(Point::new(0, 0)), Some(0));
        assert_eq!(size.index(Point::new(3, 0)), Some(3));
        assert_eq!(size.index(Point::new(0, 1)), Some(4));
        assert_eq!(size.index(Point::new(3, 4)), Some(19));
        assert_eq!(size.index(Point::new(-1, 0)), None);
        assert_eq!(size.index(Point::new(4, 0)), None);
        assert_eq!(size.index(Point::new(0, 5)), None);
    }

    #[test]
    fn test_points_scan_x_outer_y_inner() {
        let size = GridSize::new(4, 4);
        let points: Vec<Point> = size.points().take(5).collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(0, 3),
                Point::new(1, 0),
            ]
        );
        assert_eq!(size.points().count(), 16);
    }
}
