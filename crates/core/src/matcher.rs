//! Matcher module - combination detection and shape classification
//!
//! Detection looks outward from one origin cell along the four unit sides, at
//! most two cells per side, and keeps only the contiguous cells that share the
//! origin's color. An axis whose two arms hold fewer than two cells together
//! cannot form a line of three and is discarded.
//!
//! The surviving arms are classified by their total length into the shape that
//! decides exactly which cells are cleared:
//!
//! | Total | Condition | Cleared |
//! |-------|-----------|---------|
//! | 8 | - | every arm |
//! | 6-7 | horizontal = 4 | right + left, plus the strictly longer of up/down |
//! | 6-7 | otherwise | up + down, plus right only when left and right are equal |
//! | 4-5 | horizontal = 4 | right + left |
//! | 4-5 | vertical = 4 | up + down |
//! | 4 | two arms of 2 on each axis | every arm |
//! | 5 | otherwise | each arm holding exactly 2 |
//! | 2-3 | - | every arm |
//!
//! The two 6-7 rows are deliberately asymmetric; changing either one changes
//! which cells a player sees cleared.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::grid::Grid;
use crate::types::{Point, Side};

/// Same-colored cells found on one side of an origin (at most two)
pub type Arm = ArrayVec<Point, 2>;

/// De-duplicated set of cells slated for clearing
///
/// Keeps first-insertion order so results are stable for a given board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchSet {
    points: Vec<Point>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `p` unless already present; returns whether it was added
    pub fn insert(&mut self, p: Point) -> bool {
        if self.points.contains(&p) {
            return false;
        }
        self.points.push(p);
        true
    }

    /// Union `other` into this set, keeping this set's order first
    pub fn merge(&mut self, other: &MatchSet) {
        for &p in &other.points {
            self.insert(p);
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Leftmost and rightmost column touched, `None` when empty
    pub fn column_span(&self) -> Option<(i32, i32)> {
        let min = self.points.iter().map(|p| p.x).min()?;
        let max = self.points.iter().map(|p| p.x).max()?;
        Some((min, max))
    }

    /// Points sorted by (x, y), handy for order-independent comparisons
    pub fn sorted(&self) -> Vec<Point> {
        let mut points = self.points.clone();
        points.sort_unstable();
        points
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }
}

impl Extend<Point> for MatchSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

impl FromIterator<Point> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut set = MatchSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// The four arms found around one origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arms {
    pub up: Arm,
    pub down: Arm,
    pub left: Arm,
    pub right: Arm,
}

impl Arms {
    /// Scan all four sides of `origin` and drop any axis shorter than a line of three
    pub fn scan(grid: &Grid, origin: Point) -> Self {
        let mut arms = Arms {
            up: scan_direction(grid, origin, Side::Up),
            down: scan_direction(grid, origin, Side::Down),
            left: scan_direction(grid, origin, Side::Left),
            right: scan_direction(grid, origin, Side::Right),
        };

        if arms.vertical() < 2 {
            arms.up.clear();
            arms.down.clear();
        }
        if arms.horizontal() < 2 {
            arms.left.clear();
            arms.right.clear();
        }

        arms
    }

    pub fn vertical(&self) -> usize {
        self.up.len() + self.down.len()
    }

    pub fn horizontal(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn total(&self) -> usize {
        self.vertical() + self.horizontal()
    }
}

/// Which clearing shape the arms formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// Nothing to clear
    None,
    /// Two crossing lines of five
    Cross,
    /// A line of five with a branch on the other axis
    LineOfFiveBranch,
    /// A line of five only
    LineOfFive,
    /// Two arms of two meeting at the origin
    Corner,
    /// Mixed arms; only full-length arms are kept
    LongArms,
    /// A line of three or four
    Line,
}

/// Cells on one side of `origin` that share its color, stopping at the first break
pub fn scan_direction(grid: &Grid, origin: Point, side: Side) -> Arm {
    let mut arm = Arm::new();
    let first = origin.neighbor(side);
    if grid.same_color(origin, first) {
        arm.push(first);
        let second = origin.neighbor(side.doubled());
        if grid.same_color(origin, second) {
            arm.push(second);
        }
    }
    arm
}

/// Decide which arm cells are cleared, appending them to `out`
pub fn classify(arms: &Arms, out: &mut MatchSet) -> Shape {
    let Arms {
        up,
        down,
        left,
        right,
    } = arms;
    let sum = arms.total();
    let horizontal = arms.horizontal();
    let vertical = arms.vertical();

    match sum {
        8 => {
            out.extend(up.iter().chain(down).chain(left).chain(right).copied());
            Shape::Cross
        }
        6 | 7 => {
            if horizontal == 4 {
                out.extend(right.iter().chain(left).copied());
                if up.len() != down.len() {
                    let longer = if up.len() > down.len() { up } else { down };
                    out.extend(longer.iter().copied());
                }
            } else {
                out.extend(up.iter().chain(down).copied());
                if left.len() == right.len() {
                    out.extend(right.iter().copied());
                }
            }
            Shape::LineOfFiveBranch
        }
        4 | 5 => {
            if horizontal == 4 {
                out.extend(right.iter().chain(left).copied());
                return Shape::LineOfFive;
            }
            if vertical == 4 {
                out.extend(up.iter().chain(down).copied());
                return Shape::LineOfFive;
            }
            if sum == 4 {
                out.extend(up.iter().chain(down).chain(left).chain(right).copied());
                return Shape::Corner;
            }
            for arm in [up, down, left, right] {
                if arm.len() == 2 {
                    out.extend(arm.iter().copied());
                }
            }
            Shape::LongArms
        }
        2 | 3 => {
            out.extend(up.iter().chain(down).chain(left).chain(right).copied());
            Shape::Line
        }
        _ => Shape::None,
    }
}

/// Cells cleared by a combination centred on `origin`, origin included last
///
/// Empty when `origin` forms no line of three (or lies outside the grid).
pub fn check_for_combination(grid: &Grid, origin: Point) -> MatchSet {
    let mut out = MatchSet::new();
    if !grid.in_bounds(origin) {
        return out;
    }
    classify(&Arms::scan(grid, origin), &mut out);
    if !out.is_empty() {
        out.insert(origin);
    }
    out
}

/// Union of [`check_for_combination`] over every cell, x outer, y inner
pub fn check_full_board(grid: &Grid) -> MatchSet {
    let mut all = MatchSet::new();
    for p in grid.size().points() {
        all.merge(&check_for_combination(grid, p));
    }
    all
}
