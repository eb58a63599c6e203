//! Color generator - constraint-respecting fill
//!
//! Picks a color for one cell so that, given the neighbours already placed, the
//! new tile does not complete a line of three. Six neighbour pairs are checked:
//!
//! | Pair | Forbids |
//! |------|---------|
//! | up, down | the color the cell would bridge vertically |
//! | right, left | the color the cell would bridge horizontally |
//! | up, double up | extending a vertical pair above |
//! | right, double right | extending a horizontal pair to the right |
//! | down, double down | extending a vertical pair below |
//! | left, double left | extending a horizontal pair to the left |
//!
//! A pair only counts when both cells are in bounds, non-empty and equal. When
//! every color is forbidden the generator relaxes the constraint and picks any
//! color uniformly; this can create an immediate match, which the cascade then
//! resolves. Relaxed picks are counted in [`FillStats`], never reported as errors.

use serde::Serialize;

use crate::error::EngineError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::types::{Color, Point, Side};

/// Neighbour pairs checked for every generated cell.
/// The first side of each pair names the color that gets removed.
const CONSTRAINT_PAIRS: [(Side, Side); 6] = [
    (Side::Up, Side::Down),
    (Side::Right, Side::Left),
    (Side::Up, Side::DoubleUp),
    (Side::Right, Side::DoubleRight),
    (Side::Down, Side::DoubleDown),
    (Side::Left, Side::DoubleLeft),
];

/// Counters over every color the generator produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FillStats {
    pub generated: u64,
    /// Picks made with an empty candidate set (constraint relaxed)
    pub relaxed: u64,
}

#[derive(Debug, Clone)]
pub struct ColorGenerator {
    /// `1..=num_colors`, in order
    palette: Vec<Color>,
    /// Reused between calls to avoid reallocating per cell
    candidates: Vec<Color>,
    stats: FillStats,
}

impl ColorGenerator {
    pub fn new(num_colors: u8) -> Self {
        Self {
            palette: (1..=num_colors).collect(),
            candidates: Vec::with_capacity(num_colors as usize),
            stats: FillStats::default(),
        }
    }

    pub fn num_colors(&self) -> u8 {
        self.palette.len() as u8
    }

    pub fn stats(&self) -> FillStats {
        self.stats
    }

    /// Colors that may be placed at `p` without completing a line with the
    /// neighbours currently on the grid. Order follows the palette.
    pub fn candidates(&mut self, grid: &Grid, p: Point) -> &[Color] {
        self.candidates.clear();
        self.candidates.extend_from_slice(&self.palette);

        for (first, second) in CONSTRAINT_PAIRS {
            let a = p.neighbor(first);
            if !grid.same_color(a, p.neighbor(second)) {
                continue;
            }
            let Some(color) = grid.try_get(a) else {
                continue;
            };
            if let Some(pos) = self.candidates.iter().position(|&c| c == color) {
                self.candidates.remove(pos);
            }
        }

        &self.candidates
    }

    /// Choose a color for `p` without writing it
    pub fn generate(&mut self, grid: &Grid, p: Point, rng: &mut SimpleRng) -> Color {
        self.candidates(grid, p);
        self.stats.generated += 1;

        match rng.choose(&self.candidates) {
            Some(&color) => color,
            None => {
                self.stats.relaxed += 1;
                1 + rng.next_range(u32::from(self.num_colors())) as Color
            }
        }
    }

    /// Choose a color for `p` and write it to the grid
    pub fn fill(&mut self, grid: &mut Grid, p: Point, rng: &mut SimpleRng) -> Result<Color, EngineError> {
        let color = self.generate(grid, p, rng);
        grid.set(p, color)?;
        Ok(color)
    }

    /// Fill every cell in scan order (x outer, y inner)
    ///
    /// The order is part of the determinism contract: a given seed always
    /// produces the same board.
    pub fn fill_all(&mut self, grid: &mut Grid, rng: &mut SimpleRng) -> Result<(), EngineError> {
        for p in grid.size().points() {
            self.fill(grid, p, rng)?;
        }
        Ok(())
    }
}
