//! Grid module - owns the colors of every cell
//!
//! The grid is `width x height` cells stored in a flat row-major array for cache
//! locality. Coordinates: x ranges `0..width` (left to right), y ranges
//! `0..height` (bottom to top). Cells hold a [`Color`]; [`EMPTY`] only appears
//! while a resolve step is clearing and collapsing.

use std::fmt;

use crate::error::EngineError;
use crate::types::{Color, GridSize, Point, EMPTY};

/// The game grid using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Color>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![EMPTY; size.area()],
        }
    }

    /// Build a grid from rows, `rows[y]` being row `y` (bottom row first)
    ///
    /// All rows must have the same non-zero length.
    pub fn from_rows(rows: &[&[Color]]) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(EngineError::InvalidConfiguration(
                "rows must be non-empty and of equal length".to_string(),
            ));
        }
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(EngineError::InvalidConfiguration(format!(
                "{width}x{height} grid is too large"
            )));
        };

        Ok(Self {
            size: GridSize::new(w, h),
            cells: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u16 {
        self.size.width
    }

    pub fn height(&self) -> u16 {
        self.size.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.size.contains(p)
    }

    fn index(&self, p: Point) -> Result<usize, EngineError> {
        self.size.index(p).ok_or(EngineError::OutOfBounds {
            point: p,
            size: self.size,
        })
    }

    /// Color at `p`
    pub fn get(&self, p: Point) -> Result<Color, EngineError> {
        self.index(p).map(|idx| self.cells[idx])
    }

    /// Color at `p`, `None` when out of bounds
    pub fn try_get(&self, p: Point) -> Option<Color> {
        self.size.index(p).map(|idx| self.cells[idx])
    }

    /// Overwrite the color at `p`
    pub fn set(&mut self, p: Point, color: Color) -> Result<(), EngineError> {
        let idx = self.index(p)?;
        self.cells[idx] = color;
        Ok(())
    }

    /// Exchange the colors of two cells
    pub fn swap(&mut self, a: Point, b: Point) -> Result<(), EngineError> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Both cells in bounds, `a` non-empty, and both the same color
    pub fn same_color(&self, a: Point, b: Point) -> bool {
        match (self.try_get(a), self.try_get(b)) {
            (Some(ca), Some(cb)) => ca != EMPTY && ca == cb,
            _ => false,
        }
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Whether any cell is currently empty
    pub fn has_empty(&self) -> bool {
        self.cells.contains(&EMPTY)
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl fmt::Display for Grid {
    /// One line per row, top row first; empty cells print as `.`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.width as usize;
        for row in self.cells.chunks(width).rev() {
            let line: Vec<String> = row
                .iter()
                .map(|&c| if c == EMPTY { ".".to_string() } else { c.to_string() })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
