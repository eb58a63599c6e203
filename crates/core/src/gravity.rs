//! Gravity module - clearing, falling and refilling
//!
//! After matched cells are emptied, each affected column is walked from the
//! bottom row upwards. Every non-empty cell drops by the number of empty cells
//! seen below it; the vacated cells at the top of the column are then refilled
//! top-down with freshly generated colors. Only the columns spanned by the
//! cleared cells are touched.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::EngineError;
use crate::generator::ColorGenerator;
use crate::grid::Grid;
use crate::matcher::MatchSet;
use crate::rng::SimpleRng;
use crate::types::{Color, Point, EMPTY};

/// One existing tile moving down inside its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallMove {
    pub from: Point,
    pub to: Point,
}

impl FallMove {
    pub fn distance(&self) -> i32 {
        self.from.y - self.to.y
    }
}

/// Fall data for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnFall {
    pub x: i32,
    /// Number of cells that were empty (and got refilled)
    pub empty_count: u16,
    /// Tiles that moved down, bottom-most first
    pub moves: Vec<FallMove>,
}

/// A freshly generated tile at the top of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpawnedCell {
    pub point: Point,
    pub color: Color,
    /// Rows the tile enters from above the board (the column's empty count)
    pub fall_distance: u16,
}

/// Everything that changed while collapsing a set of columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collapse {
    pub columns: Vec<ColumnFall>,
    pub spawned: Vec<SpawnedCell>,
}

/// Empty every matched cell; returns the column range they span
pub fn clear_matches(
    grid: &mut Grid,
    matches: &MatchSet,
) -> Result<Option<RangeInclusive<i32>>, EngineError> {
    // Validate first so a bad set leaves the grid untouched.
    for &p in matches {
        grid.get(p)?;
    }
    for &p in matches {
        grid.set(p, EMPTY)?;
    }
    Ok(matches.column_span().map(|(min, max)| min..=max))
}

/// Drop tiles into the gaps of every column in `columns` and refill the top
pub fn collapse_and_refill(
    grid: &mut Grid,
    columns: RangeInclusive<i32>,
    generator: &mut ColorGenerator,
    rng: &mut SimpleRng,
) -> Result<Collapse, EngineError> {
    let height = i32::from(grid.height());
    let mut collapse = Collapse::default();

    for x in columns {
        let mut fall: i32 = 0;
        let mut moves = Vec::new();

        for y in 0..height {
            let here = Point::new(x, y);
            if grid.get(here)? == EMPTY {
                fall += 1;
            } else if fall != 0 {
                let to = Point::new(x, y - fall);
                grid.swap(here, to)?;
                moves.push(FallMove { from: here, to });
            }
        }

        let empty_count = fall as u16;
        for j in 0..fall {
            let point = Point::new(x, height - 1 - j);
            let color = generator.fill(grid, point, rng)?;
            collapse.spawned.push(SpawnedCell {
                point,
                color,
                fall_distance: empty_count,
            });
        }

        collapse.columns.push(ColumnFall {
            x,
            empty_count,
            moves,
        });
    }

    Ok(collapse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_rejects_out_of_bounds_without_mutating() {
        let mut grid = Grid::from_rows(&[&[1, 2, 3, 1], &[2, 3, 1, 2]]).unwrap();
        let before = grid.clone();
        let set: MatchSet = [Point::new(0, 0), Point::new(9, 9)].into_iter().collect();
        assert!(clear_matches(&mut grid, &set).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_collapse_preserves_order_and_refills() {
        // Column 0, bottom to top: 1 . 2 . 3
        let mut grid = Grid::from_rows(&[
            &[1, 2, 3, 1],
            &[0, 3, 1, 2],
            &[2, 1, 2, 3],
            &[0, 2, 3, 1],
            &[3, 3, 1, 2],
        ])
        .unwrap();
        let mut generator = ColorGenerator::new(4);
        let mut rng = SimpleRng::new(3);

        let collapse = collapse_and_refill(&mut grid, 0..=0, &mut generator, &mut rng).unwrap();

        assert_eq!(grid.get(Point::new(0, 0)), Ok(1));
        assert_eq!(grid.get(Point::new(0, 1)), Ok(2));
        assert_eq!(grid.get(Point::new(0, 2)), Ok(3));
        assert!(!grid.has_empty());

        let column = &collapse.columns[0];
        assert_eq!(column.empty_count, 2);
        assert_eq!(
            column.moves,
            vec![
                FallMove {
                    from: Point::new(0, 2),
                    to: Point::new(0, 1)
                },
                FallMove {
                    from: Point::new(0, 4),
                    to: Point::new(0, 2)
                },
            ]
        );
        assert_eq!(column.moves[1].distance(), 2);

        let spawned: Vec<Point> = collapse.spawned.iter().map(|s| s.point).collect();
        assert_eq!(spawned, vec![Point::new(0, 4), Point::new(0, 3)]);
        assert!(collapse.spawned.iter().all(|s| s.fall_distance == 2 && s.color != EMPTY));
    }

    #[test]
    fn test_collapse_untouched_column_reports_nothing() {
        let mut grid = Grid::from_rows(&[&[1, 2, 3, 1], &[2, 3, 1, 2]]).unwrap();
        let before = grid.clone();
        let collapse = collapse_and_refill(
            &mut grid,
            1..=2,
            &mut ColorGenerator::new(3),
            &mut SimpleRng::new(1),
        )
        .unwrap();
        assert_eq!(grid, before);
        assert!(collapse.spawned.is_empty());
        assert!(collapse.columns.iter().all(|c| c.empty_count == 0 && c.moves.is_empty()));
    }
}
