use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{Color, GridSize, Point};

/// FNV-1a 64-bit over a byte stream
pub fn fnv1a64(bytes: impl IntoIterator<Item = u8>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// Owned copy of the grid handed to drivers
///
/// `cells` is row-major, bottom row first; `board_hash` is FNV-1a over `cells`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Color>,
    pub board_hash: u64,
}

impl GridSnapshot {
    pub fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    pub fn get(&self, p: Point) -> Option<Color> {
        self.size().index(p).and_then(|idx| self.cells.get(idx).copied())
    }

    /// Rows from top to bottom, the way a renderer draws them
    pub fn rows_top_down(&self) -> Vec<Vec<Color>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .rev()
            .map(<[Color]>::to_vec)
            .collect()
    }
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        let cells = grid.cells().to_vec();
        Self {
            width: grid.width(),
            height: grid.height(),
            board_hash: fnv1a64(cells.iter().copied()),
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_hash_tracks_cells() {
        let mut grid = Grid::from_rows(&[&[1, 2, 3, 1], &[2, 3, 1, 2]]).unwrap();
        let a = GridSnapshot::from(&grid);
        assert_eq!(a.board_hash, fnv1a64(a.cells.iter().copied()));

        grid.swap(Point::new(0, 0), Point::new(1, 0)).unwrap();
        let b = GridSnapshot::from(&grid);
        assert_ne!(a.board_hash, b.board_hash);
    }

    #[test]
    fn test_fnv_empty_is_offset_basis() {
        assert_eq!(fnv1a64(std::iter::empty()), 0xcbf29ce484222325);
    }

    #[test]
    fn test_rows_top_down() {
        let grid = Grid::from_rows(&[&[1, 2, 3, 1], &[2, 3, 1, 2]]).unwrap();
        let snap = GridSnapshot::from(&grid);
        assert_eq!(snap.rows_top_down(), vec![vec![2, 3, 1, 2], vec![1, 2, 3, 1]]);
        assert_eq!(snap.get(Point::new(2, 1)), Some(1));
        assert_eq!(snap.get(Point::new(4, 1)), None);
    }
}
