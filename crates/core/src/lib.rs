//! Core grid logic - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: the grid of colors, the
//! constraint-respecting color generator, combination detection with shape
//! classification, and the fall/refill step. It has **no dependencies** on
//! rendering, input, or I/O, making it:
//!
//! - **Deterministic**: Same seed and same calls produce identical boards
//! - **Testable**: Every rule is a plain function over a [`Grid`]
//! - **Portable**: Runs headless, under a renderer, or inside a benchmark
//!
//! # Module Structure
//!
//! - [`grid`]: flat `width x height` color storage with bounds checking
//! - [`generator`]: color picks that avoid completing a line with placed neighbours
//! - [`matcher`]: arm scanning, pruning, and the clearing-shape table
//! - [`gravity`]: clearing matched cells, dropping tiles, refilling the top
//! - [`rng`]: seeded LCG shared by everything random
//! - [`snapshot`]: owned board copies with an FNV-1a hash
//!
//! # Example
//!
//! ```
//! use match3_core::{check_for_combination, Grid};
//! use match3_core::types::Point;
//!
//! // Rows are listed bottom row first.
//! let grid = Grid::from_rows(&[
//!     &[1, 1, 1, 2],
//!     &[2, 3, 2, 3],
//!     &[3, 2, 3, 1],
//!     &[1, 3, 1, 2],
//! ])
//! .unwrap();
//!
//! let matched = check_for_combination(&grid, Point::new(1, 0));
//! assert_eq!(
//!     matched.sorted(),
//!     vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)]
//! );
//! ```

pub mod error;
pub mod generator;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use error::EngineError;
pub use generator::{ColorGenerator, FillStats};
pub use gravity::{clear_matches, collapse_and_refill, Collapse, ColumnFall, FallMove, SpawnedCell};
pub use grid::Grid;
pub use matcher::{check_for_combination, check_full_board, classify, scan_direction, Arm, Arms, MatchSet, Shape};
pub use rng::SimpleRng;
pub use snapshot::{fnv1a64, GridSnapshot};
