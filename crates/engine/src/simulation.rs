//! Headless simulation - throughput mode without a renderer
//!
//! Plays N random moves as fast as possible: each move picks a random cell and a
//! random unit side, and an accepted swap is resolved through its full cascade
//! before the next move. Single-threaded and fully deterministic for a given
//! engine seed and simulation seed.

use std::time::Instant;

use serde::Serialize;

use crate::core::{EngineError, SimpleRng};
use crate::engine::MatchEngine;
use crate::types::{GridSize, Point, Side};

/// Totals for one simulation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub moves: u64,
    pub accepted: u64,
    /// Swaps reverted or pointing off the grid
    pub rejected: u64,
    pub cells_cleared: u64,
    pub resolve_steps: u64,
    /// Most resolve steps taken by a single turn
    pub longest_cascade: u64,
    /// Relaxed color picks over the whole session so far
    pub relaxed_fills: u64,
    pub elapsed_ms: u64,
    pub board_hash: u64,
}

impl SimulationReport {
    /// Moves per second, `None` when the run was too quick to time
    pub fn moves_per_second(&self) -> Option<f64> {
        if self.elapsed_ms == 0 {
            return None;
        }
        Some(self.moves as f64 * 1000.0 / self.elapsed_ms as f64)
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    rng: SimpleRng,
}

impl Simulation {
    /// `seed` drives move selection only; board colors come from the engine
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Random cell inside `size` and a random unit side
    pub fn next_move(&mut self, size: GridSize) -> (Point, Side) {
        let point = Point::new(
            self.rng.next_range(u32::from(size.width)) as i32,
            self.rng.next_range(u32::from(size.height)) as i32,
        );
        let side = Side::UNIT[self.rng.next_index(Side::UNIT.len())];
        (point, side)
    }

    /// Play `moves` random swaps on `engine`, resolving every accepted one
    pub fn run(&mut self, engine: &mut MatchEngine, moves: u64) -> Result<SimulationReport, EngineError> {
        let size = engine.size();
        let started = Instant::now();
        let mut report = SimulationReport::default();

        for _ in 0..moves {
            let (point, side) = self.next_move(size);

            report.moves += 1;
            let outcome = engine.try_swap_side(point, side)?;
            if !outcome.accepted {
                report.rejected += 1;
                continue;
            }

            report.accepted += 1;
            let turn = engine.resolve_until_stable()?;
            report.cells_cleared += turn.cleared_total() as u64;
            report.resolve_steps += turn.cascade_depth() as u64;
            report.longest_cascade = report.longest_cascade.max(turn.cascade_depth() as u64);
        }

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        report.relaxed_fills = engine.fill_stats().relaxed;
        report.board_hash = engine.snapshot().board_hash;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_counts_add_up() {
        let mut engine = MatchEngine::new(EngineConfig::new(8, 8, 4).with_seed(10)).unwrap();
        let report = Simulation::new(20).run(&mut engine, 200).unwrap();

        assert_eq!(report.moves, 200);
        assert_eq!(report.accepted + report.rejected, 200);
        assert!(report.resolve_steps >= report.accepted);
        assert!(report.cells_cleared >= report.accepted * 3);
        assert_eq!(report.board_hash, engine.snapshot().board_hash);
        assert!(engine.check_full_board().is_empty());
    }

    #[test]
    fn test_zero_moves_leaves_board_alone() {
        let mut engine = MatchEngine::new(EngineConfig::default().with_seed(4)).unwrap();
        let before = engine.snapshot();
        let report = Simulation::new(1).run(&mut engine, 0).unwrap();
        assert_eq!(report.moves, 0);
        assert_eq!(engine.snapshot(), before);
    }
}
