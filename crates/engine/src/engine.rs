//! Match engine - swap adjudication and turn resolution
//!
//! The engine owns the grid for the whole session and is driven step by step by
//! an external driver (a renderer, a test, or the headless simulation):
//!
//! ```text
//!   Idle --try_swap--> (no match: swap reverted) --> Idle
//!     |
//!     +--(match)--> Matched --resolve_step--> Cascading --resolve_step--> ... --> Idle
//! ```
//!
//! Every call runs to completion and returns a value describing what changed,
//! so the driver can animate at its own pace before asking for the next step.
//! A started cascade is never cancelled: the driver keeps calling
//! [`MatchEngine::resolve_step`] until it returns `None`.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::core::{
    check_for_combination, check_full_board, clear_matches, collapse_and_refill, Collapse,
    ColorGenerator, ColumnFall, EngineError, FillStats, Grid, GridSnapshot, MatchSet, SimpleRng,
    SpawnedCell,
};
use crate::types::{Color, GridSize, Point, Side};

/// Where the engine is within a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPhase {
    /// Stable board, waiting for a swap
    Idle,
    /// A swap was accepted; its matches are waiting to be resolved
    Matched,
    /// A refill produced new matches that are waiting to be resolved
    Cascading,
}

/// Result of a swap request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapOutcome {
    pub accepted: bool,
    pub from: Point,
    pub to: Point,
    /// Cells that will be cleared by the next resolve step (empty when rejected)
    pub matched: MatchSet,
}

impl SwapOutcome {
    fn rejected(from: Point, to: Point) -> Self {
        Self {
            accepted: false,
            from,
            to,
            matched: MatchSet::new(),
        }
    }
}

/// One clear/fall/refill pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveStep {
    pub cleared: MatchSet,
    /// Fall data for every column spanned by `cleared`
    pub columns: Vec<ColumnFall>,
    /// New tiles, per column top-down
    pub spawned: Vec<SpawnedCell>,
    /// Matches present after the refill; empty once the board is stable
    pub next_matches: MatchSet,
}

impl ResolveStep {
    pub fn is_stable(&self) -> bool {
        self.next_matches.is_empty()
    }
}

/// Every resolve step of one turn, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub steps: Vec<ResolveStep>,
}

impl TurnReport {
    /// Number of resolve passes (1 means no cascade)
    pub fn cascade_depth(&self) -> usize {
        self.steps.len()
    }

    pub fn cleared_total(&self) -> usize {
        self.steps.iter().map(|s| s.cleared.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: EngineConfig,
    seed: u32,
    grid: Grid,
    generator: ColorGenerator,
    rng: SimpleRng,
    phase: TurnPhase,
    /// Cells the next resolve step will clear
    pending: MatchSet,
}

impl MatchEngine {
    /// Validate `config`, seed the session and generate the initial field
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let seed = config.resolve_seed();

        let mut engine = Self {
            config,
            seed,
            grid: Grid::new(config.size()),
            generator: ColorGenerator::new(config.num_colors),
            rng: SimpleRng::new(seed),
            phase: TurnPhase::Idle,
            pending: MatchSet::new(),
        };
        engine.generate_initial_field()?;
        Ok(engine)
    }

    /// Shorthand for [`MatchEngine::new`] with loose parameters
    pub fn initialize(
        width: u16,
        height: u16,
        num_colors: u8,
        seed: Option<u32>,
    ) -> Result<Self, EngineError> {
        Self::new(EngineConfig {
            width,
            height,
            num_colors,
            seed,
        })
    }

    /// Refill the whole board in scan order and return to `Idle`
    ///
    /// Continues from the session RNG, so a second call yields a new board.
    pub fn generate_initial_field(&mut self) -> Result<GridSnapshot, EngineError> {
        self.grid.clear();
        self.generator.fill_all(&mut self.grid, &mut self.rng)?;
        self.phase = TurnPhase::Idle;
        self.pending.clear();
        Ok(self.snapshot())
    }

    /// Swap `a` with `b` (one of its eight directional neighbours) and keep the
    /// swap only if it forms a combination at either end
    pub fn try_swap(&mut self, a: Point, b: Point) -> Result<SwapOutcome, EngineError> {
        self.ensure_idle()?;
        self.grid.get(a)?;
        self.grid.get(b)?;
        if Side::between(a, b).is_none() {
            return Err(EngineError::NotNeighbor { from: a, to: b });
        }
        self.swap_and_adjudicate(a, b)
    }

    /// Swap `p` towards `side`; a target outside the grid is a no-op turn
    pub fn try_swap_side(&mut self, p: Point, side: Side) -> Result<SwapOutcome, EngineError> {
        self.ensure_idle()?;
        self.grid.get(p)?;
        let target = p.neighbor(side);
        if !self.grid.in_bounds(target) {
            return Ok(SwapOutcome::rejected(p, target));
        }
        self.swap_and_adjudicate(p, target)
    }

    fn swap_and_adjudicate(&mut self, a: Point, b: Point) -> Result<SwapOutcome, EngineError> {
        self.grid.swap(a, b)?;

        let mut matched = check_for_combination(&self.grid, a);
        matched.merge(&check_for_combination(&self.grid, b));

        if matched.is_empty() {
            self.grid.swap(a, b)?;
            return Ok(SwapOutcome::rejected(a, b));
        }

        self.pending = matched.clone();
        self.phase = TurnPhase::Matched;
        Ok(SwapOutcome {
            accepted: true,
            from: a,
            to: b,
            matched,
        })
    }

    /// Clear `matched`, drop and refill the affected columns, then rescan the board
    ///
    /// The rescan result becomes the pending set for the next [`resolve_step`].
    ///
    /// [`resolve_step`]: MatchEngine::resolve_step
    pub fn resolve_matches(&mut self, matched: &MatchSet) -> Result<ResolveStep, EngineError> {
        let collapse = match clear_matches(&mut self.grid, matched)? {
            Some(columns) => {
                collapse_and_refill(&mut self.grid, columns, &mut self.generator, &mut self.rng)?
            }
            None => Collapse::default(),
        };

        let next = check_full_board(&self.grid);
        self.phase = if next.is_empty() {
            TurnPhase::Idle
        } else {
            TurnPhase::Cascading
        };
        self.pending = next.clone();

        Ok(ResolveStep {
            cleared: matched.clone(),
            columns: collapse.columns,
            spawned: collapse.spawned,
            next_matches: next,
        })
    }

    /// Resolve the pending matches; `None` once the board is stable
    pub fn resolve_step(&mut self) -> Result<Option<ResolveStep>, EngineError> {
        if self.pending.is_empty() {
            self.phase = TurnPhase::Idle;
            return Ok(None);
        }
        let matched = std::mem::take(&mut self.pending);
        self.resolve_matches(&matched).map(Some)
    }

    /// Run resolve steps until the board is stable
    pub fn resolve_until_stable(&mut self) -> Result<TurnReport, EngineError> {
        let mut report = TurnReport::default();
        while let Some(step) = self.resolve_step()? {
            report.steps.push(step);
        }
        Ok(report)
    }

    /// Combination centred on `p` on the current board
    pub fn check_for_combination(&self, p: Point) -> Result<MatchSet, EngineError> {
        self.grid.get(p)?;
        Ok(check_for_combination(&self.grid, p))
    }

    /// Every combination on the current board
    pub fn check_full_board(&self) -> MatchSet {
        check_full_board(&self.grid)
    }

    pub fn get_color(&self, p: Point) -> Result<Color, EngineError> {
        self.grid.get(p)
    }

    /// Overwrite one cell; the color must be in `1..=num_colors`
    pub fn set_color(&mut self, p: Point, color: Color) -> Result<(), EngineError> {
        if color == 0 || color > self.config.num_colors {
            return Err(EngineError::InvalidColor {
                color,
                num_colors: self.config.num_colors,
            });
        }
        self.grid.set(p, color)
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        if self.phase != TurnPhase::Idle {
            return Err(EngineError::TurnInProgress);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from(&self.grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn num_colors(&self) -> u8 {
        self.config.num_colors
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Effective seed (the configured one, or the clock-derived one)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn pending_matches(&self) -> &MatchSet {
        &self.pending
    }

    pub fn fill_stats(&self) -> FillStats {
        self.generator.stats()
    }
}
