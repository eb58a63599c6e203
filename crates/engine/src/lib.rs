//! Match engine - the turn state machine around the core grid logic.
//!
//! A driver holds a [`MatchEngine`], asks it to swap two cells, and then steps
//! the resolution until the board is stable, animating each returned
//! [`ResolveStep`] in between. [`Simulation`] is the same loop with no driver
//! in the way.

pub mod config;
pub mod engine;
pub mod simulation;

pub use match3_core as core;
pub use match3_types as types;

pub use config::EngineConfig;
pub use engine::{MatchEngine, ResolveStep, SwapOutcome, TurnPhase, TurnReport};
pub use simulation::{Simulation, SimulationReport};
