//! Simulation tests - headless random play

use std::collections::HashSet;

use match3::engine::{EngineConfig, MatchEngine, Simulation, SimulationReport, TurnPhase};
use match3::types::{GridSize, Side};

fn run(engine_seed: u32, sim_seed: u32, moves: u64) -> (MatchEngine, SimulationReport) {
    let mut engine =
        MatchEngine::new(EngineConfig::new(10, 10, 5).with_seed(engine_seed)).unwrap();
    let report = Simulation::new(sim_seed).run(&mut engine, moves).unwrap();
    (engine, report)
}

#[test]
fn test_simulation_leaves_a_stable_board() {
    let (engine, report) = run(5, 6, 500);

    assert_eq!(report.moves, 500);
    assert_eq!(report.accepted + report.rejected, report.moves);
    assert!(report.accepted > 0, "no swap was ever accepted");
    assert!(report.longest_cascade >= 1);
    assert!(report.longest_cascade <= report.resolve_steps);

    assert_eq!(engine.phase(), TurnPhase::Idle);
    assert!(engine.check_full_board().is_empty());
    assert!(!engine.grid().has_empty());
}

#[test]
fn test_simulation_is_reproducible() {
    let (a, first) = run(42, 43, 300);
    let (b, second) = run(42, 43, 300);

    assert_eq!(first.board_hash, second.board_hash);
    assert_eq!(first.accepted, second.accepted);
    assert_eq!(first.cells_cleared, second.cells_cleared);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_simulation_seed_changes_the_game() {
    let (_, first) = run(42, 1, 300);
    let (_, second) = run(42, 2, 300);
    assert_ne!(first.board_hash, second.board_hash);
}

#[test]
fn test_report_serializes() {
    let (_, report) = run(7, 8, 50);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["moves"], 50);
    assert_eq!(json["accepted"], report.accepted);
    assert_eq!(json["board_hash"], report.board_hash);
    assert!(json.get("elapsed_ms").is_some());
}

#[test]
fn test_snapshot_serializes_rows() {
    let (engine, _) = run(9, 10, 20);
    let snap = engine.snapshot();
    let json = serde_json::to_value(&snap).unwrap();

    assert_eq!(json["width"], 10);
    assert_eq!(json["height"], 10);
    assert_eq!(json["cells"].as_array().map(Vec::len), Some(100));

    let back: match3::core::GridSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_move_selection_covers_the_board() {
    let size = GridSize::new(8, 8);
    let mut simulation = Simulation::new(3);
    let moves: HashSet<_> = (0..10_000).map(|_| simulation.next_move(size)).collect();

    // 8 x 8 cells x 4 sides
    assert!(moves.len() >= 240, "only {} distinct moves", moves.len());
    assert!(moves.iter().all(|&(p, side)| size.contains(p) && Side::UNIT.contains(&side)));
}

#[test]
fn test_adjacent_simulation_seeds_pick_different_moves() {
    let size = GridSize::new(8, 8);
    let mut a = Simulation::new(100);
    let mut b = Simulation::new(101);
    let same = (0..200).filter(|_| a.next_move(size) == b.next_move(size)).count();
    assert!(same < 20, "{same} of 200 moves coincided");
}
