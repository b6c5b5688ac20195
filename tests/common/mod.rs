#![allow(dead_code)]

use countyforge::clock::ManualClock;
use countyforge::config::ScoringConfig;
use countyforge::game::GameStateMachine;
use countyforge::scorer::GameStats;
use countyforge::types::{CountyId, Difficulty, GameMode};

pub fn ids(names: &[&str]) -> Vec<CountyId> {
    names.iter().map(|&n| CountyId::from(n)).collect()
}

pub fn id(name: &str) -> CountyId {
    CountyId::from(name)
}

/// `county-0`, `county-1`, ...
pub fn numbered_ids(count: usize) -> Vec<CountyId> {
    (0..count).map(|i| CountyId::new(format!("county-{}", i))).collect()
}

pub fn stats(
    correct: u32,
    total: u32,
    mistakes: u32,
    hints: u32,
    time: f64,
    difficulty: Difficulty,
) -> GameStats {
    GameStats::builder()
        .correct_answers(correct)
        .total_questions(total)
        .mistakes(mistakes)
        .hints_used(hints)
        .time_elapsed_seconds(time)
        .difficulty(difficulty)
        .build()
}

pub fn machine(counties: Vec<CountyId>) -> GameStateMachine<ManualClock> {
    GameStateMachine::with_clock(counties, ScoringConfig::default(), ManualClock::default())
        .unwrap()
}

/// An Active session with the given setup applied before `start_game`.
pub fn started(
    counties: Vec<CountyId>,
    mode: GameMode,
    difficulty: Difficulty,
) -> GameStateMachine<ManualClock> {
    let mut m = machine(counties);
    m.set_mode(mode);
    m.set_difficulty(difficulty);
    m.start_game();
    m
}

pub const CALIFORNIA_SAMPLE: [&str; 5] = ["orange", "los-angeles", "kern", "inyo", "marin"];
