use super::achievements::Achievement;
use super::state::GameState;
use crate::config::ScoringConfig;
use crate::scorer::{
    calculate_accuracy_percent, calculate_leaderboard_score, calculate_score, determine_grade,
    get_max_possible_score, Grade, ScoreBreakdown, ScoreTier,
};
use crate::types::{Difficulty, GameMode};
use serde::Serialize;

/// End-of-game view of a session: the full breakdown plus the derived ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub running_score: u64,
    pub breakdown: ScoreBreakdown,
    pub accuracy_percent: u8,
    pub grade: Grade,
    pub max_possible_score: u64,
    pub tier: ScoreTier,
    pub leaderboard_score: u64,
    pub best_streak: u32,
    pub hints_used: u32,
    pub time_elapsed_seconds: f64,
    pub counties_placed: usize,
    pub counties_total: usize,
    pub completed: bool,
    pub achievements: Vec<Achievement>,
}

impl GameSummary {
    pub fn from_state(state: &GameState, config: &ScoringConfig) -> Self {
        let stats = state.stats();
        let breakdown = calculate_score(&stats, config);
        let accuracy_percent =
            calculate_accuracy_percent(state.correct_answers, state.total_questions);
        let counties_total = state.available_counties.len();

        Self {
            mode: state.mode,
            difficulty: state.difficulty,
            running_score: state.score,
            accuracy_percent,
            grade: determine_grade(accuracy_percent),
            max_possible_score: get_max_possible_score(
                counties_total as u32,
                state.difficulty,
                config,
            ),
            tier: ScoreTier::for_score(breakdown.total_score),
            leaderboard_score: calculate_leaderboard_score(
                breakdown.total_score,
                stats.sanitized_elapsed(),
                breakdown.accuracy,
                state.difficulty,
                config,
            ),
            breakdown,
            best_streak: state.best_streak,
            hints_used: state.hints_used,
            time_elapsed_seconds: state.time_elapsed_seconds,
            counties_placed: state.placed_counties.len(),
            counties_total,
            completed: state.is_completed,
            achievements: state.achievements.clone(),
        }
    }
}
