pub mod engine;
pub mod grading;
pub mod types;

pub use self::engine::calculate_score;
pub use self::grading::{
    calculate_accuracy_percent, calculate_leaderboard_score, determine_grade,
    get_max_possible_score, Grade, ScoreTier,
};
pub use self::types::{GameStats, ScoreBreakdown};
use crate::config::ScoringConfig;
use crate::error::CfResult;
use crate::types::Difficulty;

/// Holds a validated `ScoringConfig` and scores snapshots against it.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    pub config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> CfResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn score(&self, stats: &GameStats) -> ScoreBreakdown {
        engine::calculate_score(stats, &self.config)
    }

    pub fn max_possible_score(&self, total_questions: u32, difficulty: Difficulty) -> u64 {
        grading::get_max_possible_score(total_questions, difficulty, &self.config)
    }
}
