use crate::types::Difficulty;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Statistics snapshot fed to the scoring engine.
///
/// Counters are unsigned, so the engine never sees negative mistakes or hints.
#[derive(Debug, Clone, Copy, PartialEq, TypedBuilder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    #[builder(default)]
    pub correct_answers: u32,
    #[builder(default)]
    pub total_questions: u32,
    #[builder(default)]
    pub mistakes: u32,
    #[builder(default)]
    pub hints_used: u32,
    #[builder(default)]
    pub time_elapsed_seconds: f64,
    #[builder(default)]
    pub difficulty: Difficulty,
}

impl GameStats {
    /// Correct/total ratio in `[0, 1]`; 0 when nothing was asked.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        (self.correct_answers as f64 / self.total_questions as f64).min(1.0)
    }

    /// Zero mistakes, zero hints and every question answered correctly.
    pub fn is_perfect_game(&self) -> bool {
        self.mistakes == 0
            && self.hints_used == 0
            && self.total_questions > 0
            && self.correct_answers >= self.total_questions
    }

    /// Elapsed time with non-finite or negative input treated as zero.
    pub fn sanitized_elapsed(&self) -> f64 {
        if self.time_elapsed_seconds.is_finite() {
            self.time_elapsed_seconds.max(0.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub accuracy: f64,

    // Components, rounded for display
    pub base_score: u64,
    pub time_bonus: u64,
    pub accuracy_bonus: u64,
    pub perfect_bonus: u64,
    pub hints_penalty: u64,
    pub mistakes_penalty: u64,

    /// Clamped subtotal before the difficulty multiplier.
    pub subtotal: u64,
    pub difficulty_multiplier: f64,
    pub total_score: u64,
    pub is_perfect_game: bool,
}
