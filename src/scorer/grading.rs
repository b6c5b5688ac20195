use super::engine::calculate_score;
use super::types::GameStats;
use crate::config::ScoringConfig;
use crate::consts::GRADE_THRESHOLDS;
use crate::types::Difficulty;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Rounded accuracy percentage, 0 when `total == 0`.
pub fn calculate_accuracy_percent(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (correct as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Grade {
    #[strum(serialize = "A+")]
    #[serde(rename = "A+")]
    APlus,
    #[strum(serialize = "A")]
    #[serde(rename = "A")]
    A,
    #[strum(serialize = "B+")]
    #[serde(rename = "B+")]
    BPlus,
    #[strum(serialize = "B")]
    #[serde(rename = "B")]
    B,
    #[strum(serialize = "C+")]
    #[serde(rename = "C+")]
    CPlus,
    #[strum(serialize = "C")]
    #[serde(rename = "C")]
    C,
    #[strum(serialize = "D")]
    #[serde(rename = "D")]
    D,
    #[strum(serialize = "F")]
    #[serde(rename = "F")]
    F,
}

pub fn determine_grade(accuracy_percent: u8) -> Grade {
    const GRADES: [Grade; 7] = [
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::D,
    ];
    GRADE_THRESHOLDS
        .iter()
        .zip(GRADES)
        .find(|(threshold, _)| accuracy_percent >= **threshold)
        .map(|(_, grade)| grade)
        .unwrap_or(Grade::F)
}

/// Best score a session of `total_questions` can reach: every answer correct,
/// no hints, no mistakes, no time spent.
pub fn get_max_possible_score(
    total_questions: u32,
    difficulty: Difficulty,
    config: &ScoringConfig,
) -> u64 {
    let perfect = GameStats::builder()
        .correct_answers(total_questions)
        .total_questions(total_questions)
        .difficulty(difficulty)
        .build();
    calculate_score(&perfect, config).total_score
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum ScoreTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
}

impl ScoreTier {
    pub fn threshold(self) -> u64 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 5_000,
            Self::Gold => 15_000,
            Self::Platinum => 30_000,
            Self::Diamond => 50_000,
            Self::Master => 75_000,
            Self::Grandmaster => 100_000,
        }
    }

    pub fn for_score(score: u64) -> Self {
        use strum::IntoEnumIterator;
        Self::iter()
            .rev()
            .find(|tier| score >= tier.threshold())
            .unwrap_or(Self::Bronze)
    }
}

/// Normalized 0..~1000 rating used to compare sessions across difficulties.
pub fn calculate_leaderboard_score(
    total_score: u64,
    time_seconds: f64,
    accuracy: f64,
    difficulty: Difficulty,
    config: &ScoringConfig,
) -> u64 {
    let time = if time_seconds.is_finite() {
        time_seconds.max(0.0)
    } else {
        0.0
    };
    let normalized_score = (total_score as f64 / 100.0).min(1000.0);
    let normalized_time = (1000.0 - time).max(0.0);
    let normalized_accuracy = accuracy.clamp(0.0, 1.0) * 1000.0;

    let blended = normalized_score * 0.3 + normalized_time * 0.3 + normalized_accuracy * 0.4;
    (blended * config.difficulty_multiplier.get(difficulty)).round() as u64
}
