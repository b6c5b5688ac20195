use crate::error::{CfResult, CountyForgeError};
use crate::types::{Difficulty, GameMode, Region};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub scoring: ScoringConfig,
    #[command(flatten)]
    pub session: SessionOptions,
}

/// Scoring constants. Immutable once a session is built from them.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Points per correct placement.
    #[arg(long, default_value_t = 100.0)]
    pub base_score: f64,
    /// Ceiling of the per-question time bonus.
    #[arg(long, default_value_t = 50.0)]
    pub time_bonus_cap: f64,
    #[arg(long, default_value_t = 25.0)]
    pub accuracy_bonus_unit: f64,
    #[arg(long, default_value_t = 10.0)]
    pub hint_penalty: f64,
    #[arg(long, default_value_t = 15.0)]
    pub mistake_penalty: f64,
    /// Flat bonus for zero mistakes, zero hints and full accuracy.
    #[arg(long, default_value_t = 200.0)]
    pub perfect_game_bonus: f64,

    #[command(flatten)]
    #[serde(rename = "difficultyMultiplier")]
    pub difficulty_multiplier: DifficultyMultipliers,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            time_bonus_cap: 50.0,
            accuracy_bonus_unit: 25.0,
            hint_penalty: 10.0,
            mistake_penalty: 15.0,
            perfect_game_bonus: 200.0,
            difficulty_multiplier: DifficultyMultipliers::default(),
        }
    }
}

#[derive(Args, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyMultipliers {
    #[arg(long = "multiplier-easy", id = "multiplier_easy", default_value_t = 0.8)]
    pub easy: f64,
    #[arg(long = "multiplier-medium", id = "multiplier_medium", default_value_t = 1.0)]
    pub medium: f64,
    #[arg(long = "multiplier-hard", id = "multiplier_hard", default_value_t = 1.3)]
    pub hard: f64,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self {
            easy: 0.8,
            medium: 1.0,
            hard: 1.3,
        }
    }
}

impl DifficultyMultipliers {
    #[inline(always)]
    pub fn get(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl ScoringConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// All amounts must be finite and non-negative, multipliers strictly positive.
    pub fn validate(&self) -> CfResult<()> {
        let amounts = [
            ("baseScore", self.base_score),
            ("timeBonusCap", self.time_bonus_cap),
            ("accuracyBonusUnit", self.accuracy_bonus_unit),
            ("hintPenalty", self.hint_penalty),
            ("mistakePenalty", self.mistake_penalty),
            ("perfectGameBonus", self.perfect_game_bonus),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(CountyForgeError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let m = &self.difficulty_multiplier;
        for (name, value) in [("easy", m.easy), ("medium", m.medium), ("hard", m.hard)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CountyForgeError::InvalidConfig(format!(
                    "difficultyMultiplier.{} must be strictly positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn merge_from_cli(&mut self, cli: &ScoringConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($($field:ident).+, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$($field).+ = cli.$($field).+;
                }
            };
        }

        update_if_present!(base_score, "base_score");
        update_if_present!(time_bonus_cap, "time_bonus_cap");
        update_if_present!(accuracy_bonus_unit, "accuracy_bonus_unit");
        update_if_present!(hint_penalty, "hint_penalty");
        update_if_present!(mistake_penalty, "mistake_penalty");
        update_if_present!(perfect_game_bonus, "perfect_game_bonus");

        update_if_present!(difficulty_multiplier.easy, "multiplier_easy");
        update_if_present!(difficulty_multiplier.medium, "multiplier_medium");
        update_if_present!(difficulty_multiplier.hard, "multiplier_hard");
    }
}

/// How a CLI session is set up before `start_game`.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionOptions {
    #[arg(long, default_value_t = GameMode::Practice)]
    pub mode: GameMode,
    #[arg(long, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,
    /// Restrict the quiz to one region; all counties when omitted.
    #[arg(long)]
    pub region: Option<Region>,
    /// Shuffle the county order with this seed instead of roster order.
    #[arg(long)]
    pub shuffle_seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mode: GameMode::Practice,
            difficulty: Difficulty::Medium,
            region: None,
            shuffle_seed: None,
        }
    }
}
