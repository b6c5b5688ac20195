use super::machine::Placement;
use super::state::GameState;
use crate::scorer::calculate_accuracy_percent;
use crate::types::Difficulty;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Where an achievement is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// By the state machine, from a single session.
    Session,
    /// From lifetime `PlayerStats`, when a finished game is recorded.
    Career,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstSteps,
    GettingStarted,
    OnFire,
    StreakLegend,
    UltimateStreak,
    NoHintsNeeded,
    Perfectionist,
    LightningFast,
    FlawlessVictory,
    SpeedOfLight,
    QuickLearner,
    Scholar,
    CountyMaster,
    BayAreaBeginner,
    CaliforniaExplorer,
    MediumMaster,
    CaliforniaLegend,
    /// Every other achievement. Must stay the last variant.
    AchievementHunter,
}

impl Achievement {
    pub fn title(self) -> &'static str {
        match self {
            Self::FirstSteps => "First Steps",
            Self::GettingStarted => "Getting Started",
            Self::OnFire => "On Fire",
            Self::StreakLegend => "Streak Legend",
            Self::UltimateStreak => "Ultimate Streak",
            Self::NoHintsNeeded => "No Hints Needed",
            Self::Perfectionist => "Perfectionist",
            Self::LightningFast => "Lightning Fast",
            Self::FlawlessVictory => "Flawless Victory",
            Self::SpeedOfLight => "Speed of Light",
            Self::QuickLearner => "Quick Learner",
            Self::Scholar => "California Scholar",
            Self::CountyMaster => "County Master",
            Self::BayAreaBeginner => "Bay Area Beginner",
            Self::CaliforniaExplorer => "California Explorer",
            Self::MediumMaster => "Medium Master",
            Self::CaliforniaLegend => "California Legend",
            Self::AchievementHunter => "Achievement Hunter",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FirstSteps => "Place your first county correctly",
            Self::GettingStarted => "Place every county of a game",
            Self::OnFire => "Get a 10-county streak",
            Self::StreakLegend => "Get a 25-county streak",
            Self::UltimateStreak => "Get a 50-county streak",
            Self::NoHintsNeeded => "Clear a game without using hints",
            Self::Perfectionist => "Clear a game with at least 95% accuracy",
            Self::LightningFast => "Clear a game in under 2 minutes",
            Self::FlawlessVictory => "Clear a hard game with no mistakes",
            Self::SpeedOfLight => "Clear a hard game in under 5 minutes",
            Self::QuickLearner => "Learn 10 different counties",
            Self::Scholar => "Learn 25 different counties",
            Self::CountyMaster => "Learn all 58 California counties",
            Self::BayAreaBeginner => "Clear the Bay Area on easy",
            Self::CaliforniaExplorer => "Clear every region on easy",
            Self::MediumMaster => "Clear every region on medium",
            Self::CaliforniaLegend => "Clear every region on hard",
            Self::AchievementHunter => "Unlock every other achievement",
        }
    }

    pub fn rarity(self) -> Rarity {
        match self {
            Self::FirstSteps
            | Self::GettingStarted
            | Self::QuickLearner
            | Self::BayAreaBeginner => Rarity::Common,
            Self::OnFire | Self::NoHintsNeeded | Self::Scholar | Self::CaliforniaExplorer => {
                Rarity::Rare
            }
            Self::StreakLegend
            | Self::Perfectionist
            | Self::LightningFast
            | Self::CountyMaster
            | Self::MediumMaster => Rarity::Epic,
            Self::UltimateStreak
            | Self::FlawlessVictory
            | Self::SpeedOfLight
            | Self::CaliforniaLegend
            | Self::AchievementHunter => Rarity::Legendary,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Self::FirstSteps => 10,
            Self::GettingStarted => 25,
            Self::BayAreaBeginner => 50,
            Self::QuickLearner => 75,
            Self::OnFire => 250,
            Self::NoHintsNeeded => 300,
            Self::Scholar => 350,
            Self::CaliforniaExplorer => 400,
            Self::LightningFast => 500,
            Self::Perfectionist => 600,
            Self::MediumMaster => 800,
            Self::StreakLegend => 900,
            Self::CountyMaster => 1_000,
            Self::CaliforniaLegend => 2_000,
            Self::FlawlessVictory => 2_500,
            Self::SpeedOfLight => 3_000,
            Self::UltimateStreak => 3_500,
            Self::AchievementHunter => 5_000,
        }
    }

    /// Hidden achievements are not listed until unlocked.
    pub fn is_hidden(self) -> bool {
        self.rarity() == Rarity::Legendary
    }

    pub fn scope(self) -> Scope {
        match self {
            Self::FirstSteps
            | Self::GettingStarted
            | Self::OnFire
            | Self::StreakLegend
            | Self::UltimateStreak
            | Self::NoHintsNeeded
            | Self::Perfectionist
            | Self::LightningFast
            | Self::FlawlessVictory
            | Self::SpeedOfLight => Scope::Session,
            Self::QuickLearner
            | Self::Scholar
            | Self::CountyMaster
            | Self::BayAreaBeginner
            | Self::CaliforniaExplorer
            | Self::MediumMaster
            | Self::CaliforniaLegend
            | Self::AchievementHunter => Scope::Career,
        }
    }

    fn earned_in_session(self, state: &GameState, placement: Placement) -> bool {
        let cleared =
            state.is_completed && !state.available_counties.is_empty() && state.all_placed();
        // An unticked clock proves nothing about speed.
        let timed_clear = cleared && state.time_elapsed_seconds > 0.0;
        let hard = state.difficulty == Difficulty::Hard;

        match self {
            Self::FirstSteps => matches!(placement, Placement::Correct { .. }),
            Self::GettingStarted => cleared,
            Self::OnFire => state.best_streak >= 10,
            Self::StreakLegend => state.best_streak >= 25,
            Self::UltimateStreak => state.best_streak >= 50,
            Self::NoHintsNeeded => cleared && state.hints_used == 0,
            Self::Perfectionist => {
                cleared
                    && calculate_accuracy_percent(state.correct_answers, state.total_questions)
                        >= 95
            }
            Self::LightningFast => timed_clear && state.time_elapsed_seconds < 120.0,
            Self::FlawlessVictory => cleared && hard && state.mistakes == 0,
            Self::SpeedOfLight => timed_clear && hard && state.time_elapsed_seconds < 300.0,
            _ => false,
        }
    }
}

/// Session achievements that `placement` just earned and the session does not hold yet.
pub fn newly_earned(state: &GameState, placement: Placement) -> Vec<Achievement> {
    Achievement::iter()
        .filter(|a| a.scope() == Scope::Session)
        .filter(|a| !state.achievements.contains(a))
        .filter(|a| a.earned_in_session(state, placement))
        .collect()
}
