use super::achievements::{Achievement, Scope};
use crate::error::{CfResult, CountyForgeError};
use crate::scorer::GameStats;
use crate::types::{CountyId, Difficulty, GameMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Lifecycle phase, derived from the `is_*` flags of `GameState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Active,
    Paused,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// The mutable session record. One live instance per game, owned by
/// `GameStateMachine`; everything else sees clones or `&GameState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GameStateRecord", try_from = "GameStateRecord")]
pub struct GameState {
    // Lifecycle
    pub is_started: bool,
    pub is_paused: bool,
    pub is_completed: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,

    // Mode & difficulty
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub time_limit_seconds: Option<f64>,

    // Counties
    pub available_counties: Vec<CountyId>,
    pub placed_counties: HashSet<CountyId>,
    pub current_county: Option<CountyId>,
    pub selected_county: Option<CountyId>,
    pub highlighted_county: Option<CountyId>,

    // Progress
    pub score: u64,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub mistakes: u32,
    pub hints_used: u32,
    pub max_hints: u32,
    pub streak: u32,
    pub best_streak: u32,

    pub time_elapsed_seconds: f64,

    /// Session achievements in unlock order.
    pub achievements: Vec<Achievement>,

    // UI preferences, no scoring effect
    pub show_hints: bool,
    pub show_labels: bool,
    pub sound_enabled: bool,
}

impl GameState {
    /// Idle session over `available_counties`; duplicate ids keep their first position.
    pub fn new(available_counties: Vec<CountyId>) -> Self {
        let mut seen = HashSet::with_capacity(available_counties.len());
        let available_counties = available_counties
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let mode = GameMode::default();
        let difficulty = Difficulty::default();
        Self {
            is_started: false,
            is_paused: false,
            is_completed: false,
            started_at: None,
            ended_at: None,
            mode,
            difficulty,
            time_limit_seconds: mode.time_limit_seconds(),
            available_counties,
            placed_counties: HashSet::new(),
            current_county: None,
            selected_county: None,
            highlighted_county: None,
            score: 0,
            correct_answers: 0,
            total_questions: 0,
            mistakes: 0,
            hints_used: 0,
            max_hints: difficulty.max_hints(),
            streak: 0,
            best_streak: 0,
            time_elapsed_seconds: 0.0,
            achievements: Vec::new(),
            show_hints: true,
            show_labels: false,
            sound_enabled: true,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_completed {
            Phase::Completed
        } else if !self.is_started {
            Phase::Idle
        } else if self.is_paused {
            Phase::Paused
        } else {
            Phase::Active
        }
    }

    /// Clears progress, timestamps and pointers. Mode, difficulty, roster and
    /// UI preferences survive.
    pub(crate) fn clear_progress(&mut self) {
        self.is_started = false;
        self.is_paused = false;
        self.is_completed = false;
        self.started_at = None;
        self.ended_at = None;
        self.placed_counties.clear();
        self.current_county = None;
        self.selected_county = None;
        self.highlighted_county = None;
        self.score = 0;
        self.correct_answers = 0;
        self.total_questions = 0;
        self.mistakes = 0;
        self.hints_used = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.time_elapsed_seconds = 0.0;
        self.achievements.clear();
    }

    pub fn contains(&self, id: &CountyId) -> bool {
        self.available_counties.contains(id)
    }

    /// First county in roster order that has not been placed yet.
    pub fn next_unplaced(&self) -> Option<CountyId> {
        self.available_counties
            .iter()
            .find(|id| !self.placed_counties.contains(*id))
            .cloned()
    }

    pub fn remaining_counties(&self) -> impl Iterator<Item = &CountyId> {
        self.available_counties
            .iter()
            .filter(|id| !self.placed_counties.contains(*id))
    }

    pub fn all_placed(&self) -> bool {
        self.placed_counties.len() == self.available_counties.len()
    }

    pub fn hints_remaining(&self) -> u32 {
        self.max_hints.saturating_sub(self.hints_used)
    }

    pub fn time_remaining_seconds(&self) -> Option<f64> {
        self.time_limit_seconds
            .map(|limit| (limit - self.time_elapsed_seconds).max(0.0))
    }

    /// Placed counties in roster order.
    pub fn placed_in_order(&self) -> Vec<CountyId> {
        self.available_counties
            .iter()
            .filter(|id| self.placed_counties.contains(*id))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> GameStats {
        GameStats::from(self)
    }

    /// Checks every invariant a live session keeps after each transition.
    pub fn validate(&self) -> CfResult<()> {
        self.check_invariants().map_err(CountyForgeError::CorruptSave)
    }

    fn check_invariants(&self) -> Result<(), String> {
        let unique: HashSet<&CountyId> = self.available_counties.iter().collect();
        if unique.len() != self.available_counties.len() {
            return Err("availableCounties contains duplicates".into());
        }
        if let Some(stray) = self.placed_counties.iter().find(|id| !unique.contains(id)) {
            return Err(format!("placed county '{}' is not in the roster", stray));
        }
        if let Some(current) = &self.current_county {
            if !unique.contains(current) {
                return Err(format!("current county '{}' is not in the roster", current));
            }
            if self.placed_counties.contains(current) {
                return Err(format!("current county '{}' is already placed", current));
            }
        }
        if self.max_hints != self.difficulty.max_hints() {
            return Err(format!(
                "maxHints {} does not match difficulty {}",
                self.max_hints, self.difficulty
            ));
        }
        if self.hints_used > self.max_hints {
            return Err(format!(
                "hintsUsed {} exceeds maxHints {}",
                self.hints_used, self.max_hints
            ));
        }
        if self.time_limit_seconds != self.mode.time_limit_seconds() {
            return Err(format!("timeLimit does not match mode {}", self.mode));
        }
        if self.correct_answers as u64 + self.mistakes as u64 != self.total_questions as u64 {
            return Err("correctAnswers + mistakes != totalQuestions".into());
        }
        if self.correct_answers as usize != self.placed_counties.len() {
            return Err("correctAnswers does not match placed county count".into());
        }
        if self.streak > self.best_streak {
            return Err("streak exceeds bestStreak".into());
        }
        if self.is_completed && self.is_paused {
            return Err("a completed game cannot be paused".into());
        }
        if self.is_paused && !self.is_started {
            return Err("an unstarted game cannot be paused".into());
        }
        if !self.time_elapsed_seconds.is_finite() || self.time_elapsed_seconds < 0.0 {
            return Err("timeElapsed must be a non-negative number".into());
        }
        if self.is_started && !self.is_completed && self.all_placed() {
            return Err("every county is placed but the game is not completed".into());
        }
        if let Some(limit) = self.time_limit_seconds {
            if self.is_started && !self.is_completed && self.time_elapsed_seconds >= limit {
                return Err(format!(
                    "timeElapsed {} reached the {}s limit but the game is not completed",
                    self.time_elapsed_seconds, limit
                ));
            }
        }
        let unique_achievements: HashSet<&Achievement> = self.achievements.iter().collect();
        if unique_achievements.len() != self.achievements.len() {
            return Err("achievements contains duplicates".into());
        }
        if let Some(a) = self.achievements.iter().find(|a| a.scope() != Scope::Session) {
            return Err(format!("'{}' cannot be earned inside a session", a));
        }
        Ok(())
    }
}

impl From<&GameState> for GameStats {
    fn from(state: &GameState) -> Self {
        GameStats {
            correct_answers: state.correct_answers,
            total_questions: state.total_questions,
            mistakes: state.mistakes,
            hints_used: state.hints_used,
            time_elapsed_seconds: state.time_elapsed_seconds,
            difficulty: state.difficulty,
        }
    }
}

/// Serialized form of `GameState`: the placed set becomes an array in roster
/// order, and deserializing validates the record before handing it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameStateRecord {
    is_started: bool,
    is_paused: bool,
    is_completed: bool,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    mode: GameMode,
    difficulty: Difficulty,
    time_limit_seconds: Option<f64>,
    available_counties: Vec<CountyId>,
    placed_counties: Vec<CountyId>,
    current_county: Option<CountyId>,
    selected_county: Option<CountyId>,
    highlighted_county: Option<CountyId>,
    score: u64,
    correct_answers: u32,
    total_questions: u32,
    mistakes: u32,
    hints_used: u32,
    max_hints: u32,
    streak: u32,
    best_streak: u32,
    time_elapsed_seconds: f64,
    #[serde(default)]
    achievements: Vec<Achievement>,
    #[serde(default = "default_true")]
    show_hints: bool,
    #[serde(default)]
    show_labels: bool,
    #[serde(default = "default_true")]
    sound_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl From<GameState> for GameStateRecord {
    fn from(state: GameState) -> Self {
        let placed_counties = state.placed_in_order();
        Self {
            is_started: state.is_started,
            is_paused: state.is_paused,
            is_completed: state.is_completed,
            started_at: state.started_at,
            ended_at: state.ended_at,
            mode: state.mode,
            difficulty: state.difficulty,
            time_limit_seconds: state.time_limit_seconds,
            available_counties: state.available_counties,
            placed_counties,
            current_county: state.current_county,
            selected_county: state.selected_county,
            highlighted_county: state.highlighted_county,
            score: state.score,
            correct_answers: state.correct_answers,
            total_questions: state.total_questions,
            mistakes: state.mistakes,
            hints_used: state.hints_used,
            max_hints: state.max_hints,
            streak: state.streak,
            best_streak: state.best_streak,
            time_elapsed_seconds: state.time_elapsed_seconds,
            achievements: state.achievements,
            show_hints: state.show_hints,
            show_labels: state.show_labels,
            sound_enabled: state.sound_enabled,
        }
    }
}

impl TryFrom<GameStateRecord> for GameState {
    type Error = String;

    fn try_from(record: GameStateRecord) -> Result<Self, String> {
        let placed_len = record.placed_counties.len();
        let placed_counties: HashSet<CountyId> = record.placed_counties.into_iter().collect();
        if placed_counties.len() != placed_len {
            return Err("placedCounties contains duplicates".into());
        }

        let state = Self {
            is_started: record.is_started,
            is_paused: record.is_paused,
            is_completed: record.is_completed,
            started_at: record.started_at,
            ended_at: record.ended_at,
            mode: record.mode,
            difficulty: record.difficulty,
            time_limit_seconds: record.time_limit_seconds,
            available_counties: record.available_counties,
            placed_counties,
            current_county: record.current_county,
            selected_county: record.selected_county,
            highlighted_county: record.highlighted_county,
            score: record.score,
            correct_answers: record.correct_answers,
            total_questions: record.total_questions,
            mistakes: record.mistakes,
            hints_used: record.hints_used,
            max_hints: record.max_hints,
            streak: record.streak,
            best_streak: record.best_streak,
            time_elapsed_seconds: record.time_elapsed_seconds,
            achievements: record.achievements,
            show_hints: record.show_hints,
            show_labels: record.show_labels,
            sound_enabled: record.sound_enabled,
        };
        state.check_invariants()?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<CountyId> {
        names.iter().map(|&n| CountyId::from(n)).collect()
    }

    #[test]
    fn new_state_is_idle_and_deduplicated() {
        let state = GameState::new(ids(&["orange", "kern", "orange", "inyo"]));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.available_counties, ids(&["orange", "kern", "inyo"]));
        assert_eq!(state.max_hints, 3);
        assert_eq!(state.time_limit_seconds, None);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn serialization_orders_the_placed_set_by_roster() {
        let mut state = GameState::new(ids(&["a", "b", "c", "d"]));
        state.is_started = true;
        for id in ["d", "b"] {
            state.placed_counties.insert(CountyId::from(id));
        }
        state.correct_answers = 2;
        state.total_questions = 2;
        state.streak = 2;
        state.best_streak = 2;
        state.current_county = Some(CountyId::from("a"));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["placedCounties"], serde_json::json!(["b", "d"]));

        let back: GameState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn deserializing_rejects_broken_invariants() {
        let mut state = GameState::new(ids(&["a", "b"]));
        state.hints_used = 4;
        let json = serde_json::to_string(&state).unwrap();
        let err = serde_json::from_str::<GameState>(&json).unwrap_err();
        assert!(err.to_string().contains("hintsUsed"));
    }

    #[test]
    fn unfinished_game_past_its_time_limit_is_invalid() {
        let mut state = GameState::new(ids(&["a", "b"]));
        state.mode = GameMode::Challenge;
        state.time_limit_seconds = GameMode::Challenge.time_limit_seconds();
        state.is_started = true;
        state.time_elapsed_seconds = 179.9;
        assert!(state.validate().is_ok());

        state.time_elapsed_seconds = 180.0;
        assert!(matches!(
            state.validate(),
            Err(CountyForgeError::CorruptSave(ref msg)) if msg.contains("limit")
        ));

        state.is_completed = true;
        assert!(state.validate().is_ok());
    }
}
