use super::achievements::{self, Achievement};
use super::state::{GameState, Phase};
use super::summary::GameSummary;
use crate::clock::{Clock, SystemClock};
use crate::config::ScoringConfig;
use crate::error::{CfResult, CountyForgeError};
use crate::career::{self, CareerUpdate};
use crate::persist::{self, KeyValueStore};
use crate::scorer::{calculate_score, ScoreBreakdown};
use crate::types::{CountyId, Difficulty, GameMode, Region};
use tracing::{debug, info};

/// Result of a lifecycle call. Out-of-order events are `Ignored`, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn is_applied(self) -> bool {
        self == Transition::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Correct { completed: bool },
    Incorrect,
    Ignored,
}

/// Owns the single live `GameState` of a session and applies every transition to it.
pub struct GameStateMachine<C: Clock = SystemClock> {
    state: GameState,
    config: ScoringConfig,
    clock: C,
}

impl GameStateMachine<SystemClock> {
    pub fn new(available_counties: Vec<CountyId>, config: ScoringConfig) -> CfResult<Self> {
        Self::with_clock(available_counties, config, SystemClock)
    }
}

impl<C: Clock> GameStateMachine<C> {
    /// Fails with `InvalidConfig` unless `config` passes `ScoringConfig::validate`.
    pub fn with_clock(
        available_counties: Vec<CountyId>,
        config: ScoringConfig,
        clock: C,
    ) -> CfResult<Self> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(available_counties),
            config,
            clock,
        })
    }

    /// Wraps an already-built state after checking its invariants.
    pub fn from_state(state: GameState, config: ScoringConfig, clock: C) -> CfResult<Self> {
        config.validate()?;
        state.validate()?;
        Ok(Self {
            state,
            config,
            clock,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    fn ignored(&self, event: &'static str) -> Transition {
        debug!(event, phase = %self.phase(), "ignored out-of-order event");
        Transition::Ignored
    }

    fn complete(&mut self, reason: &'static str) {
        self.state.is_completed = true;
        self.state.is_paused = false;
        self.state.current_county = None;
        self.state.selected_county = None;
        self.state.ended_at = Some(self.clock.now());
        info!(
            reason,
            score = self.state.score,
            correct = self.state.correct_answers,
            mistakes = self.state.mistakes,
            "game completed"
        );
    }

    // ---- Lifecycle ----

    /// Legal from Idle, and from Completed as a replay.
    pub fn start_game(&mut self) -> Transition {
        if !matches!(self.phase(), Phase::Idle | Phase::Completed) {
            return self.ignored("start_game");
        }
        self.state.clear_progress();
        self.state.is_started = true;
        self.state.started_at = Some(self.clock.now());
        self.state.current_county = self.state.available_counties.first().cloned();
        info!(
            counties = self.state.available_counties.len(),
            mode = %self.state.mode,
            difficulty = %self.state.difficulty,
            "game started"
        );
        if self.state.available_counties.is_empty() {
            self.complete("empty roster");
        }
        Transition::Applied
    }

    pub fn pause_game(&mut self) -> Transition {
        if self.phase() != Phase::Active {
            return self.ignored("pause_game");
        }
        self.state.is_paused = true;
        Transition::Applied
    }

    pub fn resume_game(&mut self) -> Transition {
        if self.phase() != Phase::Paused {
            return self.ignored("resume_game");
        }
        self.state.is_paused = false;
        Transition::Applied
    }

    /// Back to Idle. Mode, difficulty and preferences are kept.
    pub fn reset_game(&mut self) -> Transition {
        if self.phase() == Phase::Idle {
            return self.ignored("reset_game");
        }
        self.state.clear_progress();
        info!("game reset");
        Transition::Applied
    }

    pub fn end_game(&mut self) -> Transition {
        if self.phase() == Phase::Completed {
            return self.ignored("end_game");
        }
        self.complete("ended");
        Transition::Applied
    }

    // ---- Setup (Idle only) ----

    pub fn set_mode(&mut self, mode: GameMode) -> Transition {
        if self.phase() != Phase::Idle {
            return self.ignored("set_mode");
        }
        self.state.mode = mode;
        self.state.time_limit_seconds = mode.time_limit_seconds();
        Transition::Applied
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Transition {
        if self.phase() != Phase::Idle {
            return self.ignored("set_difficulty");
        }
        self.state.difficulty = difficulty;
        self.state.max_hints = difficulty.max_hints();
        Transition::Applied
    }

    // ---- Play ----

    /// Attempts to drop `county` onto `target`; correct iff the ids match.
    ///
    /// An id outside the roster is a caller bug and errors in every phase.
    /// Anything else that cannot apply (not Active, already placed) is ignored.
    pub fn place_county(&mut self, county: &CountyId, target: &CountyId) -> CfResult<Placement> {
        if !self.state.contains(county) {
            return Err(CountyForgeError::InvalidCounty(county.clone()));
        }
        if self.phase() != Phase::Active {
            self.ignored("place_county");
            return Ok(Placement::Ignored);
        }
        if self.state.placed_counties.contains(county) {
            debug!(county = %county, "county already placed");
            return Ok(Placement::Ignored);
        }

        let state = &mut self.state;
        state.total_questions += 1;
        state.selected_county = None;

        if county != target {
            state.mistakes += 1;
            state.streak = 0;
            debug!(county = %county, target = %target, "incorrect placement");
            return Ok(Placement::Incorrect);
        }

        state.correct_answers += 1;
        state.streak += 1;
        state.best_streak = state.best_streak.max(state.streak);
        state.score = state.score.saturating_add(points(self.config.base_score));
        state.placed_counties.insert(county.clone());
        state.current_county = state.next_unplaced();
        debug!(county = %county, streak = state.streak, "correct placement");

        let completed = state.all_placed();
        if completed {
            self.complete("all counties placed");
        }
        let placement = Placement::Correct { completed };
        self.award(placement);
        Ok(placement)
    }

    fn award(&mut self, placement: Placement) {
        for achievement in achievements::newly_earned(&self.state, placement) {
            info!(%achievement, "achievement unlocked");
            self.state.achievements.push(achievement);
        }
    }

    /// Session achievements unlocked so far, in unlock order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.state.achievements
    }

    /// Spends one hint on the current county, if the budget allows.
    pub fn use_hint(&mut self) -> Transition {
        if self.phase() != Phase::Active {
            return self.ignored("use_hint");
        }
        if self.state.hints_used >= self.state.max_hints {
            debug!(max_hints = self.state.max_hints, "hint budget exhausted");
            return Transition::Ignored;
        }
        self.state.hints_used += 1;
        self.state.score = self
            .state
            .score
            .saturating_sub(points(self.config.hint_penalty));
        Transition::Applied
    }

    /// The county a hint points at: the one awaiting placement.
    pub fn hint_target(&self) -> Option<&CountyId> {
        match self.phase() {
            Phase::Active => self.state.current_county.as_ref(),
            _ => None,
        }
    }

    pub fn hints_remaining(&self) -> u32 {
        self.state.hints_remaining()
    }

    /// Records caller-driven elapsed time and enforces the mode's time limit.
    pub fn update_timer(&mut self, elapsed_seconds: f64) -> Transition {
        if self.phase() != Phase::Active {
            return self.ignored("update_timer");
        }
        if !elapsed_seconds.is_finite() || elapsed_seconds < 0.0 {
            debug!(elapsed_seconds, "rejected timer value");
            return Transition::Ignored;
        }
        self.state.time_elapsed_seconds = elapsed_seconds;
        if let Some(limit) = self.state.time_limit_seconds {
            if elapsed_seconds >= limit {
                self.complete("time limit reached");
            }
        }
        Transition::Applied
    }

    // ---- UI pointers and preferences ----

    pub fn select_county(&mut self, county: Option<CountyId>) -> Transition {
        self.state.selected_county = county;
        Transition::Applied
    }

    pub fn highlight_county(&mut self, county: Option<CountyId>) -> Transition {
        self.state.highlighted_county = county;
        Transition::Applied
    }

    pub fn toggle_hints(&mut self) -> Transition {
        self.state.show_hints = !self.state.show_hints;
        Transition::Applied
    }

    pub fn toggle_labels(&mut self) -> Transition {
        self.state.show_labels = !self.state.show_labels;
        Transition::Applied
    }

    pub fn toggle_sound(&mut self) -> Transition {
        self.state.sound_enabled = !self.state.sound_enabled;
        Transition::Applied
    }

    // ---- Read side ----

    pub fn score_breakdown(&self) -> ScoreBreakdown {
        calculate_score(&self.state.stats(), &self.config)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_state(&self.state, &self.config)
    }

    // ---- Persistence ----

    pub fn save(&self, store: &mut dyn KeyValueStore) -> CfResult<()> {
        persist::write_saved_game(store, &self.state, self.clock.now())
    }

    /// Folds a completed session into the player's lifetime stats and the
    /// leaderboard. `None` while the game is still running.
    ///
    /// `cleared` lists the regions whose every county was placed, see
    /// `Roster::regions_cleared`.
    pub fn record_career(
        &self,
        store: &mut dyn KeyValueStore,
        player: &str,
        cleared: &[Region],
    ) -> CfResult<Option<CareerUpdate>> {
        if self.phase() != Phase::Completed {
            debug!(phase = %self.phase(), "career not recorded for an unfinished game");
            return Ok(None);
        }
        career::record_game(
            store,
            &self.state,
            &self.summary(),
            player,
            cleared,
            self.clock.now(),
        )
        .map(Some)
    }

    /// Restores the saved session, if any. Expired saves are discarded.
    pub fn load(
        store: &mut dyn KeyValueStore,
        config: ScoringConfig,
        clock: C,
    ) -> CfResult<Option<Self>> {
        match persist::read_saved_game(store, clock.now())? {
            Some(state) => Self::from_state(state, config, clock).map(Some),
            None => Ok(None),
        }
    }
}

/// Running-score increments are whole points.
fn points(amount: f64) -> u64 {
    amount.round() as u64
}
