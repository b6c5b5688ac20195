use crate::consts::{
    ANONYMOUS_PLAYER, CALIFORNIA_COUNTY_COUNT, LEADERBOARD_KEY, LEADERBOARD_MAX_ENTRIES,
    LEADERBOARD_MIN_ACCURACY, LEADERBOARD_MIN_SCORE, PLAYER_STATS_KEY,
};
use crate::error::CfResult;
use crate::game::achievements::Scope;
use crate::game::{Achievement, GameState, GameSummary};
use crate::persist::KeyValueStore;
use crate::scorer::ScoreTier;
use crate::types::{CountyId, Difficulty, GameMode, Region};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use strum::IntoEnumIterator;
use tracing::{debug, info};

fn load_record<T>(store: &dyn KeyValueStore, key: &str) -> CfResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}

fn save_record<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    record: &T,
) -> CfResult<()> {
    store.set(key, &serde_json::to_string(record)?)
}

/// Lifetime totals across every recorded game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub games_played: u32,
    pub total_score: u64,
    pub best_score: u64,
    pub best_by_difficulty: BTreeMap<Difficulty, u64>,
    pub total_play_seconds: f64,
    pub longest_streak: u32,
    pub counties_learned: BTreeSet<CountyId>,
    /// Regions whose every county was placed, per difficulty.
    pub regions_cleared: BTreeMap<Difficulty, BTreeSet<Region>>,
    pub achievements: BTreeMap<Achievement, DateTime<Utc>>,
}

impl PlayerStats {
    pub fn load(store: &dyn KeyValueStore) -> CfResult<Self> {
        load_record(store, PLAYER_STATS_KEY)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> CfResult<()> {
        save_record(store, PLAYER_STATS_KEY, self)
    }

    pub fn average_score(&self) -> u64 {
        match self.games_played {
            0 => 0,
            n => (self.total_score as f64 / n as f64).round() as u64,
        }
    }

    pub fn personal_best(&self, difficulty: Difficulty) -> u64 {
        self.best_by_difficulty.get(&difficulty).copied().unwrap_or(0)
    }

    pub fn achievement_points(&self) -> u32 {
        self.achievements.keys().map(|a| a.points()).sum()
    }

    pub fn has_cleared_every_region(&self, difficulty: Difficulty) -> bool {
        self.regions_cleared
            .get(&difficulty)
            .is_some_and(|cleared| Region::iter().all(|r| cleared.contains(&r)))
    }

    /// Adds one finished game and returns the achievements it unlocked, in
    /// declaration order. `cleared` lists the regions the game placed every
    /// county of.
    pub fn record(
        &mut self,
        state: &GameState,
        summary: &GameSummary,
        cleared: &[Region],
        now: DateTime<Utc>,
    ) -> Vec<Achievement> {
        let score = summary.breakdown.total_score;
        self.games_played += 1;
        self.total_score = self.total_score.saturating_add(score);
        self.best_score = self.best_score.max(score);
        let best = self.best_by_difficulty.entry(state.difficulty).or_insert(0);
        *best = (*best).max(score);
        if state.time_elapsed_seconds.is_finite() && state.time_elapsed_seconds > 0.0 {
            self.total_play_seconds += state.time_elapsed_seconds;
        }
        self.longest_streak = self.longest_streak.max(state.best_streak);
        self.counties_learned.extend(state.placed_counties.iter().cloned());

        if !cleared.is_empty() {
            self.regions_cleared
                .entry(state.difficulty)
                .or_default()
                .extend(cleared.iter().copied());
        }

        let mut unlocked = Vec::new();
        for &achievement in &state.achievements {
            if !self.achievements.contains_key(&achievement) {
                self.achievements.insert(achievement, now);
                unlocked.push(achievement);
            }
        }
        // Declaration order puts AchievementHunter last, after everything it counts.
        for achievement in Achievement::iter().filter(|a| a.scope() == Scope::Career) {
            if !self.achievements.contains_key(&achievement) && self.has_earned(achievement) {
                self.achievements.insert(achievement, now);
                unlocked.push(achievement);
            }
        }
        unlocked.sort();
        unlocked
    }

    fn has_earned(&self, achievement: Achievement) -> bool {
        let learned = self.counties_learned.len();
        match achievement {
            Achievement::QuickLearner => learned >= 10,
            Achievement::Scholar => learned >= 25,
            Achievement::CountyMaster => learned >= CALIFORNIA_COUNTY_COUNT,
            Achievement::BayAreaBeginner => self
                .regions_cleared
                .get(&Difficulty::Easy)
                .is_some_and(|cleared| cleared.contains(&Region::BayArea)),
            Achievement::CaliforniaExplorer => self.has_cleared_every_region(Difficulty::Easy),
            Achievement::MediumMaster => self.has_cleared_every_region(Difficulty::Medium),
            Achievement::CaliforniaLegend => self.has_cleared_every_region(Difficulty::Hard),
            Achievement::AchievementHunter => Achievement::iter()
                .filter(|a| *a != Achievement::AchievementHunter)
                .all(|a| self.achievements.contains_key(&a)),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u64,
    pub leaderboard_score: u64,
    pub time_seconds: f64,
    pub accuracy: f64,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub best_streak: u32,
    pub tier: ScoreTier,
    pub completed_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn from_summary(
        player: &str,
        summary: &GameSummary,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let player = player.trim();
        Self {
            player_name: if player.is_empty() {
                ANONYMOUS_PLAYER.to_string()
            } else {
                player.to_string()
            },
            score: summary.breakdown.total_score,
            leaderboard_score: summary.leaderboard_score,
            time_seconds: summary.time_elapsed_seconds,
            accuracy: summary.breakdown.accuracy,
            difficulty: summary.difficulty,
            mode: summary.mode,
            best_streak: summary.best_streak,
            tier: summary.tier,
            completed_at,
        }
    }
}

pub fn is_leaderboard_qualified(score: u64, accuracy: f64) -> bool {
    score >= LEADERBOARD_MIN_SCORE && accuracy >= LEADERBOARD_MIN_ACCURACY
}

/// Best entries first, by `leaderboard_score`. Equal scores keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn load(store: &dyn KeyValueStore) -> CfResult<Self> {
        let mut board: Self = load_record(store, LEADERBOARD_KEY)?;
        board
            .entries
            .sort_by(|a, b| b.leaderboard_score.cmp(&a.leaderboard_score));
        Ok(board)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> CfResult<()> {
        save_record(store, LEADERBOARD_KEY, self)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `entry` and returns its 1-based rank, or `None` if it did not
    /// make the cut.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let pos = self
            .entries
            .partition_point(|e| e.leaderboard_score >= entry.leaderboard_score);
        if pos >= LEADERBOARD_MAX_ENTRIES {
            return None;
        }
        self.entries.insert(pos, entry);
        self.entries.truncate(LEADERBOARD_MAX_ENTRIES);
        Some(pos + 1)
    }

    pub fn top_by_difficulty(
        &self,
        difficulty: Difficulty,
        limit: usize,
    ) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| e.difficulty == difficulty)
            .take(limit)
            .collect()
    }

    /// Case-insensitive on the player name.
    pub fn player_best(&self, player: &str, limit: usize) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| e.player_name.eq_ignore_ascii_case(player.trim()))
            .take(limit)
            .collect()
    }

    /// Rank of the player's best entry.
    pub fn rank_of(&self, player: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player_name.eq_ignore_ascii_case(player.trim()))
            .map(|i| i + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerUpdate {
    pub stats: PlayerStats,
    pub newly_unlocked: Vec<Achievement>,
    pub qualified: bool,
    /// Leaderboard position, when the game qualified and made the cut.
    pub rank: Option<usize>,
}

/// Records one finished game into the lifetime stats and, if it qualifies,
/// the leaderboard. Both records are written back to `store`.
pub fn record_game(
    store: &mut dyn KeyValueStore,
    state: &GameState,
    summary: &GameSummary,
    player: &str,
    cleared: &[Region],
    now: DateTime<Utc>,
) -> CfResult<CareerUpdate> {
    let mut stats = PlayerStats::load(store)?;
    let newly_unlocked = stats.record(state, summary, cleared, now);
    stats.save(store)?;

    let qualified =
        is_leaderboard_qualified(summary.breakdown.total_score, summary.breakdown.accuracy);
    let rank = if qualified {
        let mut board = Leaderboard::load(store)?;
        let rank = board.insert(LeaderboardEntry::from_summary(player, summary, now));
        board.save(store)?;
        rank
    } else {
        debug!(
            score = summary.breakdown.total_score,
            accuracy = summary.breakdown.accuracy,
            "game does not qualify for the leaderboard"
        );
        None
    };

    info!(
        games = stats.games_played,
        unlocked = newly_unlocked.len(),
        ?rank,
        "career updated"
    );
    Ok(CareerUpdate {
        stats,
        newly_unlocked,
        qualified,
        rank,
    })
}
