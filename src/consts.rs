/// Time limit for `GameMode::Timed` sessions (5 minutes).
pub const TIMED_MODE_LIMIT_SECS: f64 = 300.0;

/// Time limit for `GameMode::Challenge` sessions (3 minutes).
pub const CHALLENGE_MODE_LIMIT_SECS: f64 = 180.0;

/// Hint budgets per difficulty tier.
pub const MAX_HINTS_EASY: u32 = 5;
pub const MAX_HINTS_MEDIUM: u32 = 3;
pub const MAX_HINTS_HARD: u32 = 1;

/// Key under which the live session is stored in a `KeyValueStore`.
pub const SAVE_KEY: &str = "ca-puzzle-game-state";

/// Format version written into every saved game.
pub const SAVE_FORMAT_VERSION: u32 = 1;

/// Saved sessions older than this are discarded on load.
pub const SAVE_EXPIRY_HOURS: i64 = 24;

/// Accuracy-percent thresholds for letter grades, best first.
pub const GRADE_THRESHOLDS: [u8; 7] = [97, 93, 90, 87, 83, 80, 70];

/// Key of the lifetime `PlayerStats` record.
pub const PLAYER_STATS_KEY: &str = "ca-puzzle-player-stats";

/// Key of the local leaderboard.
pub const LEADERBOARD_KEY: &str = "ca-puzzle-leaderboard";

/// Only the best entries are kept.
pub const LEADERBOARD_MAX_ENTRIES: usize = 100;

/// A finished game needs both of these to be ranked.
pub const LEADERBOARD_MIN_SCORE: u64 = 500;
pub const LEADERBOARD_MIN_ACCURACY: f64 = 0.5;

pub const ANONYMOUS_PLAYER: &str = "Anonymous";

/// Number of counties in California.
pub const CALIFORNIA_COUNTY_COUNT: usize = 58;
