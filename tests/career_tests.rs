mod common;

use chrono::{TimeZone, Utc};
use common::{id, ids, numbered_ids, started, CALIFORNIA_SAMPLE};
use countyforge::career::{Leaderboard, PlayerStats};
use countyforge::clock::ManualClock;
use countyforge::config::ScoringConfig;
use countyforge::consts::{LEADERBOARD_KEY, PLAYER_STATS_KEY};
use countyforge::game::{Achievement, GameStateMachine};
use countyforge::persist::{FileStore, KeyValueStore, MemoryStore};
use countyforge::types::{CountyId, Difficulty, GameMode, Region};
use strum::IntoEnumIterator;

fn noon() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

fn cleared(
    counties: Vec<CountyId>,
    difficulty: Difficulty,
    clock: &ManualClock,
) -> GameStateMachine<&ManualClock> {
    let mut m = GameStateMachine::with_clock(counties.clone(), ScoringConfig::default(), clock)
        .unwrap();
    m.set_difficulty(difficulty);
    m.start_game();
    for county in &counties {
        m.place_county(county, county).unwrap();
    }
    m
}

#[test]
fn test_unfinished_game_is_not_recorded() {
    let m = started(ids(&CALIFORNIA_SAMPLE), GameMode::Practice, Difficulty::Medium);
    let mut store = MemoryStore::new();
    assert!(m.record_career(&mut store, "ada", &[]).unwrap().is_none());
    assert_eq!(store.get(PLAYER_STATS_KEY).unwrap(), None);
    assert_eq!(store.get(LEADERBOARD_KEY).unwrap(), None);
}

#[test]
fn test_career_accumulates_across_games() {
    let dir = tempfile::tempdir().unwrap();
    let clock = noon();
    let mut store = FileStore::new(dir.path());

    let m = cleared(ids(&CALIFORNIA_SAMPLE), Difficulty::Medium, &clock);
    let score = m.summary().breakdown.total_score;
    let first = m
        .record_career(&mut store, "Ada", &[Region::Southern])
        .unwrap()
        .unwrap();
    assert!(first.qualified);
    assert_eq!(first.rank, Some(1));
    assert_eq!(
        first.newly_unlocked,
        vec![
            Achievement::FirstSteps,
            Achievement::GettingStarted,
            Achievement::NoHintsNeeded,
            Achievement::Perfectionist,
        ]
    );

    let second = cleared(ids(&CALIFORNIA_SAMPLE), Difficulty::Medium, &clock)
        .record_career(&mut store, "ada", &[Region::Southern])
        .unwrap()
        .unwrap();
    assert!(second.newly_unlocked.is_empty());
    assert_eq!(second.rank, Some(2));

    let reopened = FileStore::new(dir.path());
    let stats = PlayerStats::load(&reopened).unwrap();
    assert_eq!(stats, second.stats);
    assert_eq!(stats.games_played, 2);
    assert_eq!(stats.total_score, score * 2);
    assert_eq!(stats.personal_best(Difficulty::Medium), score);
    assert_eq!(stats.counties_learned.len(), CALIFORNIA_SAMPLE.len());
    // 10 + 25 + 300 + 600
    assert_eq!(stats.achievement_points(), 935);

    let board = Leaderboard::load(&reopened).unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board.rank_of("ADA"), Some(1));
    assert_eq!(board.top_by_difficulty(Difficulty::Medium, 1).len(), 1);
    assert!(board.top_by_difficulty(Difficulty::Hard, 10).is_empty());
}

#[test]
fn test_weak_game_updates_stats_but_not_the_board() {
    let clock = noon();
    let mut m =
        GameStateMachine::with_clock(ids(&["orange", "kern"]), ScoringConfig::default(), &clock)
            .unwrap();
    m.start_game();
    m.place_county(&id("orange"), &id("kern")).unwrap();
    m.end_game();

    let mut store = MemoryStore::new();
    let update = m.record_career(&mut store, "", &[]).unwrap().unwrap();
    assert!(!update.qualified);
    assert_eq!(update.rank, None);
    assert_eq!(update.stats.games_played, 1);
    assert!(update.stats.regions_cleared.is_empty());
    assert!(Leaderboard::load(&store).unwrap().is_empty());
}

#[test]
fn test_learning_every_county_unlocks_career_achievements() {
    let clock = noon();
    let mut store = MemoryStore::new();
    let every: Vec<Region> = Region::iter().collect();
    let update = cleared(numbered_ids(58), Difficulty::Hard, &clock)
        .record_career(&mut store, "Ada", &every)
        .unwrap()
        .unwrap();

    for expected in [
        Achievement::OnFire,
        Achievement::StreakLegend,
        Achievement::UltimateStreak,
        Achievement::FlawlessVictory,
        Achievement::QuickLearner,
        Achievement::Scholar,
        Achievement::CountyMaster,
        Achievement::CaliforniaLegend,
    ] {
        assert!(update.newly_unlocked.contains(&expected), "missing {}", expected);
    }
    assert!(!update.newly_unlocked.contains(&Achievement::CaliforniaExplorer));
    assert!(!update.newly_unlocked.contains(&Achievement::AchievementHunter));
    assert!(update.stats.has_cleared_every_region(Difficulty::Hard));
}
