use clap::{CommandFactory, FromArgMatches, Parser};
use countyforge::config::{Config, ScoringConfig};
use countyforge::types::{Difficulty, GameMode, Region};
use countyforge::CountyForgeError;
use std::io::Write;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("countyforge").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

fn write_json(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_cli_defaults_match_reference_config() {
    let (cli, _) = parse(&[]);
    assert_eq!(cli.config.scoring, ScoringConfig::default());
    assert_eq!(cli.config.session.mode, GameMode::Practice);
    assert_eq!(cli.config.session.difficulty, Difficulty::Medium);
    assert_eq!(cli.config.session.region, None);
}

#[test]
fn test_cli_flags() {
    let (cli, _) = parse(&[
        "--base-score",
        "250",
        "--multiplier-hard",
        "2.0",
        "--mode",
        "challenge",
        "--difficulty",
        "hard",
        "--region",
        "bay_area",
        "--shuffle-seed",
        "9",
    ]);
    assert_eq!(cli.config.scoring.base_score, 250.0);
    assert_eq!(cli.config.scoring.difficulty_multiplier.hard, 2.0);
    assert_eq!(cli.config.session.mode, GameMode::Challenge);
    assert_eq!(cli.config.session.difficulty, Difficulty::Hard);
    assert_eq!(cli.config.session.region, Some(Region::BayArea));
    assert_eq!(cli.config.session.shuffle_seed, Some(9));
}

#[test]
fn test_load_partial_file_fills_defaults() {
    let file = write_json(r#"{ "baseScore": 40, "difficultyMultiplier": { "hard": 3.0 } }"#);
    let config = ScoringConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.base_score, 40.0);
    assert_eq!(config.hint_penalty, 10.0);
    assert_eq!(config.difficulty_multiplier.hard, 3.0);
    assert_eq!(config.difficulty_multiplier.easy, 0.8);
}

#[test]
fn test_explicit_flags_override_file() {
    let file = write_json(r#"{ "baseScore": 40, "hintPenalty": 1 }"#);
    let mut config = ScoringConfig::load_from_file(file.path()).unwrap();

    let (cli, matches) = parse(&["--hint-penalty", "33", "--multiplier-easy", "0.5"]);
    config.merge_from_cli(&cli.config.scoring, &matches);

    // Not passed on the command line: file value survives over the CLI default.
    assert_eq!(config.base_score, 40.0);
    assert_eq!(config.hint_penalty, 33.0);
    assert_eq!(config.difficulty_multiplier.easy, 0.5);
    assert_eq!(config.difficulty_multiplier.medium, 1.0);
}

#[test]
fn test_invalid_values_are_rejected() {
    let negative = write_json(r#"{ "mistakePenalty": -5 }"#);
    assert!(matches!(
        ScoringConfig::load_from_file(negative.path()),
        Err(CountyForgeError::InvalidConfig(_))
    ));

    let zero_multiplier = ScoringConfig {
        difficulty_multiplier: countyforge::config::DifficultyMultipliers {
            medium: 0.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(zero_multiplier.validate().is_err());

    let not_json = write_json("baseScore = 1");
    assert!(matches!(
        ScoringConfig::load_from_file(not_json.path()),
        Err(CountyForgeError::Json(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    assert!(matches!(
        ScoringConfig::load_from_file("does/not/exist.json"),
        Err(CountyForgeError::Io(_))
    ));
}
