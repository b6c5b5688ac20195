use crate::reports;
use clap::Args;
use countyforge::config::ScoringConfig;
use countyforge::scorer::{
    calculate_accuracy_percent, determine_grade, GameStats, ScoreTier, ScoringEngine,
};
use countyforge::types::Difficulty;
use countyforge::CfResult;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub scoring: ScoringConfig,

    #[arg(long, default_value_t = 0)]
    pub correct: u32,

    #[arg(long, default_value_t = 0)]
    pub total: u32,

    #[arg(long, default_value_t = 0)]
    pub mistakes: u32,

    #[arg(long, default_value_t = 0)]
    pub hints: u32,

    /// Elapsed seconds.
    #[arg(long, default_value_t = 0.0)]
    pub time: f64,

    #[arg(long, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// Print the breakdown as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, scoring: &ScoringConfig) -> CfResult<()> {
    let stats = GameStats::builder()
        .correct_answers(args.correct)
        .total_questions(args.total)
        .mistakes(args.mistakes)
        .hints_used(args.hints)
        .time_elapsed_seconds(args.time)
        .difficulty(args.difficulty)
        .build();

    let engine = ScoringEngine::new(scoring.clone())?;
    let breakdown = engine.score(&stats);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    let percent = calculate_accuracy_percent(stats.correct_answers, stats.total_questions);
    reports::print_breakdown(&breakdown);
    reports::print_ratings(
        percent,
        determine_grade(percent),
        ScoreTier::for_score(breakdown.total_score),
        engine.max_possible_score(stats.total_questions, stats.difficulty),
    );
    Ok(())
}
