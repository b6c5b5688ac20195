use crate::reports;
use clap::Args;
use countyforge::career::{Leaderboard, PlayerStats};
use countyforge::persist::FileStore;
use countyforge::types::Difficulty;
use countyforge::CfResult;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Directory games were saved to with `play --save-dir`.
    #[arg(long)]
    pub save_dir: PathBuf,

    /// Only show leaderboard entries of this difficulty.
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &StatsArgs) -> CfResult<()> {
    let store = FileStore::new(&args.save_dir);
    let stats = PlayerStats::load(&store)?;
    let board = Leaderboard::load(&store)?;

    let top = match args.difficulty {
        Some(difficulty) => board.top_by_difficulty(difficulty, args.limit),
        None => board.entries().iter().take(args.limit).collect(),
    };

    if args.json {
        let report = json!({ "stats": stats, "leaderboard": top });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reports::print_player_stats(&stats);
    reports::print_leaderboard(&top);
    Ok(())
}
