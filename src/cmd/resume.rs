use crate::cmd::play::replay;
use crate::reports;
use clap::Args;
use countyforge::clock::SystemClock;
use countyforge::config::ScoringConfig;
use countyforge::content::{derive_display_content, Roster};
use countyforge::consts::ANONYMOUS_PLAYER;
use countyforge::game::{parse_script, GameStateMachine, Phase};
use countyforge::persist::{clear_saved_game, FileStore};
use countyforge::CfResult;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ResumeArgs {
    #[command(flatten)]
    pub scoring: ScoringConfig,

    /// Directory the session was saved to.
    #[arg(long)]
    pub save_dir: PathBuf,

    /// More events to apply before reporting; the result is saved back.
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Leaderboard name, used when the continued session finishes.
    #[arg(long, default_value = ANONYMOUS_PLAYER)]
    pub player: String,

    /// Delete the saved session afterwards.
    #[arg(long, default_value_t = false)]
    pub clear: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ResumeArgs, scoring: ScoringConfig, roster: &Roster) -> CfResult<()> {
    let mut store = FileStore::new(&args.save_dir);

    let Some(mut machine) = GameStateMachine::load(&mut store, scoring, SystemClock)? else {
        println!("No saved game in {}", args.save_dir.display());
        return Ok(());
    };

    let mut career = None;
    if let Some(script) = &args.script {
        let was_completed = machine.phase() == Phase::Completed;
        let events = parse_script(&fs::read_to_string(script)?)?;
        let applied = replay(&mut machine, events)?;
        info!(applied, "continued saved session");
        machine.save(&mut store)?;
        // A save that was already finished has been recorded by the run that finished it.
        if !was_completed && machine.phase() == Phase::Completed {
            let cleared = roster.regions_cleared(machine.state());
            career = machine.record_career(&mut store, &args.player, &cleared)?;
        }
    }

    let summary = machine.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        reports::print_display(&derive_display_content(machine.state(), roster));
        reports::print_summary(&summary);
        if let Some(update) = &career {
            reports::print_career_update(update);
        }
    }

    if args.clear {
        clear_saved_game(&mut store)?;
    }
    Ok(())
}
