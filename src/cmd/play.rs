use crate::reports;
use clap::Args;
use countyforge::clock::Clock;
use countyforge::config::{Config, ScoringConfig};
use countyforge::consts::ANONYMOUS_PLAYER;
use countyforge::content::{derive_display_content, Roster};
use countyforge::game::{parse_script, GameEvent, GameStateMachine, Outcome, Phase};
use countyforge::persist::FileStore;
use countyforge::CfResult;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    #[command(flatten)]
    pub config: Config,

    /// Event script, one event per line (`start`, `place kern kern`, `tick 30`).
    #[arg(short, long)]
    pub script: PathBuf,

    /// Save the session here when the script ends. A finished game is also
    /// recorded into the player's stats and the leaderboard kept there.
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Name shown on the leaderboard.
    #[arg(long, default_value = ANONYMOUS_PLAYER)]
    pub player: String,

    /// Print the summary as JSON instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Feeds every event to the machine, counting those that took effect.
pub fn replay<C: Clock>(
    machine: &mut GameStateMachine<C>,
    events: Vec<GameEvent>,
) -> CfResult<usize> {
    let mut applied = 0;
    for event in events {
        let label = event.to_string();
        let outcome: Outcome = machine.dispatch(event)?;
        debug!(event = %label, ?outcome, phase = %machine.phase(), "dispatched");
        if outcome.is_applied() {
            applied += 1;
        }
    }
    Ok(applied)
}

pub fn run(args: &PlayArgs, scoring: ScoringConfig, roster: &Roster) -> CfResult<()> {
    let session = &args.config.session;
    let events = parse_script(&fs::read_to_string(&args.script)?)?;

    let counties = match session.shuffle_seed {
        Some(seed) => roster.shuffled(session.region, seed),
        None => roster.ids_in(session.region),
    };
    info!(
        counties = counties.len(),
        events = events.len(),
        "Replaying {}",
        args.script.display()
    );

    let mut machine = GameStateMachine::new(counties, scoring)?;
    machine.set_mode(session.mode);
    machine.set_difficulty(session.difficulty);

    let total_events = events.len();
    let applied = replay(&mut machine, events)?;
    info!(applied, ignored = total_events - applied, "script finished");

    let mut career = None;
    if let Some(dir) = &args.save_dir {
        let mut store = FileStore::new(dir);
        machine.save(&mut store)?;
        if machine.phase() == Phase::Completed {
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
    Ok(())
}
