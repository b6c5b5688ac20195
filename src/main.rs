use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use countyforge::config::ScoringConfig;
use countyforge::content::Roster;
use countyforge::CfResult;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// County roster CSV. The bundled California roster is used when omitted.
    #[arg(global = true, short, long)]
    roster: Option<String>,

    /// Scoring config JSON. Flags given on the command line override it.
    #[arg(global = true, short, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a statistics snapshot.
    Score(cmd::score::ScoreArgs),
    /// Replay an event script against a fresh session.
    Play(cmd::play::PlayArgs),
    /// Load a saved session, optionally continue it, and report on it.
    Resume(cmd::resume::ResumeArgs),
    /// Show lifetime player stats, achievements and the leaderboard.
    Stats(cmd::stats::StatsArgs),
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File config as the base, explicit CLI flags on top.
fn resolve_scoring(
    path: Option<&str>,
    cli_scoring: &ScoringConfig,
    sub_matches: &ArgMatches,
) -> CfResult<ScoringConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading scoring config from {}", path);
            let mut file_config = ScoringConfig::load_from_file(path)?;
            file_config.merge_from_cli(cli_scoring, sub_matches);
            file_config
        }
        None => cli_scoring.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn load_roster(path: Option<&str>) -> CfResult<Roster> {
    let roster = match path {
        Some(path) => Roster::load_from_csv(path)?,
        None => Roster::california()?,
    };
    if roster.is_empty() {
        warn!("Roster is empty; sessions will complete immediately");
    }
    Ok(roster)
}

fn run(cli: Cli, matches: &ArgMatches) -> CfResult<()> {
    let Some((_, sub_matches)) = matches.subcommand() else {
        return Ok(());
    };
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Score(args) => {
            let scoring = resolve_scoring(config_path, &args.scoring, sub_matches)?;
            cmd::score::run(&args, &scoring)
        }
        Commands::Play(args) => {
            let scoring = resolve_scoring(config_path, &args.config.scoring, sub_matches)?;
            let roster = load_roster(cli.roster.as_deref())?;
            cmd::play::run(&args, scoring, &roster)
        }
        Commands::Resume(args) => {
            let scoring = resolve_scoring(config_path, &args.scoring, sub_matches)?;
            let roster = load_roster(cli.roster.as_deref())?;
            cmd::resume::run(&args, scoring, &roster)
        }
        Commands::Stats(args) => cmd::stats::run(&args),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    if let Err(e) = run(cli, &matches) {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
