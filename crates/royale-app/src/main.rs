use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;

use royale_app::headless::{self, MatchReport};
use royale_app::state::AppState;
use royale_app::{control, logging};
use royale_core::config::{ConfigError, SimConfig};
use royale_core::constants::TARGET_FRAME_RATE;
use royale_core::enums::MatchPhase;

/// Headless battle-royale arena simulation
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON match config; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Combatants at match start, the player included
    #[arg(short, long)]
    population: Option<u32>,

    /// RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many 60 Hz frames
    #[arg(short, long, default_value_t = 36_000)]
    frames: u64,

    /// Run against the wall clock on a game loop thread
    #[arg(long)]
    realtime: bool,

    /// Leave the player idle instead of scripting its input
    #[arg(long)]
    no_autopilot: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "seed {}, {} combatants, attrition {}",
        config.seed,
        config.population,
        if config.attrition { "on" } else { "off" }
    );

    let autopilot = !args.no_autopilot;
    let report = if args.realtime {
        match run_realtime(config, args.frames, autopilot) {
            Ok(report) => report,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        headless::run_match(config, args.frames, autopilot)
    };

    print_report(&report, args.json);
    ExitCode::SUCCESS
}

fn build_config(args: &Args) -> Result<SimConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(population) = args.population {
        config.population = population;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

/// Run on the game loop thread until the match ends or the frame budget's
/// worth of wall time has passed.
fn run_realtime(config: SimConfig, frames: u64, autopilot: bool) -> Result<MatchReport, String> {
    let seed = config.seed;
    let state = AppState::new();
    control::start_simulation(&state, config, autopilot)?;

    let limit = Duration::from_secs_f64(frames as f64 / TARGET_FRAME_RATE as f64);
    let started = Instant::now();
    let mut last_alive = None;
    let mut report = None;

    while started.elapsed() < limit {
        std::thread::sleep(Duration::from_millis(250));
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };
        if last_alive != Some(snapshot.stats.players_alive) {
            last_alive = Some(snapshot.stats.players_alive);
            log::info!(
                "{:>6.1}s  {} alive, {} eliminations, health {}",
                snapshot.time.elapsed_secs,
                snapshot.stats.players_alive,
                snapshot.stats.eliminations,
                snapshot.player.health
            );
        }
        let over = snapshot.phase == MatchPhase::Over;
        report = Some(snapshot);
        if over {
            break;
        }
    }

    control::stop_simulation(&state)?;
    let snapshot = report.ok_or("game loop produced no snapshot")?;
    // Events drain every frame, so tallies only cover the last snapshot.
    let mut summary = MatchReport::from_seed(seed);
    summary.record(&snapshot);
    Ok(summary)
}

fn print_report(report: &MatchReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{}", text),
            Err(e) => log::error!("failed to encode report: {}", e),
        }
        return;
    }

    println!("=== ROYALE: seed {} ===", report.seed);
    println!(
        "  {} frames, {:.1}s simulated, phase {:?}",
        report.frames, report.elapsed_secs, report.phase
    );
    match report.outcome {
        Some(outcome) => println!("  outcome: {:?}", outcome),
        None => println!("  outcome: still running"),
    }
    println!(
        "  eliminations {}, shots {}/{}, players alive {}",
        report.stats.eliminations,
        report.stats.shots_hit,
        report.stats.shots_fired,
        report.stats.players_alive
    );
    println!(
        "  attrition losses {}, damage taken {}",
        report.attrition_losses, report.damage_taken
    );
}
