//! Plinko headless runner
//!
//! Plays a number of rounds against the simulation core and prints a JSON
//! summary. Usage: `plinko-sim [settings.json] [rounds] [grid|pyramid]`

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use plinko_drop::GameSettings;
use plinko_drop::sim::{GameSession, LayoutKind, RoundStart, RoundStep, SessionStats, Weighting};

const DEFAULT_ROUNDS: u32 = 20;
/// Ticks before a round is considered stuck
const MAX_TICKS_PER_ROUND: u32 = 100_000;

#[derive(Serialize)]
struct Summary<'a> {
    layout: &'static str,
    weighting: Weighting,
    rounds_played: u32,
    final_balance: i64,
    stats: &'a SessionStats,
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Plinko (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => GameSettings::load(Path::new(&path)),
        None => GameSettings::default(),
    };
    let rounds = match args.next().map(|s| s.parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid round count: {}", e);
            return ExitCode::FAILURE;
        }
        None => DEFAULT_ROUNDS,
    };
    let layout = match args.next() {
        Some(name) => match LayoutKind::parse(&name) {
            Some(kind) => Some(kind),
            None => {
                log::error!("Unknown layout '{}', expected grid or pyramid", name);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut session = match GameSession::new(&settings) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(kind) = layout {
        if let Err(e) = session.set_layout_kind(kind) {
            log::error!("Cannot switch to {} layout: {}", kind.as_str(), e);
            return ExitCode::FAILURE;
        }
        log::info!("Layout: {}", kind.as_str());
    }

    let mut played = 0;
    for round in 1..=rounds {
        match session.start_round() {
            RoundStart::Started => {}
            RoundStart::InsufficientBalance { balance, stake } => {
                log::info!("Out of funds after {} rounds ({} < {})", played, balance, stake);
                break;
            }
            RoundStart::RoundInProgress => {
                log::error!("Round {} started while a ball is still falling", round);
                return ExitCode::FAILURE;
            }
        }

        let mut settled = false;
        for _ in 0..MAX_TICKS_PER_ROUND {
            match session.step() {
                RoundStep::Settled { slot, points, .. } => {
                    log::info!("Round {}: slot {} (+{})", round, slot, points);
                    settled = true;
                    break;
                }
                RoundStep::StillFalling(_) => {}
                RoundStep::Idle => break,
            }
        }
        if !settled {
            log::error!("Round {} did not settle", round);
            return ExitCode::FAILURE;
        }
        played += 1;
    }

    let summary = Summary {
        layout: session.config().kind.as_str(),
        weighting: session.weighting(),
        rounds_played: played,
        final_balance: session.balance(),
        stats: session.stats(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to write summary: {}", e);
            ExitCode::FAILURE
        }
    }
}
