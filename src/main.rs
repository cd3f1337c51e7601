//! Burrow Snake headless runner
//!
//! Plays one autopilot session at simulated frame rate and prints the
//! outcome as JSON.

use std::process::ExitCode;

use burrow_snake::sim::TickInput;
use burrow_snake::{GameLoop, SessionConfig};
#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Simulated frame time (60 fps)
const FRAME_MS: f32 = 1000.0 / 60.0;
const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 10;

/// Run one autopilot session headlessly
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(name = "burrow-snake")]
#[command(about = "Headless autopilot runner for Burrow Snake", long_about = None)]
#[command(version)]
struct Args {
    /// Session bundle (JSON); defaults apply when omitted
    session: Option<std::path::PathBuf>,

    /// Stop after this many simulated frames
    #[arg(long)]
    max_frames: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.session {
        Some(path) => match SessionConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Cannot use session config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };
    let max_frames = args.max_frames.unwrap_or(DEFAULT_MAX_FRAMES);

    log::info!("Burrow Snake (headless) starting, seed {}", config.seed);
    let mut game = GameLoop::new(config);
    game.input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut outcome = None;
    for _ in 0..max_frames {
        outcome = game.advance(FRAME_MS);
        for event in game.drain_events() {
            log::debug!("audio: {}", event.name());
        }
        if outcome.is_some() {
            break;
        }
    }

    let report = match outcome {
        Some(outcome) => serde_json::to_string_pretty(&outcome),
        None => {
            log::info!(
                "Frame budget spent at tick {} with score {}",
                game.state.time_ticks,
                game.state.score
            );
            serde_json::to_string_pretty(&serde_json::json!({
                "score": game.state.score,
                "level": game.state.level,
                "bosses_defeated": game.state.bosses_defeated,
                "ticks": game.state.time_ticks,
                "finished": false,
            }))
        }
    };
    match report {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode outcome: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() -> ExitCode {
    // The library is embedded by a host page; there is nothing to run here
    ExitCode::SUCCESS
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_to_no_session() {
        let args = Args::try_parse_from(["burrow-snake"]).unwrap();
        assert!(args.session.is_none());
        assert!(args.max_frames.is_none());
    }

    #[test]
    fn test_args_session_and_frame_budget() {
        let args =
            Args::try_parse_from(["burrow-snake", "run.json", "--max-frames", "600"]).unwrap();
        assert_eq!(args.session, Some(std::path::PathBuf::from("run.json")));
        assert_eq!(args.max_frames, Some(600));
    }

    #[test]
    fn test_args_reject_bad_frame_count() {
        assert!(Args::try_parse_from(["burrow-snake", "--max-frames", "lots"]).is_err());
    }
}
