//! Game loop thread: steps the engine against the wall clock and publishes
//! snapshots.
//!
//! The engine lives inside the thread. Commands arrive over an `mpsc`
//! channel; each frame's `dt` is the real time since the previous frame, and
//! the engine clamps it. The latest snapshot is stored in shared state for
//! polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use royale_core::config::SimConfig;
use royale_core::constants::TARGET_FRAME_RATE;
use royale_core::state::MatchSnapshot;
use royale_sim::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::state::GameLoopCommand;

/// Nominal duration of one frame.
pub(crate) const FRAME_DURATION: Duration =
    Duration::from_nanos(1_000_000_000 / TARGET_FRAME_RATE as u64);

/// Spawn the game loop on its own thread and start a match with
/// `config.population` combatants. With `autopilot`, the player is driven by
/// scripted input in addition to anything sent over the channel.
pub fn spawn_game_loop(
    config: SimConfig,
    autopilot: bool,
    latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("royale-game-loop".into())
        .spawn(move || {
            let pilot = autopilot.then(Autopilot::new);
            run_game_loop(config, pilot, cmd_rx, &latest_snapshot);
        })?;

    Ok(cmd_tx)
}

/// Runs until a Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    mut pilot: Option<Autopilot>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<MatchSnapshot>>,
) {
    let population = config.population;
    let mut engine = SimulationEngine::new(config);
    engine.start_match(population);

    let mut last_frame = Instant::now();
    let mut next_frame = last_frame;

    loop {
        // 1. Drain pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    log::debug!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Step by the real elapsed time
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32();
        last_frame = now;
        let snapshot = engine.update(dt);

        // 3. Scripted input for the next frame
        if let Some(pilot) = pilot.as_mut() {
            engine.queue_commands(pilot.plan(&snapshot, engine.map(), dt));
        }

        // 4. Publish
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next frame
        next_frame += FRAME_DURATION;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else if now - next_frame > FRAME_DURATION * 2 {
            // Too far behind; the engine clamps dt, so skip the backlog.
            next_frame = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use royale_core::commands::PlayerCommand;
    use royale_core::enums::MatchPhase;

    fn wait_for_snapshot(
        latest: &Mutex<Option<MatchSnapshot>>,
        accept: impl Fn(&MatchSnapshot) -> bool,
    ) -> Option<MatchSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(snap) = latest.lock().unwrap().as_ref() {
                if accept(snap) {
                    return Some(snap.clone());
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Fire))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Fire)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_frame_duration_constant() {
        assert_eq!(FRAME_DURATION.as_nanos(), 1_000_000_000u128 / 60);
    }

    #[test]
    fn test_loop_publishes_and_pauses() {
        let latest = Arc::new(Mutex::new(None));
        let config = SimConfig {
            population: 20,
            ..Default::default()
        };
        let tx = spawn_game_loop(config, false, latest.clone()).unwrap();

        let snap = wait_for_snapshot(&latest, |s| s.time.frame > 2).unwrap();
        assert_eq!(snap.phase, MatchPhase::Active);
        assert_eq!(snap.agents.len(), 19);

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        let paused = wait_for_snapshot(&latest, |s| s.phase == MatchPhase::Paused).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        let later = latest.lock().unwrap().clone().unwrap();
        assert_eq!(later.time.frame, paused.time.frame);

        tx.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_shutdown_closes_channel() {
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(SimConfig::default(), true, latest.clone()).unwrap();
        wait_for_snapshot(&latest, |_| true).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut closed = false;
        while Instant::now() < deadline {
            if tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Jump)).is_err() {
                closed = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(closed, "receiver should drop once the loop exits");
    }
}
