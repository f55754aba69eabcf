//! Driver-facing controls for a background game loop.
//!
//! These bridge a caller holding an `AppState` to the game loop thread via
//! its command channel and the shared snapshot slot.

use royale_core::commands::PlayerCommand;
use royale_core::config::SimConfig;
use royale_core::state::MatchSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the game loop thread if it is not already running.
pub fn start_simulation(state: &AppState, config: SimConfig, autopilot: bool) -> Result<(), String> {
    let mut running = state.running.lock().map_err(|e| e.to_string())?;
    if *running {
        return Err("Simulation already running".into());
    }

    let cmd_tx = game_loop::spawn_game_loop(config, autopilot, state.latest_snapshot.clone())
        .map_err(|e| format!("Failed to spawn game loop: {}", e))?;

    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    *tx_lock = Some(cmd_tx);
    *running = true;
    Ok(())
}

/// Forward a player command to the running match.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), String> {
    let tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|e| format!("Failed to send command: {}", e)),
        None => Err("Simulation not started".into()),
    }
}

/// The most recent snapshot, if the loop has produced one.
pub fn get_snapshot(state: &AppState) -> Result<Option<MatchSnapshot>, String> {
    let lock = state.latest_snapshot.lock().map_err(|e| e.to_string())?;
    Ok(lock.clone())
}

/// Ask the loop to exit. The last snapshot stays readable.
pub fn stop_simulation(state: &AppState) -> Result<(), String> {
    let mut running = state.running.lock().map_err(|e| e.to_string())?;
    let mut tx_lock = state.command_tx.lock().map_err(|e| e.to_string())?;
    let Some(tx) = tx_lock.take() else {
        return Err("Simulation not started".into());
    };
    *running = false;
    // A loop that already exited has dropped its receiver; nothing to stop.
    let _ = tx.send(GameLoopCommand::Shutdown);
    Ok(())
}
