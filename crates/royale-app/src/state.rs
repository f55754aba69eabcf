//! State shared between the driver thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use royale_core::commands::PlayerCommand;
use royale_core::state::MatchSnapshot;

/// Messages accepted by the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Stop the loop and let the thread exit.
    Shutdown,
}

/// Handles owned by whoever drives a running game loop.
///
/// The sender sits behind a `Mutex` so the state can be shared across
/// threads; the snapshot slot is shared with the loop itself.
pub struct AppState {
    /// `None` until `start_simulation` succeeds.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, replaced by the loop after every update.
    pub latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
