//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next update boundary. Each one
//! either succeeds or is a no-op when its precondition fails.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement ---
    /// Set the camera-relative movement vector (XZ, pre-normalized).
    Move { direction: Vec3 },
    /// Set the aim direction.
    Aim { direction: Vec3 },
    /// Jump if standing on something.
    Jump,

    // --- Combat ---
    /// Fire the equipped weapon. An empty magazine starts a reload instead.
    Fire,
    Reload,
    /// Equip the weapon in the given loadout slot.
    SwitchWeapon { slot: usize },
    ThrowGrenade,
    UseMedkit,

    // --- Match control ---
    /// Start a fresh match with the given population (player included).
    StartMatch { population: u32 },
    Pause,
    Resume,
}
