//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Upright box/cylinder proxy used for movement against static geometry.
/// The entity `Position` is the centre of this volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
    pub height: f32,
}

/// Hit points. `current` stays within `0..=max`; `alive` flips to false once
/// and never back during a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    pub alive: bool,
}

/// Whether the last movement step ended resting on ground or a roof.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GroundContact {
    pub on_ground: bool,
}

/// Marks the human-controlled entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Latest control input for the player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerControl {
    /// Camera-relative, pre-normalized XZ movement vector.
    pub move_intent: Vec3,
    /// Unit aim direction.
    pub aim: Vec3,
    /// Set by a jump command, consumed by the next movement step.
    pub jump_requested: bool,
}

/// Consumables carried by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerInventory {
    pub medkits: u32,
    pub grenades: u32,
    pub medkit_cooldown: f32,
    pub grenade_cooldown: f32,
}

/// Countdown timers owned by an agent (seconds, elapsed at <= 0).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AgentTimers {
    pub patrol: f32,
    pub attack: f32,
    pub fire_cooldown: f32,
}

/// Decision state for an autonomous agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentBrain {
    /// Stable index into the engine's agent registry.
    pub id: u32,
    pub archetype: AgentArchetype,
    pub state: DecisionState,
    /// Current target. Must name a live combatant; cleared otherwise.
    pub target: Option<TargetRef>,
    pub patrol_point: Option<Vec3>,
    /// Strafe destination while attacking.
    pub reposition_point: Option<Vec3>,
    /// Facing in radians.
    pub yaw: f32,
    pub timers: AgentTimers,
}

/// A straight-flying projectile. Position lives on the `Position` component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Unit flight direction.
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
    /// Seconds left before the projectile expires (range / speed at spawn).
    pub remaining_lifetime: f32,
    pub owner: ProjectileOwner,
    /// Where this step's flight began; hits are swept from here to `Position`.
    pub previous_position: Vec3,
    /// Hit geometry or ran out of range this step. Culled after hit tests.
    pub spent: bool,
}

/// A thrown grenade. Moves ballistically until it comes to rest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Grenade {
    pub fuse_remaining: f32,
    pub resting: bool,
    pub max_damage: u32,
    pub radius: f32,
}
