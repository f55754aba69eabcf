//! Entity spawn factories for setting up a match.
//!
//! Creates the player, the agent population, projectiles and grenades with
//! the appropriate component bundles.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

use royale_agent_ai::profiles::{archetype_for_index, get_profile};
use royale_core::components::*;
use royale_core::constants::*;
use royale_core::enums::*;
use royale_core::types::{horizontal_distance, Position, Velocity};
use royale_world::{fallback_corner, WorldMap};

use crate::weapons::Loadout;

/// Where the player starts every match.
pub fn player_spawn_point() -> Vec3 {
    Vec3::new(0.0, PLAYER_HEIGHT / 2.0, 0.0)
}

/// Spawn the player at the arena centre with full health and equipment.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        Player,
        Position(player_spawn_point()),
        Velocity::default(),
        Collider {
            radius: PLAYER_RADIUS,
            height: PLAYER_HEIGHT,
        },
        GroundContact::default(),
        Health {
            current: PLAYER_MAX_HEALTH,
            max: PLAYER_MAX_HEALTH,
            alive: true,
        },
        PlayerControl {
            move_intent: Vec3::ZERO,
            aim: Vec3::NEG_Z,
            jump_requested: false,
        },
        PlayerInventory {
            medkits: STARTING_MEDKITS,
            grenades: STARTING_GRENADES,
            medkit_cooldown: 0.0,
            grenade_cooldown: 0.0,
        },
        Loadout::standard(),
    ))
}

/// Spawn `count` agents. The returned registry is indexed by agent id.
pub fn spawn_agents<R: Rng + ?Sized>(
    world: &mut World,
    map: &WorldMap,
    rng: &mut R,
    count: u32,
) -> Vec<Entity> {
    let mut registry = Vec::with_capacity(count as usize);
    let mut fallbacks = 0;
    for id in 0..count {
        let position = match find_spawn_point(map, rng) {
            Some(p) => p,
            None => {
                fallbacks += 1;
                fallback_corner(map.half_size(), id) + Vec3::Y * (AGENT_HEIGHT / 2.0)
            }
        };
        registry.push(spawn_agent(world, rng, id, archetype_for_index(id), position));
    }

    if fallbacks > 0 {
        log::warn!(
            "{} of {} agents found no free spawn point and were placed in a corner",
            fallbacks,
            count
        );
    }
    registry
}

/// Random valid position at least `MIN_AGENT_SPAWN_DISTANCE` from the player
/// spawn, or `None` after `SPAWN_ATTEMPTS` failures.
pub fn find_spawn_point<R: Rng + ?Sized>(map: &WorldMap, rng: &mut R) -> Option<Vec3> {
    let limit = map.half_size() - SPAWN_FALLBACK_INSET;
    if limit <= 0.0 {
        return None;
    }
    let spawn = player_spawn_point();
    (0..SPAWN_ATTEMPTS).find_map(|_| {
        let candidate = Vec3::new(
            rng.gen_range(-limit..limit),
            AGENT_HEIGHT / 2.0,
            rng.gen_range(-limit..limit),
        );
        let far_enough = horizontal_distance(candidate, spawn) >= MIN_AGENT_SPAWN_DISTANCE;
        (far_enough && map.is_position_valid(candidate, AGENT_RADIUS)).then_some(candidate)
    })
}

/// Spawn a single agent in the Patrolling state.
pub fn spawn_agent<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    id: u32,
    archetype: AgentArchetype,
    position: Vec3,
) -> Entity {
    let profile = get_profile(archetype);
    let brain = AgentBrain {
        id,
        archetype,
        state: DecisionState::Patrolling,
        target: None,
        patrol_point: None,
        reposition_point: None,
        yaw: rng.gen_range(0.0..std::f32::consts::TAU),
        timers: AgentTimers {
            patrol: rng.gen_range(PATROL_TIMER_MIN_SECS..=PATROL_TIMER_MAX_SECS),
            attack: 0.0,
            // No shot before a full interval has passed.
            fire_cooldown: profile.fire_interval(),
        },
    };

    world.spawn((
        Position(position),
        Velocity::default(),
        Collider {
            radius: AGENT_RADIUS,
            height: AGENT_HEIGHT,
        },
        GroundContact::default(),
        Health {
            current: AGENT_MAX_HEALTH,
            max: AGENT_MAX_HEALTH,
            alive: true,
        },
        brain,
    ))
}

/// Spawn a projectile. Lifetime is `range / speed`.
pub fn spawn_projectile(
    world: &mut World,
    origin: Vec3,
    direction: Vec3,
    speed: f32,
    damage: u32,
    range: f32,
    owner: ProjectileOwner,
) -> Entity {
    world.spawn((
        Position(origin),
        Projectile {
            direction,
            speed,
            damage,
            remaining_lifetime: range / speed,
            owner,
            previous_position: origin,
            spent: false,
        },
    ))
}

/// Spawn a live grenade with the default fuse and blast.
pub fn spawn_grenade(world: &mut World, origin: Vec3, velocity: Vec3) -> Entity {
    world.spawn((
        Position(origin),
        Velocity(velocity),
        Grenade {
            fuse_remaining: GRENADE_FUSE_SECS,
            resting: false,
            max_damage: GRENADE_MAX_DAMAGE,
            radius: GRENADE_RADIUS,
        },
    ))
}
