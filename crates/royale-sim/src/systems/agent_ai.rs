//! Agent AI system: decision update and movement for every alive agent.
//!
//! Calls the agent FSM from royale-agent-ai with a plain-data view of the
//! agent's surroundings, writes the result back to ECS components, moves the
//! agent through the resolver, and spawns projectiles for fire intents.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

use royale_agent_ai::fsm::{evaluate, AgentContext, FireIntent};
use royale_agent_ai::perception::AgentSighting;
use royale_core::components::{AgentBrain, Collider, GroundContact, Health};
use royale_core::enums::{ProjectileOwner, TargetRef};
use royale_core::types::{Position, Velocity};
use royale_world::WorldMap;

use crate::systems::movement::resolve_motion;
use crate::world_setup;

/// Run the agent AI system. `registry` maps agent ids to entities.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    map: &WorldMap,
    registry: &[Entity],
    player: Option<Entity>,
    rng: &mut R,
    dt: f32,
) {
    let player_position = player.and_then(|e| alive_position(world, e));

    // Positions at the start of the pass; agents see each other as of then.
    let sightings: Vec<AgentSighting> = registry
        .iter()
        .enumerate()
        .filter_map(|(id, &entity)| {
            alive_position(world, entity).map(|position| AgentSighting {
                id: id as u32,
                position,
            })
        })
        .collect();

    let mut shots: Vec<(u32, FireIntent)> = Vec::new();

    for &entity in registry {
        let (brain, position) = {
            let Ok(mut query) = world.query_one::<(&AgentBrain, &Position, &Health)>(entity) else {
                continue;
            };
            let Some((brain, pos, health)) = query.get() else {
                continue;
            };
            if !health.alive {
                continue;
            }
            (brain.clone(), pos.0)
        };

        let target_position = brain.target.and_then(|target| match target {
            TargetRef::Player => player_position,
            TargetRef::Agent(id) => registry
                .get(id as usize)
                .and_then(|&e| alive_position(world, e)),
        });

        let ctx = AgentContext {
            id: brain.id,
            archetype: brain.archetype,
            state: brain.state,
            target: brain.target,
            target_position,
            position,
            patrol_point: brain.patrol_point,
            reposition_point: brain.reposition_point,
            timers: brain.timers,
            yaw: brain.yaw,
            player: player_position,
            agents: &sightings,
            arena_half_size: map.half_size(),
        };
        let update = evaluate(&ctx, rng);

        if update.state_changed {
            log::trace!(
                "agent {} {:?} -> {:?}",
                brain.id,
                brain.state,
                update.new_state
            );
        }
        if let Some(intent) = update.fire {
            shots.push((brain.id, intent));
        }

        let Ok((brain, pos, vel, collider, contact)) = world.query_one_mut::<(
            &mut AgentBrain,
            &mut Position,
            &mut Velocity,
            &Collider,
            &mut GroundContact,
        )>(entity) else {
            continue;
        };

        brain.state = update.new_state;
        brain.target = update.target;
        brain.patrol_point = update.patrol_point;
        brain.reposition_point = update.reposition_point;
        brain.timers = update.timers;
        brain.yaw = update.yaw;

        vel.0.x = update.move_velocity.x;
        vel.0.z = update.move_velocity.z;
        let result = resolve_motion(map, pos, vel, collider, dt);
        contact.on_ground = result.on_ground;
    }

    for (id, intent) in shots {
        world_setup::spawn_projectile(
            world,
            intent.origin,
            intent.direction,
            intent.speed,
            intent.damage,
            intent.range,
            ProjectileOwner::Agent(id),
        );
    }
}

/// Position of `entity` if it exists and is alive.
fn alive_position(world: &World, entity: Entity) -> Option<Vec3> {
    let health = world.get::<&Health>(entity).ok()?;
    if !health.alive {
        return None;
    }
    let position = world.get::<&Position>(entity).ok()?;
    Some(position.0)
}
