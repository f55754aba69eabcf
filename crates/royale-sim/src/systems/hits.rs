//! Projectile hit resolution against combatants.
//!
//! Each projectile is tested along the segment it travelled this step, which
//! the ballistics pass cuts short at geometry, against fixed head and body
//! spheres (not the movement collider). Player projectiles only hit agents;
//! agent projectiles only hit the player.

use glam::Vec3;
use hecs::{Entity, World};

use royale_core::components::{Health, Projectile};
use royale_core::constants::*;
use royale_core::enums::ProjectileOwner;
use royale_core::events::MatchEvent;
use royale_core::state::MatchStats;
use royale_core::types::Position;

/// Where along a travelled segment a sphere was struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    /// Fraction of the segment, 0 at the start.
    pub t: f32,
    pub headshot: bool,
}

/// Parameter of the point on `start..end` closest to `center`, if that point
/// lies within `radius`.
pub fn segment_hits_sphere(start: Vec3, end: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let seg = end - start;
    let len_sq = seg.length_squared();
    let t = if len_sq > 0.0 {
        ((center - start).dot(seg) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = start + seg * t;
    (closest.distance_squared(center) <= radius * radius).then_some(t)
}

/// Test a travelled segment against a combatant centred at `body`.
/// The head sphere takes priority.
pub fn strike(start: Vec3, end: Vec3, body: Vec3) -> Option<Strike> {
    let head = body + Vec3::Y * HEAD_OFFSET;
    if let Some(t) = segment_hits_sphere(start, end, head, HEAD_HIT_RADIUS) {
        return Some(Strike { t, headshot: true });
    }
    segment_hits_sphere(start, end, body, BODY_HIT_RADIUS).map(|t| Strike { t, headshot: false })
}

/// Subtract `amount` from a living combatant. Returns true when this hit was
/// the killing blow.
pub fn apply_damage(health: &mut Health, amount: u32) -> bool {
    if !health.alive {
        return false;
    }
    health.current = health.current.saturating_sub(amount);
    debug_assert!(health.current <= health.max);
    if health.current == 0 {
        health.alive = false;
        return true;
    }
    false
}

/// Remove one agent from the alive count.
pub fn record_agent_elimination(stats: &mut MatchStats) {
    debug_assert!(stats.players_alive > 1, "the player is always counted while alive");
    stats.players_alive = stats.players_alive.saturating_sub(1);
}

struct Flight {
    entity: Entity,
    start: Vec3,
    end: Vec3,
    damage: u32,
    owner: ProjectileOwner,
}

fn collect_flights(world: &World, wanted: impl Fn(ProjectileOwner) -> bool) -> Vec<Flight> {
    world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (_, p))| wanted(p.owner))
        .map(|(entity, (pos, p))| Flight {
            entity,
            start: p.previous_position,
            end: pos.0,
            damage: p.damage,
            owner: p.owner,
        })
        .collect()
}

/// Player projectiles against alive agents. Each projectile hits at most the
/// first agent along its path and is consumed.
pub fn player_projectiles(
    world: &mut World,
    registry: &[Entity],
    stats: &mut MatchStats,
    events: &mut Vec<MatchEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let flights = collect_flights(world, |owner| owner == ProjectileOwner::Player);
    if flights.is_empty() {
        return;
    }

    let mut targets: Vec<(u32, Entity, Vec3)> = registry
        .iter()
        .enumerate()
        .filter_map(|(id, &entity)| {
            let health = world.get::<&Health>(entity).ok()?;
            let pos = world.get::<&Position>(entity).ok()?;
            health.alive.then_some((id as u32, entity, pos.0))
        })
        .collect();

    for flight in flights {
        let best = targets
            .iter()
            .enumerate()
            .filter_map(|(i, &(_, _, body))| strike(flight.start, flight.end, body).map(|s| (i, s)))
            .min_by(|a, b| a.1.t.total_cmp(&b.1.t));
        let Some((index, hit)) = best else {
            continue;
        };

        despawn_buffer.push(flight.entity);
        stats.shots_hit += 1;

        let (agent_id, agent, _) = targets[index];
        let damage = if hit.headshot {
            flight.damage * HEADSHOT_MULTIPLIER
        } else {
            flight.damage
        };
        let killed = match world.get::<&mut Health>(agent) {
            Ok(mut health) => apply_damage(&mut health, damage),
            Err(_) => false,
        };

        if killed {
            targets.swap_remove(index);
            stats.eliminations += 1;
            record_agent_elimination(stats);
            log::debug!(
                "player eliminated agent {}{}",
                agent_id,
                if hit.headshot { " (headshot)" } else { "" }
            );
            events.push(MatchEvent::PlayerEliminatedAgent {
                agent_id,
                headshot: hit.headshot,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Agent projectiles against the player. Returns the placement when the
/// player was eliminated this step.
pub fn agent_projectiles(
    world: &mut World,
    player: Entity,
    stats: &mut MatchStats,
    events: &mut Vec<MatchEvent>,
    despawn_buffer: &mut Vec<Entity>,
) -> Option<u32> {
    despawn_buffer.clear();

    let flights = collect_flights(world, |owner| owner != ProjectileOwner::Player);
    let body = {
        let health = world.get::<&Health>(player).ok()?;
        if !health.alive {
            return None;
        }
        world.get::<&Position>(player).ok()?.0
    };

    let mut placement = None;
    for flight in flights {
        let Some(hit) = strike(flight.start, flight.end, body) else {
            continue;
        };
        despawn_buffer.push(flight.entity);

        let source_agent = match flight.owner {
            ProjectileOwner::Agent(id) => Some(id),
            ProjectileOwner::Player => None,
        };
        let damage = if hit.headshot {
            flight.damage * HEADSHOT_MULTIPLIER
        } else {
            flight.damage
        };

        let Ok(mut health) = world.get::<&mut Health>(player) else {
            break;
        };
        let before = health.current;
        let killed = apply_damage(&mut health, damage);
        events.push(MatchEvent::PlayerDamaged {
            amount: before - health.current,
            remaining: health.current,
            source_agent,
        });

        if killed {
            debug_assert!(stats.players_alive > 1, "a lone player has already won");
            let place = stats.players_alive;
            stats.players_alive = stats.players_alive.saturating_sub(1);
            events.push(MatchEvent::PlayerEliminated {
                by_agent: source_agent,
                placement: place,
            });
            placement = Some(place);
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    placement
}
