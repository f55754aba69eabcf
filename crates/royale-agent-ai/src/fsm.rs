//! Agent decision finite state machine.
//!
//! Pure functions that compute state transitions, movement intent and fire
//! intent for one agent from a snapshot of its surroundings. No ECS
//! dependency; the caller resolves targets and applies the result.

use glam::Vec3;
use rand::Rng;

use royale_core::components::AgentTimers;
use royale_core::constants::*;
use royale_core::enums::{AgentArchetype, DecisionState, TargetRef};
use royale_core::types::{horizontal_direction, horizontal_distance, yaw_towards};

use crate::perception::{detect_player, nearest_agent, AgentSighting, Contact};
use crate::profiles::{get_profile, AgentProfile};

/// Input to the agent FSM for a single entity.
pub struct AgentContext<'a> {
    pub id: u32,
    pub archetype: AgentArchetype,
    pub state: DecisionState,
    pub target: Option<TargetRef>,
    /// Current position of `target`, or `None` if it is missing or dead.
    pub target_position: Option<Vec3>,
    pub position: Vec3,
    pub patrol_point: Option<Vec3>,
    pub reposition_point: Option<Vec3>,
    pub timers: AgentTimers,
    pub yaw: f32,
    /// Player position, `None` once the player is dead.
    pub player: Option<Vec3>,
    /// Every alive agent, the evaluating one included.
    pub agents: &'a [AgentSighting],
    /// Waypoints are kept inside this half size (minus an inset).
    pub arena_half_size: f32,
}

/// Request to spawn a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireIntent {
    pub origin: Vec3,
    /// Unit direction, spread already applied.
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
    pub range: f32,
}

/// Output from the agent FSM.
#[derive(Debug, Clone)]
pub struct AgentUpdate {
    pub new_state: DecisionState,
    pub target: Option<TargetRef>,
    pub patrol_point: Option<Vec3>,
    pub reposition_point: Option<Vec3>,
    pub timers: AgentTimers,
    pub yaw: f32,
    /// Desired horizontal velocity. Y is always zero; gravity is the resolver's job.
    pub move_velocity: Vec3,
    pub fire: Option<FireIntent>,
    pub state_changed: bool,
}

/// Evaluate the FSM for one alive agent.
pub fn evaluate<R: Rng + ?Sized>(ctx: &AgentContext, rng: &mut R) -> AgentUpdate {
    let profile = get_profile(ctx.archetype);
    let mut update = AgentUpdate {
        new_state: ctx.state,
        target: ctx.target,
        patrol_point: ctx.patrol_point,
        reposition_point: ctx.reposition_point,
        timers: ctx.timers,
        yaw: ctx.yaw,
        move_velocity: Vec3::ZERO,
        fire: None,
        state_changed: false,
    };

    let focus = transition(ctx, &profile, &mut update, rng);

    match update.new_state {
        DecisionState::Patrolling => patrol(ctx, &profile, &mut update, rng),
        DecisionState::Chasing => chase(ctx, &profile, focus, &mut update),
        DecisionState::Attacking => attack(ctx, &profile, focus, &mut update, rng),
    }

    update.state_changed = update.new_state != ctx.state;
    update
}

/// Apply the transition rules in priority order. Returns the position of the
/// target to act on, if any.
fn transition<R: Rng + ?Sized>(
    ctx: &AgentContext,
    profile: &AgentProfile,
    update: &mut AgentUpdate,
    rng: &mut R,
) -> Option<Vec3> {
    if let Some(contact) = detect_player(ctx.position, ctx.player, profile.detection_range) {
        engage(update, &contact, profile);
        return Some(contact.position);
    }

    if let Some(contact) = nearest_agent(ctx.id, ctx.position, ctx.agents, profile.detection_range)
    {
        if rng.gen_bool(AGENT_TARGET_PROBABILITY) {
            engage(update, &contact, profile);
            return Some(contact.position);
        }
    }

    if ctx.timers.patrol <= 0.0 {
        update.patrol_point = Some(random_point(ctx, PATROL_RADIUS, rng));
        update.timers.patrol = rng.gen_range(PATROL_TIMER_MIN_SECS..=PATROL_TIMER_MAX_SECS);
        fall_back_to_patrol(update);
        return None;
    }

    match ctx.target.zip(ctx.target_position) {
        Some((_, position)) => Some(position),
        None => {
            fall_back_to_patrol(update);
            None
        }
    }
}

fn engage(update: &mut AgentUpdate, contact: &Contact, profile: &AgentProfile) {
    update.target = Some(contact.target);
    update.new_state = if contact.distance < profile.attack_range {
        DecisionState::Attacking
    } else {
        DecisionState::Chasing
    };
}

fn fall_back_to_patrol(update: &mut AgentUpdate) {
    update.target = None;
    update.reposition_point = None;
    update.new_state = DecisionState::Patrolling;
}

fn patrol<R: Rng + ?Sized>(
    ctx: &AgentContext,
    profile: &AgentProfile,
    update: &mut AgentUpdate,
    rng: &mut R,
) {
    let mut point = match update.patrol_point {
        Some(p) => p,
        None => random_point(ctx, PATROL_RADIUS, rng),
    };

    if horizontal_distance(ctx.position, point) < ARRIVAL_DISTANCE {
        point = random_point(ctx, PATROL_RADIUS, rng);
        update.timers.patrol = rng.gen_range(PATROL_TIMER_MIN_SECS..=PATROL_TIMER_MAX_SECS);
    }
    update.patrol_point = Some(point);

    let dir = horizontal_direction(ctx.position, point);
    update.move_velocity = dir * profile.move_speed * 0.5;
    if dir != Vec3::ZERO {
        update.yaw = yaw_towards(ctx.position, point);
    }
}

fn chase(
    ctx: &AgentContext,
    profile: &AgentProfile,
    focus: Option<Vec3>,
    update: &mut AgentUpdate,
) {
    let Some(target) = focus else {
        fall_back_to_patrol(update);
        return;
    };

    update.yaw = yaw_towards(ctx.position, target);
    if ctx.position.distance(target) < profile.attack_range {
        // Opens fire from the next evaluation.
        update.new_state = DecisionState::Attacking;
        return;
    }
    update.move_velocity = horizontal_direction(ctx.position, target) * profile.move_speed;
}

fn attack<R: Rng + ?Sized>(
    ctx: &AgentContext,
    profile: &AgentProfile,
    focus: Option<Vec3>,
    update: &mut AgentUpdate,
    rng: &mut R,
) {
    let Some(target) = focus else {
        fall_back_to_patrol(update);
        return;
    };

    update.yaw = yaw_towards(ctx.position, target);

    if ctx.position.distance(target) >= profile.attack_range {
        update.new_state = DecisionState::Chasing;
        update.reposition_point = None;
        update.move_velocity = horizontal_direction(ctx.position, target) * profile.move_speed;
        return;
    }

    if update.timers.attack <= 0.0 {
        update.reposition_point = Some(random_point(ctx, REPOSITION_RADIUS, rng));
        update.timers.attack =
            rng.gen_range(REPOSITION_TIMER_MIN_SECS..=REPOSITION_TIMER_MAX_SECS);
    }

    if let Some(point) = update.reposition_point {
        if horizontal_distance(ctx.position, point) < ARRIVAL_DISTANCE {
            update.reposition_point = None;
        } else {
            update.move_velocity =
                horizontal_direction(ctx.position, point) * profile.move_speed * 0.5;
        }
    }

    if update.timers.fire_cooldown <= 0.0 {
        let origin = ctx.position + Vec3::Y * EYE_OFFSET;
        if let Some(direction) = aim_with_spread(origin, target, profile.spread, rng) {
            update.fire = Some(FireIntent {
                origin,
                direction,
                speed: profile.projectile_speed,
                damage: profile.damage,
                range: profile.projectile_range,
            });
            update.timers.fire_cooldown = profile.fire_interval();
        }
    }
}

/// Unit direction from `origin` toward `target`, perturbed by up to `spread`
/// per axis before normalization. `None` if the points coincide.
pub fn aim_with_spread<R: Rng + ?Sized>(
    origin: Vec3,
    target: Vec3,
    spread: f32,
    rng: &mut R,
) -> Option<Vec3> {
    let base = (target - origin).normalize_or_zero();
    if base == Vec3::ZERO {
        return None;
    }
    let spread = spread.abs();
    let deviation = Vec3::new(
        rng.gen_range(-spread..=spread),
        rng.gen_range(-spread..=spread),
        rng.gen_range(-spread..=spread),
    );
    let dir = (base + deviation).normalize_or_zero();
    (dir != Vec3::ZERO).then_some(dir)
}

/// Random waypoint within `radius` of the agent, kept inside the arena.
/// Never closer than twice the arrival distance, so it is not reached on pick.
fn random_point<R: Rng + ?Sized>(ctx: &AgentContext, radius: f32, rng: &mut R) -> Vec3 {
    let min_dist = 2.0 * ARRIVAL_DISTANCE;
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let dist = rng.gen_range(min_dist..=radius.max(min_dist));
    let limit = (ctx.arena_half_size - SPAWN_FALLBACK_INSET).max(0.0);
    Vec3::new(
        (ctx.position.x + angle.cos() * dist).clamp(-limit, limit),
        ctx.position.y,
        (ctx.position.z + angle.sin() * dist).clamp(-limit, limit),
    )
}
