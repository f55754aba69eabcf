//! Simulation constants and tuning parameters.

// --- Timing ---

/// Default upper bound on a single step (seconds). Guards against tunnelling
/// after long pauses.
pub const DEFAULT_MAX_DT: f32 = 0.1;

/// Nominal frame rate of the headless driver (Hz).
pub const TARGET_FRAME_RATE: u32 = 60;

// --- Physics ---

/// Downward acceleration (units/s²).
pub const GRAVITY: f32 = 20.0;

/// Tolerance for vertical contact tests (units).
pub const CONTACT_EPSILON: f32 = 1e-3;

// --- World ---

/// Half the side length of the square arena.
pub const WORLD_HALF_SIZE: f32 = 100.0;

/// Thickness of the boundary walls.
pub const BOUNDARY_WALL_HALF_THICKNESS: f32 = 1.0;

/// Height of the boundary walls.
pub const BOUNDARY_WALL_HEIGHT: f32 = 12.0;

/// Default number of buildings placed at world generation.
pub const DEFAULT_BUILDING_COUNT: u32 = 30;

/// Default number of small crates placed at world generation.
pub const DEFAULT_CRATE_COUNT: u32 = 25;

/// No obstacle is generated within this distance of the player spawn.
pub const SPAWN_CLEAR_RADIUS: f32 = 15.0;

// --- Population ---

pub const DEFAULT_POPULATION: u32 = 100;

pub const MAX_POPULATION: u32 = 200;

/// Agents spawn at least this far from the player spawn.
pub const MIN_AGENT_SPAWN_DISTANCE: f32 = 20.0;

/// Random placement attempts before falling back to a corner.
pub const SPAWN_ATTEMPTS: u32 = 50;

/// Distance of the fallback corner from the boundary.
pub const SPAWN_FALLBACK_INSET: f32 = 5.0;

// --- Bodies ---

pub const PLAYER_RADIUS: f32 = 0.5;
pub const PLAYER_HEIGHT: f32 = 1.8;
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_MOVE_SPEED: f32 = 10.0;
pub const PLAYER_JUMP_SPEED: f32 = 8.0;

/// Muzzle height above the body centre.
pub const EYE_OFFSET: f32 = 0.6;

pub const AGENT_RADIUS: f32 = 0.5;
pub const AGENT_HEIGHT: f32 = 1.8;
pub const AGENT_MAX_HEALTH: u32 = 100;

// --- Hit spheres ---

/// Body sphere radius, centred on the entity position.
pub const BODY_HIT_RADIUS: f32 = 0.8;

/// Head sphere radius.
pub const HEAD_HIT_RADIUS: f32 = 0.35;

/// Head sphere centre above the entity position.
pub const HEAD_OFFSET: f32 = 0.75;

pub const HEADSHOT_MULTIPLIER: u32 = 2;

// --- Agent behaviour ---

/// Radius around the current position for new patrol points.
pub const PATROL_RADIUS: f32 = 20.0;

pub const PATROL_TIMER_MIN_SECS: f32 = 5.0;
pub const PATROL_TIMER_MAX_SECS: f32 = 10.0;

/// Horizontal distance at which a waypoint counts as reached.
pub const ARRIVAL_DISTANCE: f32 = 1.0;

/// Per-frame chance of targeting the nearest visible agent.
pub const AGENT_TARGET_PROBABILITY: f64 = 0.3;

pub const REPOSITION_TIMER_MIN_SECS: f32 = 2.0;
pub const REPOSITION_TIMER_MAX_SECS: f32 = 4.0;

/// Radius around the current position for strafe points while attacking.
pub const REPOSITION_RADIUS: f32 = 5.0;

// --- Attrition ---

/// Attrition stops once fewer than this many combatants remain.
pub const ATTRITION_FLOOR: u32 = 20;

/// Per-frame attrition probability is `players_alive / ATTRITION_DIVISOR`.
pub const ATTRITION_DIVISOR: f64 = 1000.0;

// --- Player equipment ---

pub const STARTING_MEDKITS: u32 = 2;
pub const MEDKIT_HEAL: u32 = 50;
pub const MEDKIT_COOLDOWN_SECS: f32 = 1.0;

pub const STARTING_GRENADES: u32 = 3;
pub const GRENADE_THROW_SPEED: f32 = 15.0;
/// Upward component added to the throw direction before normalizing.
pub const GRENADE_THROW_LOFT: f32 = 0.4;
pub const GRENADE_FUSE_SECS: f32 = 2.5;
pub const GRENADE_RADIUS: f32 = 6.0;
pub const GRENADE_MAX_DAMAGE: u32 = 100;
pub const GRENADE_COOLDOWN_SECS: f32 = 1.0;
