//! Procedural obstacle layout.
//!
//! Boundary walls enclose the square arena; buildings and crates are
//! scattered inside it, keeping the player spawn and the fallback spawn
//! corners clear.

use glam::Vec3;
use rand::Rng;

use royale_core::config::WorldGenConfig;
use royale_core::constants::{
    BOUNDARY_WALL_HALF_THICKNESS, BOUNDARY_WALL_HEIGHT, SPAWN_FALLBACK_INSET,
};

use crate::map::WorldMap;
use crate::obstacle::Obstacle;

/// Distance from the boundary kept free of buildings and crates.
const INTERIOR_MARGIN: f32 = 10.0;

/// Clear radius around each fallback spawn corner.
const CORNER_CLEAR_RADIUS: f32 = 3.0;

/// Placement attempts per requested obstacle.
const PLACEMENT_TRIES_PER_OBSTACLE: u32 = 4;

/// Build a fresh arena from `config`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, config: &WorldGenConfig) -> WorldMap {
    let half = config.half_size;
    let mut obstacles = boundary_walls(half);
    let boundary_count = obstacles.len();

    let keep_clear: Vec<(Vec3, f32)> = std::iter::once((Vec3::ZERO, config.spawn_clear_radius))
        .chain((0..4).map(|i| (fallback_corner(half, i), CORNER_CLEAR_RADIUS)))
        .collect();

    scatter(
        rng,
        &mut obstacles,
        config.building_count,
        half,
        &keep_clear,
        |rng| {
            Vec3::new(
                rng.gen_range(2.0..8.0),
                rng.gen_range(2.0..8.0),
                rng.gen_range(2.0..8.0),
            )
        },
    );
    scatter(
        rng,
        &mut obstacles,
        config.crate_count,
        half,
        &keep_clear,
        |rng| Vec3::splat(rng.gen_range(0.75..1.25)),
    );

    log::debug!(
        "generated arena: {} boundary walls, {} interior obstacles",
        boundary_count,
        obstacles.len() - boundary_count
    );

    WorldMap::new(obstacles, half)
}

/// Deterministic spawn corner used when random placement fails.
/// `index` cycles through the four corners.
pub fn fallback_corner(half_size: f32, index: u32) -> Vec3 {
    let c = half_size - SPAWN_FALLBACK_INSET;
    match index % 4 {
        0 => Vec3::new(c, 0.0, c),
        1 => Vec3::new(-c, 0.0, c),
        2 => Vec3::new(-c, 0.0, -c),
        _ => Vec3::new(c, 0.0, -c),
    }
}

/// Four walls whose inner faces lie on the arena boundary.
fn boundary_walls(half: f32) -> Vec<Obstacle> {
    let t = BOUNDARY_WALL_HALF_THICKNESS;
    let h = BOUNDARY_WALL_HEIGHT * 0.5;
    let span = half + 2.0 * t;
    vec![
        Obstacle::on_ground(half + t, 0.0, Vec3::new(t, h, span)),
        Obstacle::on_ground(-half - t, 0.0, Vec3::new(t, h, span)),
        Obstacle::on_ground(0.0, half + t, Vec3::new(span, h, t)),
        Obstacle::on_ground(0.0, -half - t, Vec3::new(span, h, t)),
    ]
}

fn scatter<R, F>(
    rng: &mut R,
    obstacles: &mut Vec<Obstacle>,
    count: u32,
    half: f32,
    keep_clear: &[(Vec3, f32)],
    mut extents: F,
) where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Vec3,
{
    let limit = half - INTERIOR_MARGIN;
    if limit <= 0.0 {
        return;
    }

    let mut placed = 0;
    for _ in 0..count * PLACEMENT_TRIES_PER_OBSTACLE {
        if placed == count {
            break;
        }
        let half_extents = extents(rng);
        let x = rng.gen_range(-limit..limit);
        let z = rng.gen_range(-limit..limit);
        let candidate = Obstacle::on_ground(x, z, half_extents);

        let blocks_spawn = keep_clear
            .iter()
            .any(|&(point, radius)| candidate.footprint_distance(point) < radius);
        if blocks_spawn {
            continue;
        }

        obstacles.push(candidate);
        placed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use royale_core::constants::{AGENT_HEIGHT, AGENT_RADIUS};

    #[test]
    fn test_generation_is_deterministic() {
        let config = WorldGenConfig::default();
        let a = generate(&mut ChaCha8Rng::seed_from_u64(9), &config);
        let b = generate(&mut ChaCha8Rng::seed_from_u64(9), &config);
        assert_eq!(a.obstacles(), b.obstacles());
    }

    #[test]
    fn test_spawn_and_corners_are_clear() {
        let config = WorldGenConfig::default();
        for seed in 0..20 {
            let map = generate(&mut ChaCha8Rng::seed_from_u64(seed), &config);
            let spawn = Vec3::new(0.0, AGENT_HEIGHT / 2.0, 0.0);
            assert!(map.is_position_valid(spawn, AGENT_RADIUS), "seed {seed}");
            for i in 0..4 {
                let corner = fallback_corner(config.half_size, i)
                    + Vec3::new(0.0, AGENT_HEIGHT / 2.0, 0.0);
                assert!(
                    map.is_position_valid(corner, AGENT_RADIUS),
                    "corner {i} blocked for seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_boundary_walls_enclose_arena() {
        let config = WorldGenConfig {
            building_count: 0,
            crate_count: 0,
            ..Default::default()
        };
        let map = generate(&mut ChaCha8Rng::seed_from_u64(1), &config);
        assert_eq!(map.obstacles().len(), 4);

        let half = config.half_size;
        let edge = Vec3::new(half + 0.5, 1.0, 0.0);
        assert!(map.check_projectile_collision(edge));
        assert!(map.check_projectile_collision(Vec3::new(0.0, 1.0, -half - 0.5)));
        assert!(!map.check_projectile_collision(Vec3::new(half - 0.5, 1.0, 0.0)));
    }

    #[test]
    fn test_obstacles_rest_on_ground() {
        let map = generate(&mut ChaCha8Rng::seed_from_u64(3), &WorldGenConfig::default());
        assert!(map.obstacles().len() > 4);
        for o in map.obstacles() {
            assert!(o.bottom().abs() < 1e-5);
        }
    }
}
