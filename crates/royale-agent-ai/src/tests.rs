#[cfg(test)]
mod tests {
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use royale_core::components::AgentTimers;
    use royale_core::constants::*;
    use royale_core::enums::{AgentArchetype, DecisionState, TargetRef};
    use royale_core::types::horizontal_distance;

    use crate::fsm::{aim_with_spread, evaluate, AgentContext};
    use crate::perception::{detect_player, nearest_agent, AgentSighting};
    use crate::profiles::{archetype_for_index, get_profile};

    const SELF_POS: Vec3 = Vec3::new(0.0, AGENT_HEIGHT / 2.0, 0.0);

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    /// A Rifleman at the origin with nothing around and a running patrol timer.
    fn make_context(state: DecisionState) -> AgentContext<'static> {
        AgentContext {
            id: 1,
            archetype: AgentArchetype::Rifleman,
            state,
            target: None,
            target_position: None,
            position: SELF_POS,
            patrol_point: None,
            reposition_point: None,
            timers: AgentTimers {
                patrol: 100.0,
                attack: 100.0,
                fire_cooldown: 0.0,
            },
            yaw: 0.0,
            player: None,
            agents: &[],
            arena_half_size: WORLD_HALF_SIZE,
        }
    }

    fn at(x: f32, z: f32) -> Vec3 {
        Vec3::new(x, AGENT_HEIGHT / 2.0, z)
    }

    // ---- Transitions ----

    #[test]
    fn test_player_in_attack_range_attacks_and_fires() {
        let mut ctx = make_context(DecisionState::Patrolling);
        ctx.player = Some(at(10.0, 0.0));
        let update = evaluate(&ctx, &mut rng());

        assert!(update.state_changed);
        assert_eq!(update.new_state, DecisionState::Attacking);
        assert_eq!(update.target, Some(TargetRef::Player));

        let shot = update.fire.expect("cooldown elapsed, should fire");
        assert!(shot.direction.x > 0.9, "should aim at the player: {:?}", shot.direction);
        assert!((shot.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(shot.damage, get_profile(AgentArchetype::Rifleman).damage);
        assert!((update.timers.fire_cooldown - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_player_beyond_attack_range_is_chased() {
        let mut ctx = make_context(DecisionState::Patrolling);
        ctx.player = Some(at(0.0, -40.0));
        let update = evaluate(&ctx, &mut rng());

        assert_eq!(update.new_state, DecisionState::Chasing);
        assert_eq!(update.target, Some(TargetRef::Player));
        assert!(update.fire.is_none());
        let speed = get_profile(AgentArchetype::Rifleman).move_speed;
        assert!((update.move_velocity.length() - speed).abs() < 1e-5);
        assert!(update.move_velocity.z < 0.0);
        assert_eq!(update.move_velocity.y, 0.0);
    }

    #[test]
    fn test_player_outside_detection_is_ignored() {
        let mut ctx = make_context(DecisionState::Patrolling);
        ctx.player = Some(at(0.0, 80.0));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.new_state, DecisionState::Patrolling);
        assert_eq!(update.target, None);
    }

    #[test]
    fn test_attacking_with_dead_target_falls_back_to_patrol() {
        let mut ctx = make_context(DecisionState::Attacking);
        ctx.target = Some(TargetRef::Agent(5));
        ctx.target_position = None;
        let update = evaluate(&ctx, &mut rng());

        assert_eq!(update.new_state, DecisionState::Patrolling);
        assert_eq!(update.target, None);
        assert!(update.state_changed);
        assert!(update.fire.is_none());
    }

    #[test]
    fn test_chasing_dead_player_falls_back_to_patrol() {
        let mut ctx = make_context(DecisionState::Chasing);
        ctx.target = Some(TargetRef::Player);
        ctx.player = None;
        ctx.target_position = None;
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.new_state, DecisionState::Patrolling);
        assert_eq!(update.target, None);
    }

    #[test]
    fn test_patrol_timer_elapsed_picks_new_point() {
        let mut ctx = make_context(DecisionState::Chasing);
        ctx.target = Some(TargetRef::Agent(3));
        ctx.target_position = Some(at(30.0, 30.0));
        ctx.timers.patrol = 0.0;
        let update = evaluate(&ctx, &mut rng());

        assert_eq!(update.new_state, DecisionState::Patrolling);
        assert_eq!(update.target, None);
        assert!(update.timers.patrol >= PATROL_TIMER_MIN_SECS);
        assert!(update.timers.patrol <= PATROL_TIMER_MAX_SECS);
        let point = update.patrol_point.expect("patrol point set");
        assert!(horizontal_distance(SELF_POS, point) <= PATROL_RADIUS + 1e-4);
    }

    #[test]
    fn test_live_target_is_kept() {
        let mut ctx = make_context(DecisionState::Chasing);
        ctx.target = Some(TargetRef::Agent(3));
        ctx.target_position = Some(at(0.0, 40.0));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.new_state, DecisionState::Chasing);
        assert_eq!(update.target, Some(TargetRef::Agent(3)));
        assert!(update.move_velocity.z > 0.0);
    }

    #[test]
    fn test_chasing_within_attack_range_switches_to_attacking() {
        let mut ctx = make_context(DecisionState::Chasing);
        ctx.target = Some(TargetRef::Agent(3));
        ctx.target_position = Some(at(5.0, 0.0));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.new_state, DecisionState::Attacking);
        assert!(update.fire.is_none(), "fires from the next evaluation");
    }

    #[test]
    fn test_attacking_target_out_of_range_switches_to_chasing() {
        let mut ctx = make_context(DecisionState::Attacking);
        ctx.target = Some(TargetRef::Agent(3));
        ctx.target_position = Some(at(35.0, 0.0));
        ctx.reposition_point = Some(at(1.0, 3.0));
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.new_state, DecisionState::Chasing);
        assert_eq!(update.reposition_point, None);
        assert!(update.fire.is_none());
        assert!(update.move_velocity.x > 0.0);
    }

    #[test]
    fn test_nearby_agent_targeted_about_thirty_percent_of_frames() {
        let agents = [
            AgentSighting {
                id: 1,
                position: SELF_POS,
            },
            AgentSighting {
                id: 2,
                position: at(10.0, 0.0),
            },
        ];
        let mut ctx = make_context(DecisionState::Patrolling);
        ctx.agents = &agents;

        let mut rng = rng();
        let trials = 10_000;
        let engaged = (0..trials)
            .filter(|_| evaluate(&ctx, &mut rng).target == Some(TargetRef::Agent(2)))
            .count();
        let rate = engaged as f64 / trials as f64;
        assert!((0.27..0.33).contains(&rate), "targeting rate {rate}");
    }

    // ---- Per-state behavior ----

    #[test]
    fn test_patrol_moves_at_half_speed() {
        let mut ctx = make_context(DecisionState::Patrolling);
        ctx.patrol_point = Some(at(10.0, 0.0));
        let update = evaluate(&ctx, &mut rng());
        let half = get_profile(AgentArchetype::Rifleman).move_speed * 0.5;
        assert!((update.move_velocity.length() - half).abs() < 1e-5);
        assert!(update.move_velocity.x > 0.0);
        assert_eq!(update.patrol_point, Some(at(10.0, 0.0)));
    }

    #[test]
    fn test_patrol_arrival_picks_new_point_and_resets_timer() {
        let mut ctx = make_context(DecisionState::Patrolling);
        ctx.patrol_point = Some(at(0.5, 0.0));
        ctx.timers.patrol = 1.0;
        let update = evaluate(&ctx, &mut rng());
        assert_ne!(update.patrol_point, Some(at(0.5, 0.0)));
        assert!(update.timers.patrol >= PATROL_TIMER_MIN_SECS);
    }

    #[test]
    fn test_attacking_respects_fire_cooldown() {
        let mut ctx = make_context(DecisionState::Attacking);
        ctx.player = Some(at(10.0, 0.0));
        ctx.timers.fire_cooldown = 0.4;
        let update = evaluate(&ctx, &mut rng());
        assert_eq!(update.new_state, DecisionState::Attacking);
        assert!(update.fire.is_none());
        assert!((update.timers.fire_cooldown - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_attacking_repositions_when_timer_elapsed() {
        let mut ctx = make_context(DecisionState::Attacking);
        ctx.player = Some(at(10.0, 0.0));
        ctx.timers.attack = 0.0;
        let update = evaluate(&ctx, &mut rng());
        assert!(update.timers.attack >= REPOSITION_TIMER_MIN_SECS);
        assert!(update.timers.attack <= REPOSITION_TIMER_MAX_SECS);
        let point = update.reposition_point.expect("reposition point set");
        assert!(horizontal_distance(SELF_POS, point) <= REPOSITION_RADIUS + 1e-4);
    }

    #[test]
    fn test_waypoints_stay_inside_arena() {
        let mut ctx = make_context(DecisionState::Patrolling);
        ctx.position = at(WORLD_HALF_SIZE - 1.0, WORLD_HALF_SIZE - 1.0);
        ctx.timers.patrol = 0.0;
        let mut rng = rng();
        for _ in 0..50 {
            let point = evaluate(&ctx, &mut rng).patrol_point.unwrap();
            assert!(point.x <= WORLD_HALF_SIZE - SPAWN_FALLBACK_INSET);
            assert!(point.z <= WORLD_HALF_SIZE - SPAWN_FALLBACK_INSET);
        }
    }

    #[test]
    fn test_aim_spread_is_bounded() {
        let origin = Vec3::ZERO;
        let target = Vec3::new(0.0, 0.0, -20.0);
        let exact = aim_with_spread(origin, target, 0.0, &mut rng()).unwrap();
        assert!((exact - Vec3::NEG_Z).length() < 1e-6);

        let mut rng = rng();
        for _ in 0..100 {
            let dir = aim_with_spread(origin, target, 0.05, &mut rng).unwrap();
            // Worst case deviation (0.05 on each axis) stays within ~5 degrees.
            assert!(dir.dot(Vec3::NEG_Z) > 0.995);
        }
        assert!(aim_with_spread(origin, origin, 0.05, &mut rng).is_none());
    }

    // ---- Perception ----

    #[test]
    fn test_nearest_agent_excludes_self_and_far_agents() {
        let agents = [
            AgentSighting {
                id: 1,
                position: SELF_POS,
            },
            AgentSighting {
                id: 2,
                position: at(30.0, 0.0),
            },
            AgentSighting {
                id: 3,
                position: at(-12.0, 0.0),
            },
            AgentSighting {
                id: 4,
                position: at(90.0, 0.0),
            },
        ];
        let contact = nearest_agent(1, SELF_POS, &agents, 50.0).unwrap();
        assert_eq!(contact.target, TargetRef::Agent(3));
        assert!((contact.distance - 12.0).abs() < 1e-5);

        assert!(nearest_agent(1, SELF_POS, &agents, 10.0).is_none());
    }

    #[test]
    fn test_detect_player_requires_alive_and_range() {
        assert!(detect_player(SELF_POS, None, 50.0).is_none());
        assert!(detect_player(SELF_POS, Some(at(0.0, 60.0)), 50.0).is_none());
        let contact = detect_player(SELF_POS, Some(at(0.0, 50.0)), 50.0).unwrap();
        assert_eq!(contact.target, TargetRef::Player);
    }

    // ---- Profiles ----

    #[test]
    fn test_rifleman_projectile_lifetime() {
        let p = get_profile(AgentArchetype::Rifleman);
        assert_eq!(p.projectile_speed, 40.0);
        assert_eq!(p.projectile_range, 30.0);
        assert!((p.projectile_range / p.projectile_speed - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_profiles_are_ordered_sensibly() {
        for archetype in [
            AgentArchetype::Rifleman,
            AgentArchetype::Scout,
            AgentArchetype::Marksman,
        ] {
            let p = get_profile(archetype);
            assert!(p.attack_range < p.detection_range, "{archetype:?}");
            assert!(p.fire_rate > 0.0);
        }
        let scout = get_profile(AgentArchetype::Scout);
        let marksman = get_profile(AgentArchetype::Marksman);
        assert!(scout.move_speed > marksman.move_speed);
        assert!(marksman.attack_range > scout.attack_range);
    }

    #[test]
    fn test_archetype_mix() {
        let archetypes: Vec<_> = (0..20).map(archetype_for_index).collect();
        let count = |a| archetypes.iter().filter(|&&x| x == a).count();
        assert_eq!(count(AgentArchetype::Marksman), 3);
        assert_eq!(count(AgentArchetype::Scout), 5);
        assert_eq!(count(AgentArchetype::Rifleman), 12);
    }
}
