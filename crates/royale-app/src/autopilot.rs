//! Scripted player input for unattended runs.
//!
//! The autopilot reads the latest snapshot and the arena, then issues the
//! same `PlayerCommand`s a human would: aim at the nearest agent in line of
//! sight, fire, strafe, heal when low and pick a weapon for the range.

use glam::Vec3;

use royale_core::commands::PlayerCommand;
use royale_core::constants::EYE_OFFSET;
use royale_core::enums::MatchPhase;
use royale_core::state::{AgentView, MatchSnapshot};
use royale_core::types::horizontal_distance;
use royale_world::WorldMap;

/// Agents further than this are ignored when picking a target.
const ENGAGE_RANGE: f32 = 60.0;
/// Inside this range the shotgun is preferred.
const CLOSE_RANGE: f32 = 12.0;
/// Beyond this range the pilot closes in while strafing.
const PUSH_RANGE: f32 = 30.0;
const MEDKIT_THRESHOLD: u32 = 50;
const GRENADE_MIN_RANGE: f32 = 8.0;
const GRENADE_MAX_RANGE: f32 = 16.0;
const STRAFE_SWITCH_SECS: f32 = 1.5;

const RIFLE_SLOT: usize = 0;
const SHOTGUN_SLOT: usize = 2;
const SLOT_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct Autopilot {
    strafe_sign: f32,
    strafe_timer: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            strafe_sign: 1.0,
            strafe_timer: STRAFE_SWITCH_SECS,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands for the next frame. Empty unless a match is running and the
    /// player is alive.
    pub fn plan(&mut self, snapshot: &MatchSnapshot, map: &WorldMap, dt: f32) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        let player = &snapshot.player;
        if snapshot.phase != MatchPhase::Active || !player.alive {
            return commands;
        }

        self.strafe_timer -= dt;
        if self.strafe_timer <= 0.0 {
            self.strafe_sign = -self.strafe_sign;
            self.strafe_timer = STRAFE_SWITCH_SECS;
        }

        if player.health < MEDKIT_THRESHOLD && player.medkits > 0 {
            commands.push(PlayerCommand::UseMedkit);
        }

        let eye = player.position + Vec3::Y * EYE_OFFSET;
        let Some(target) = visible_target(snapshot, map, eye) else {
            // Head for the nearest agent to find a fight.
            if let Some(agent) = nearest_alive(snapshot) {
                let heading = flat_direction(player.position, agent.position);
                commands.push(PlayerCommand::Move { direction: heading });
                commands.push(PlayerCommand::Aim { direction: heading });
            }
            let weapon = &player.weapon;
            if weapon.magazine < weapon.magazine_size / 2 && weapon.reserve > 0 {
                commands.push(PlayerCommand::Reload);
            }
            return commands;
        };

        let distance = horizontal_distance(player.position, target.position);
        commands.push(PlayerCommand::Aim {
            direction: (target.position - eye).normalize_or_zero(),
        });

        let weapon = &player.weapon;
        let preferred = if distance < CLOSE_RANGE {
            SHOTGUN_SLOT
        } else {
            RIFLE_SLOT
        };
        if weapon.magazine == 0 && weapon.reserve == 0 && !weapon.reloading {
            commands.push(PlayerCommand::SwitchWeapon {
                slot: (weapon.slot + 1) % SLOT_COUNT,
            });
        } else if weapon.slot != preferred && !weapon.reloading {
            commands.push(PlayerCommand::SwitchWeapon { slot: preferred });
        }
        commands.push(PlayerCommand::Fire);

        if player.grenades > 0 && (GRENADE_MIN_RANGE..=GRENADE_MAX_RANGE).contains(&distance) {
            commands.push(PlayerCommand::ThrowGrenade);
        }

        let forward = flat_direction(player.position, target.position);
        let mut movement = forward.cross(Vec3::Y) * self.strafe_sign;
        if distance > PUSH_RANGE {
            movement += forward;
        }
        commands.push(PlayerCommand::Move {
            direction: movement.normalize_or_zero(),
        });

        commands
    }
}

/// Nearest alive agent within `ENGAGE_RANGE` with a clear line from `eye`.
fn visible_target<'a>(snapshot: &'a MatchSnapshot, map: &WorldMap, eye: Vec3) -> Option<&'a AgentView> {
    snapshot
        .agents
        .iter()
        .filter(|a| a.alive)
        .map(|a| (a, eye.distance(a.position)))
        .filter(|&(_, d)| d <= ENGAGE_RANGE)
        .filter(|&(a, _)| !map.raycast_blocked(eye, a.position))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(a, _)| a)
}

fn nearest_alive(snapshot: &MatchSnapshot) -> Option<&AgentView> {
    let origin = snapshot.player.position;
    snapshot
        .agents
        .iter()
        .filter(|a| a.alive)
        .min_by(|a, b| {
            horizontal_distance(origin, a.position).total_cmp(&horizontal_distance(origin, b.position))
        })
}

fn flat_direction(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use royale_core::enums::{AgentArchetype, DecisionState};
    use royale_core::state::PlayerView;
    use royale_world::Obstacle;

    fn agent(id: u32, position: Vec3) -> AgentView {
        AgentView {
            id,
            archetype: AgentArchetype::Rifleman,
            position,
            yaw: 0.0,
            health: 100,
            alive: true,
            state: DecisionState::Patrolling,
            target: None,
        }
    }

    fn active_snapshot(agents: Vec<AgentView>) -> MatchSnapshot {
        let mut player = PlayerView {
            position: Vec3::new(0.0, 0.9, 0.0),
            health: 100,
            max_health: 100,
            alive: true,
            medkits: 2,
            grenades: 0,
            ..Default::default()
        };
        player.weapon.magazine = 30;
        player.weapon.magazine_size = 30;
        player.weapon.reserve = 90;
        MatchSnapshot {
            phase: MatchPhase::Active,
            player,
            agents,
            ..Default::default()
        }
    }

    fn fires(commands: &[PlayerCommand]) -> bool {
        commands.iter().any(|c| matches!(c, PlayerCommand::Fire))
    }

    #[test]
    fn test_idle_when_not_active() {
        let mut pilot = Autopilot::new();
        let mut snapshot = active_snapshot(vec![agent(0, Vec3::new(0.0, 0.9, -20.0))]);
        snapshot.phase = MatchPhase::Paused;
        assert!(pilot.plan(&snapshot, &WorldMap::default(), 0.016).is_empty());

        snapshot.phase = MatchPhase::Active;
        snapshot.player.alive = false;
        assert!(pilot.plan(&snapshot, &WorldMap::default(), 0.016).is_empty());
    }

    #[test]
    fn test_fires_at_visible_agent() {
        let mut pilot = Autopilot::new();
        let snapshot = active_snapshot(vec![
            agent(0, Vec3::new(0.0, 0.9, -20.0)),
            agent(1, Vec3::new(40.0, 0.9, 0.0)),
        ]);
        let commands = pilot.plan(&snapshot, &WorldMap::default(), 0.016);
        assert!(fires(&commands));

        let aim = commands
            .iter()
            .find_map(|c| match c {
                PlayerCommand::Aim { direction } => Some(*direction),
                _ => None,
            })
            .unwrap();
        assert!(aim.z < -0.99, "aims at the nearer agent, got {aim}");
    }

    #[test]
    fn test_holds_fire_behind_cover() {
        let map = WorldMap::new(
            vec![Obstacle::on_ground(0.0, -10.0, Vec3::new(5.0, 5.0, 1.0))],
            100.0,
        );
        let mut pilot = Autopilot::new();
        let snapshot = active_snapshot(vec![agent(0, Vec3::new(0.0, 0.9, -20.0))]);
        let commands = pilot.plan(&snapshot, &map, 0.016);
        assert!(!fires(&commands));
        assert!(commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::Move { .. })));
    }

    #[test]
    fn test_heals_when_low() {
        let mut pilot = Autopilot::new();
        let mut snapshot = active_snapshot(Vec::new());
        snapshot.player.health = 30;
        let commands = pilot.plan(&snapshot, &WorldMap::default(), 0.016);
        assert!(matches!(commands.first(), Some(PlayerCommand::UseMedkit)));
    }

    #[test]
    fn test_prefers_shotgun_up_close() {
        let mut pilot = Autopilot::new();
        let snapshot = active_snapshot(vec![agent(0, Vec3::new(0.0, 0.9, -5.0))]);
        let commands = pilot.plan(&snapshot, &WorldMap::default(), 0.016);
        assert!(commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::SwitchWeapon { slot: SHOTGUN_SLOT })));
    }

    #[test]
    fn test_strafe_direction_flips() {
        let mut pilot = Autopilot::new();
        let snapshot = active_snapshot(vec![agent(0, Vec3::new(0.0, 0.9, -20.0))]);
        let strafe = |commands: Vec<PlayerCommand>| {
            commands
                .into_iter()
                .find_map(|c| match c {
                    PlayerCommand::Move { direction } => Some(direction),
                    _ => None,
                })
                .unwrap()
        };
        let first = strafe(pilot.plan(&snapshot, &WorldMap::default(), 0.1));
        let second = strafe(pilot.plan(&snapshot, &WorldMap::default(), STRAFE_SWITCH_SECS));
        assert!(first.dot(second) < -0.99);
    }
}
