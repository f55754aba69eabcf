//! Simulation engine: the match director.
//!
//! `SimulationEngine` owns the hecs ECS world and the arena map, processes
//! player commands, runs all systems in a fixed order, and produces
//! `MatchSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use royale_core::commands::PlayerCommand;
use royale_core::components::{Health, PlayerControl};
use royale_core::config::SimConfig;
use royale_core::constants::MAX_POPULATION;
use royale_core::enums::{MatchOutcome, MatchPhase};
use royale_core::events::MatchEvent;
use royale_core::state::{AgentView, MatchSnapshot, MatchStats, PlayerView};
use royale_core::types::SimTime;
use royale_world::WorldMap;

use crate::systems;
use crate::systems::snapshot::MatchHeader;
use crate::weapons::Loadout;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all match state.
pub struct SimulationEngine {
    world: World,
    map: WorldMap,
    config: SimConfig,
    time: SimTime,
    phase: MatchPhase,
    outcome: Option<MatchOutcome>,
    stats: MatchStats,
    rng: ChaCha8Rng,
    player: Option<Entity>,
    /// Agent entities indexed by agent id.
    agents: Vec<Entity>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<MatchEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// No match runs until `start_match` (or `StartMatch`).
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            map: WorldMap::default(),
            time: SimTime::default(),
            phase: MatchPhase::default(),
            outcome: None,
            stats: MatchStats::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: None,
            agents: Vec::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Queue a player command for processing at the next update boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Regenerate the arena and start a fresh match with `population`
    /// combatants, the player included.
    pub fn start_match(&mut self, population: u32) {
        let population = population.clamp(1, MAX_POPULATION);

        self.world.clear();
        self.despawn_buffer.clear();
        self.events.clear();

        self.map = royale_world::generate(&mut self.rng, &self.config.world);
        self.player = Some(world_setup::spawn_player(&mut self.world));
        self.agents =
            world_setup::spawn_agents(&mut self.world, &self.map, &mut self.rng, population - 1);

        self.stats = MatchStats {
            players_alive: population,
            ..Default::default()
        };
        self.time = SimTime::default();
        self.outcome = None;
        self.phase = MatchPhase::Active;

        log::info!(
            "match started: {} combatants, {} obstacles",
            population,
            self.map.obstacles().len()
        );
    }

    /// Advance the match by `dt` seconds and return the resulting snapshot.
    pub fn update(&mut self, dt: f32) -> MatchSnapshot {
        self.process_commands();

        let dt = self.clamp_dt(dt);
        if self.phase == MatchPhase::Active && dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        self.snapshot()
    }

    /// Build a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> MatchSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            MatchHeader {
                time: self.time,
                phase: self.phase,
                outcome: self.outcome,
                stats: self.stats,
            },
            self.player,
            &self.agents,
            events,
        )
    }

    /// Get the current match phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the arena of the current match.
    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn player_view(&self) -> PlayerView {
        self.player
            .map(|e| systems::snapshot::build_player(&self.world, e))
            .unwrap_or_default()
    }

    pub fn agent_views(&self) -> Vec<AgentView> {
        systems::snapshot::build_agents(&self.world, &self.agents)
    }

    /// Number of agents spawned this match, dead ones included.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Clamp a caller-supplied step to `[0, max_dt]`. Non-finite and
    /// negative steps count as zero.
    fn clamp_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        dt.min(self.config.max_dt)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch { population } => self.start_match(population),
            PlayerCommand::Pause => {
                if self.phase == MatchPhase::Active {
                    self.phase = MatchPhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == MatchPhase::Paused {
                    self.phase = MatchPhase::Active;
                }
            }
            command => {
                if self.phase != MatchPhase::Active {
                    return;
                }
                let Some(player) = self.player else {
                    return;
                };
                self.handle_player_input(player, command);
            }
        }
    }

    fn handle_player_input(&mut self, player: Entity, command: PlayerCommand) {
        match command {
            PlayerCommand::Move { direction } => {
                if let Ok(mut control) = self.world.get::<&mut PlayerControl>(player) {
                    let flat = Vec3::new(direction.x, 0.0, direction.z);
                    control.move_intent = if flat.is_finite() {
                        flat.clamp_length_max(1.0)
                    } else {
                        Vec3::ZERO
                    };
                }
            }
            PlayerCommand::Aim { direction } => {
                let aim = direction.normalize_or_zero();
                if aim != Vec3::ZERO {
                    if let Ok(mut control) = self.world.get::<&mut PlayerControl>(player) {
                        control.aim = aim;
                    }
                }
            }
            PlayerCommand::Jump => {
                if let Ok(mut control) = self.world.get::<&mut PlayerControl>(player) {
                    control.jump_requested = true;
                }
            }
            PlayerCommand::Fire => {
                systems::player::fire(&mut self.world, player, &mut self.rng, &mut self.stats);
            }
            PlayerCommand::Reload => {
                if let Ok(mut loadout) = self.world.get::<&mut Loadout>(player) {
                    loadout.reload();
                }
            }
            PlayerCommand::SwitchWeapon { slot } => {
                if let Ok(mut loadout) = self.world.get::<&mut Loadout>(player) {
                    loadout.switch_to(slot);
                }
            }
            PlayerCommand::ThrowGrenade => {
                systems::player::throw_grenade(&mut self.world, player);
            }
            PlayerCommand::UseMedkit => {
                systems::player::use_medkit(&mut self.world, player);
            }
            PlayerCommand::StartMatch { .. } | PlayerCommand::Pause | PlayerCommand::Resume => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Timers, then player movement
        systems::timers::run(&mut self.world, dt);
        systems::player::run(&mut self.world, &self.map, dt);
        // 2. Agent decisions + movement (fire intents spawn projectiles)
        systems::agent_ai::run(
            &mut self.world,
            &self.map,
            &self.agents,
            self.player,
            &mut self.rng,
            dt,
        );
        // 3. Projectile and grenade flight, clipped at geometry
        systems::ballistics::run(&mut self.world, &self.map, dt);
        // 4. Player projectiles vs agents, grenade detonations
        systems::hits::player_projectiles(
            &mut self.world,
            &self.agents,
            &mut self.stats,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        systems::grenades::run(
            &mut self.world,
            &self.agents,
            &mut self.stats,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 5. Agent projectiles vs player, unless the player is already the
        //    last one standing
        let mut placement = None;
        if self.stats.players_alive > 1 {
            if let Some(player) = self.player {
                placement = systems::hits::agent_projectiles(
                    &mut self.world,
                    player,
                    &mut self.stats,
                    &mut self.events,
                    &mut self.despawn_buffer,
                );
            }
        }
        systems::ballistics::cull_spent(&mut self.world, &mut self.despawn_buffer);
        if let Some(placement) = placement {
            self.end_match(MatchOutcome::Defeat { placement });
            return;
        }
        // 6. Background attrition
        if self.config.attrition {
            systems::attrition::run(
                &mut self.world,
                &self.agents,
                &mut self.rng,
                &mut self.stats,
                &mut self.events,
            );
        }
        // 7. Win check
        self.check_win();
    }

    fn check_win(&mut self) {
        let player_alive = self
            .player
            .and_then(|e| self.world.get::<&Health>(e).ok().map(|h| h.alive))
            .unwrap_or(false);
        if self.stats.players_alive == 1 && player_alive {
            self.events.push(MatchEvent::PlayerWon {
                eliminations: self.stats.eliminations,
            });
            self.end_match(MatchOutcome::Victory);
        }
    }

    fn end_match(&mut self, outcome: MatchOutcome) {
        self.outcome = Some(outcome);
        self.phase = MatchPhase::Over;
        log::info!(
            "match over: {:?} after {:.1}s, {} eliminations",
            outcome,
            self.time.elapsed_secs,
            self.stats.eliminations
        );
    }

    // ---- Test helpers ----

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn set_map(&mut self, map: WorldMap) {
        self.map = map;
    }

    #[cfg(test)]
    pub(crate) fn player_entity(&self) -> Option<Entity> {
        self.player
    }

    #[cfg(test)]
    pub(crate) fn agent_entity(&self, id: u32) -> Option<Entity> {
        self.agents.get(id as usize).copied()
    }
}
