//! Fixed-step headless runs and their summary report.

use serde::Serialize;

use royale_core::config::SimConfig;
use royale_core::constants::TARGET_FRAME_RATE;
use royale_core::enums::{MatchOutcome, MatchPhase};
use royale_core::events::MatchEvent;
use royale_core::state::{MatchSnapshot, MatchStats};
use royale_sim::SimulationEngine;

use crate::autopilot::Autopilot;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub seed: u64,
    pub frames: u64,
    pub elapsed_secs: f64,
    pub phase: MatchPhase,
    pub outcome: Option<MatchOutcome>,
    pub stats: MatchStats,
    /// Agents lost to background attrition.
    pub attrition_losses: u32,
    pub damage_taken: u32,
}

impl MatchReport {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            frames: 0,
            elapsed_secs: 0.0,
            phase: MatchPhase::Idle,
            outcome: None,
            stats: MatchStats::default(),
            attrition_losses: 0,
            damage_taken: 0,
        }
    }

    /// Fold one frame's snapshot into the report.
    pub fn record(&mut self, snapshot: &MatchSnapshot) {
        self.frames = snapshot.time.frame;
        self.elapsed_secs = snapshot.time.elapsed_secs;
        self.phase = snapshot.phase;
        self.outcome = snapshot.outcome;
        self.stats = snapshot.stats;
        for event in &snapshot.events {
            match event {
                MatchEvent::AgentEliminatedAgent { .. } => self.attrition_losses += 1,
                MatchEvent::PlayerDamaged { amount, .. } => self.damage_taken += amount,
                _ => {}
            }
        }
    }
}

/// Play one match at a fixed 1/60 s step until it ends or `max_frames`
/// frames have run.
pub fn run_match(config: SimConfig, max_frames: u64, autopilot: bool) -> MatchReport {
    let dt = 1.0 / TARGET_FRAME_RATE as f32;
    let mut report = MatchReport::from_seed(config.seed);
    let population = config.population;

    let mut engine = SimulationEngine::new(config);
    engine.start_match(population);
    let mut pilot = autopilot.then(Autopilot::new);

    for _ in 0..max_frames {
        let snapshot = engine.update(dt);
        report.record(&snapshot);
        if snapshot.phase == MatchPhase::Over {
            break;
        }
        if let Some(pilot) = pilot.as_mut() {
            engine.queue_commands(pilot.plan(&snapshot, engine.map(), dt));
        }
    }

    log::info!(
        "run finished after {} frames ({:.1}s): {:?}",
        report.frames,
        report.elapsed_secs,
        report.outcome
    );
    report
}
