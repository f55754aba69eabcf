//! Countdown timers: weapon cooldowns and reloads, consumable cooldowns,
//! agent behaviour timers and grenade fuses.

use hecs::World;

use royale_core::components::{AgentBrain, Grenade, Health, PlayerInventory};

use crate::weapons::Loadout;

/// Advance every countdown by `dt`.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, loadout) in world.query_mut::<&mut Loadout>() {
        loadout.tick(dt);
    }

    for (_entity, inventory) in world.query_mut::<&mut PlayerInventory>() {
        inventory.medkit_cooldown = countdown(inventory.medkit_cooldown, dt);
        inventory.grenade_cooldown = countdown(inventory.grenade_cooldown, dt);
    }

    for (_entity, (brain, health)) in world.query_mut::<(&mut AgentBrain, &Health)>() {
        if !health.alive {
            continue;
        }
        brain.timers.patrol = countdown(brain.timers.patrol, dt);
        brain.timers.attack = countdown(brain.timers.attack, dt);
        brain.timers.fire_cooldown = countdown(brain.timers.fire_cooldown, dt);
    }

    // Fuses may go negative; detonation checks <= 0.
    for (_entity, grenade) in world.query_mut::<&mut Grenade>() {
        grenade.fuse_remaining -= dt;
    }
}

fn countdown(remaining: f32, dt: f32) -> f32 {
    (remaining - dt).max(0.0)
}
