//! Player weapon loadout: magazines, reserves, fire cooldowns and reloads.
//!
//! The `Loadout` is a component on the player entity. Commands call into it
//! directly; the timer system advances cooldowns and reload countdowns.

use serde::{Deserialize, Serialize};

use royale_core::enums::WeaponKind;
use royale_core::state::WeaponView;

/// Static parameters for a weapon kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub kind: WeaponKind,
    pub magazine_size: u32,
    pub starting_reserve: u32,
    /// Trigger pulls per second.
    pub fire_rate: f32,
    /// Damage per pellet.
    pub damage: u32,
    pub projectile_speed: f32,
    pub range: f32,
    pub reload_secs: f32,
    /// Projectiles per trigger pull.
    pub pellets: u32,
    /// Maximum per-axis aim deviation per pellet.
    pub spread: f32,
}

/// Tuning for a weapon kind.
pub fn weapon_spec(kind: WeaponKind) -> WeaponSpec {
    match kind {
        WeaponKind::Rifle => WeaponSpec {
            kind,
            magazine_size: 30,
            starting_reserve: 90,
            fire_rate: 10.0,
            damage: 20,
            projectile_speed: 80.0,
            range: 100.0,
            reload_secs: 2.0,
            pellets: 1,
            spread: 0.01,
        },
        WeaponKind::Pistol => WeaponSpec {
            kind,
            magazine_size: 12,
            starting_reserve: 48,
            fire_rate: 4.0,
            damage: 25,
            projectile_speed: 60.0,
            range: 60.0,
            reload_secs: 1.5,
            pellets: 1,
            spread: 0.015,
        },
        WeaponKind::Shotgun => WeaponSpec {
            kind,
            magazine_size: 6,
            starting_reserve: 24,
            fire_rate: 1.2,
            damage: 12,
            projectile_speed: 60.0,
            range: 30.0,
            reload_secs: 2.5,
            pellets: 6,
            spread: 0.08,
        },
    }
}

/// Mutable state of one carried weapon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponState {
    pub kind: WeaponKind,
    pub magazine: u32,
    pub reserve: u32,
    /// Seconds until the next trigger pull is accepted.
    pub cooldown: f32,
    /// Seconds left on an in-progress reload.
    pub reload_remaining: Option<f32>,
}

impl WeaponState {
    pub fn new(kind: WeaponKind) -> Self {
        let spec = weapon_spec(kind);
        Self {
            kind,
            magazine: spec.magazine_size,
            reserve: spec.starting_reserve,
            cooldown: 0.0,
            reload_remaining: None,
        }
    }

    pub fn spec(&self) -> WeaponSpec {
        weapon_spec(self.kind)
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_remaining.is_some()
    }

    /// Begin a reload. No-op when already reloading, the magazine is full,
    /// or there is nothing in reserve.
    pub fn start_reload(&mut self) -> bool {
        if self.is_reloading() || self.reserve == 0 || self.magazine >= self.spec().magazine_size
        {
            return false;
        }
        self.reload_remaining = Some(self.spec().reload_secs);
        true
    }

    fn finish_reload(&mut self) {
        let missing = self.spec().magazine_size.saturating_sub(self.magazine);
        let moved = missing.min(self.reserve);
        self.magazine += moved;
        self.reserve -= moved;
        self.reload_remaining = None;
    }
}

/// Outcome of a trigger pull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerResult {
    /// A shot left the barrel; spawn `spec.pellets` projectiles.
    Fired(WeaponSpec),
    /// The magazine was empty, so a reload started instead.
    ReloadStarted,
    /// Cooling down, mid-reload, or out of ammunition.
    NotReady,
}

/// The weapons the player carries, in slot order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loadout {
    slots: Vec<WeaponState>,
    active: usize,
}

impl Default for Loadout {
    fn default() -> Self {
        Self::standard()
    }
}

impl Loadout {
    /// Rifle, pistol, shotgun, with the rifle equipped.
    pub fn standard() -> Self {
        Self {
            slots: vec![
                WeaponState::new(WeaponKind::Rifle),
                WeaponState::new(WeaponKind::Pistol),
                WeaponState::new(WeaponKind::Shotgun),
            ],
            active: 0,
        }
    }

    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &WeaponState {
        &self.slots[self.active]
    }

    fn active_mut(&mut self) -> &mut WeaponState {
        &mut self.slots[self.active]
    }

    pub fn pull_trigger(&mut self) -> TriggerResult {
        let weapon = self.active_mut();
        if weapon.is_reloading() || weapon.cooldown > 0.0 {
            return TriggerResult::NotReady;
        }
        if weapon.magazine == 0 {
            return if weapon.start_reload() {
                TriggerResult::ReloadStarted
            } else {
                TriggerResult::NotReady
            };
        }
        let spec = weapon.spec();
        weapon.magazine -= 1;
        weapon.cooldown = 1.0 / spec.fire_rate;
        TriggerResult::Fired(spec)
    }

    pub fn reload(&mut self) -> bool {
        self.active_mut().start_reload()
    }

    /// Equip `slot`. Cancels any reload on the weapon being put away.
    /// Invalid or already-equipped slots are ignored.
    pub fn switch_to(&mut self, slot: usize) -> bool {
        if slot >= self.slots.len() || slot == self.active {
            return false;
        }
        self.active_mut().reload_remaining = None;
        self.active = slot;
        true
    }

    /// Advance cooldowns on every slot and the reload on the active one.
    pub fn tick(&mut self, dt: f32) {
        for weapon in &mut self.slots {
            weapon.cooldown = (weapon.cooldown - dt).max(0.0);
        }
        let weapon = self.active_mut();
        if let Some(remaining) = weapon.reload_remaining {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                weapon.finish_reload();
            } else {
                weapon.reload_remaining = Some(remaining);
            }
        }
    }

    pub fn view(&self) -> WeaponView {
        let weapon = self.active();
        WeaponView {
            kind: weapon.kind,
            slot: self.active,
            magazine: weapon.magazine,
            magazine_size: weapon.spec().magazine_size,
            reserve: weapon.reserve,
            reloading: weapon.is_reloading(),
            reload_remaining: weapon.reload_remaining.unwrap_or(0.0),
        }
    }

    #[cfg(test)]
    pub(crate) fn active_state_mut(&mut self) -> &mut WeaponState {
        self.active_mut()
    }
}
