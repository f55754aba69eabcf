//! Target perception.
//!
//! Range queries over plain positions. Line of sight is not modelled; agents
//! notice anything inside their detection range.

use glam::Vec3;

use royale_core::enums::TargetRef;

/// An alive agent as seen by the others this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSighting {
    pub id: u32,
    pub position: Vec3,
}

/// A candidate target within range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub target: TargetRef,
    pub position: Vec3,
    pub distance: f32,
}

/// The player, if alive (`player` is `Some`) and within `range`.
pub fn detect_player(position: Vec3, player: Option<Vec3>, range: f32) -> Option<Contact> {
    let player = player?;
    let distance = position.distance(player);
    (distance <= range).then_some(Contact {
        target: TargetRef::Player,
        position: player,
        distance,
    })
}

/// Nearest other agent within `range`. Ties keep the earliest sighting.
pub fn nearest_agent(
    self_id: u32,
    position: Vec3,
    agents: &[AgentSighting],
    range: f32,
) -> Option<Contact> {
    agents
        .iter()
        .filter(|a| a.id != self_id)
        .map(|a| Contact {
            target: TargetRef::Agent(a.id),
            position: a.position,
            distance: position.distance(a.position),
        })
        .filter(|c| c.distance <= range)
        .fold(None, |best: Option<Contact>, c| match best {
            Some(b) if b.distance <= c.distance => Some(b),
            _ => Some(c),
        })
}
