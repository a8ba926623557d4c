//! Discrete events for dressing systems (audio, particles, HUD).
//!
//! The core only writes these; nothing in the simulation reads them back.

use bevy::prelude::*;

use crate::common::kinds::ActorKind;

/// Emitted once per death. Leaving the field is not a death.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ActorDied {
    pub entity: Entity,
    pub kind: ActorKind,
    pub position: Vec2,
    pub impact: f32,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PlayerDied {
    pub position: Vec2,
}
