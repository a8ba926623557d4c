//! Buffered shot requests.
//!
//! Producers (player fire control, enemy burst fire) only write intent; the
//! allocator is the single writer of the bullet pool.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnBulletRequest {
    pub position: Vec2,
    /// Player-side bullet when `true`.
    pub friendly: bool,
    pub owner: Option<Entity>,
}

/// A bullet actually left the muzzle (requests skipped on exhaustion don't count).
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ShotFired {
    pub position: Vec2,
    pub friendly: bool,
}
