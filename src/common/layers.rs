//! Collision layers.
//!
//! Friendly fire is excluded here, by category: no faction lists its own
//! members (or its own bullets) in its filters, so avian never reports such a
//! pair.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Enemy,
    /// Dense squad tier. Never filters itself, so squads cannot pile up.
    Swarm,
    PlayerBullet,
    EnemyBullet,
    Item,
}

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Player,
        [Layer::Enemy, Layer::Swarm, Layer::EnemyBullet, Layer::Item],
    )
}

#[inline]
pub fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::Player, Layer::PlayerBullet])
}

#[inline]
pub fn swarm_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Swarm, [Layer::Player, Layer::PlayerBullet])
}

#[inline]
pub fn bullet_layers(friendly: bool) -> CollisionLayers {
    if friendly {
        CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy, Layer::Swarm])
    } else {
        CollisionLayers::new(Layer::EnemyBullet, [Layer::Player])
    }
}

/// "Disabled" without structural changes: keep the membership, collide with nothing.
#[inline]
pub fn inert_layers(membership: Layer) -> CollisionLayers {
    CollisionLayers::new(membership, [] as [Layer; 0])
}
