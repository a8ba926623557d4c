//! What an actor is.
//!
//! Collision categories are chosen from the tier itself, never from a type name.

use avian2d::prelude::CollisionLayers;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::layers::{self, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    /// Base tier: snakes down toward the player.
    Grunt,
    /// Elite tier: homes, keeps range, burst-fires.
    Dogfighter,
    /// Squad tier: dense dives on the dedicated swarm layer.
    Swarmer,
    /// Heavy dogfight tier.
    Gunship,
}

impl EnemyTier {
    pub const COUNT: usize = 4;
    pub const ALL: [Self; Self::COUNT] = [Self::Grunt, Self::Dogfighter, Self::Swarmer, Self::Gunship];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn membership(self) -> Layer {
        match self {
            Self::Swarmer => Layer::Swarm,
            _ => Layer::Enemy,
        }
    }

    #[inline]
    pub fn collision_layers(self) -> CollisionLayers {
        match self {
            Self::Swarmer => layers::swarm_layers(),
            _ => layers::enemy_layers(),
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Player,
    Enemy(EnemyTier),
    Bullet,
}

impl ActorKind {
    #[inline]
    pub const fn is_enemy(self) -> bool {
        matches!(self, Self::Enemy(_))
    }
}
