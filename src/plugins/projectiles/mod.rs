//! Projectiles: message-based producer -> consumer spawning over a pooled set
//! of bullet entities.
//!
//! ```text
//! FixedUpdate
//!   SimSet::Input / Behave   producers write SpawnBulletRequest
//!   SimSet::Allocate         allocate_bullets_from_pool
//!                            (pool.obtain -> construct once -> activate)
//!                            writes ShotFired, muzzle TraumaAdded
//!   SimSet::Behave           hold_bullet_course
//! FixedPostUpdate
//!   ResolveSet::Contacts     combat resolver damages bullets like any actor
//!   ResolveSet::Commit       actors::return_to_pool_commit releases them here
//! ```
//!
//! Producers never borrow the pool; the allocator is its only writer besides
//! the commit system.

pub mod allocator;
pub mod components;
pub mod flight;
pub mod messages;
pub mod pool;

use bevy::prelude::*;

use crate::common::schedule::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub use components::Bullet;
pub use messages::{ShotFired, SpawnBulletRequest};
pub use pool::BulletPool;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let cap = app.world().resource::<Tunables>().bullet.pool_cap;
        app.insert_resource(BulletPool::new(cap))
            .add_message::<SpawnBulletRequest>()
            .add_message::<ShotFired>();

        app.add_systems(OnEnter(GameState::InGame), pool::prewarm_bullet_pool)
            .add_systems(OnExit(GameState::InGame), pool::clear_bullet_pool);

        app.add_systems(
            FixedUpdate,
            (
                flight::hold_bullet_course.in_set(SimSet::Behave),
                allocator::allocate_bullets_from_pool.in_set(SimSet::Allocate),
            ),
        );
    }
}

#[cfg(test)]
mod tests;
