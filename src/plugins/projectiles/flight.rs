use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::Bullet;
use crate::plugins::actors::{ActorState, EntityInfo};

/// Bullets fly straight along Y at their nominal speed.
pub fn hold_bullet_course(
    mut q: Query<(&EntityInfo, &ActorState, &mut LinearVelocity), With<Bullet>>,
) {
    for (info, state, mut vel) in &mut q {
        if *state == ActorState::Alive {
            vel.0 = Vec2::new(0.0, info.speed);
        }
    }
}
