//! State transitions shared by every actor kind.
//!
//! `hp == 0` only marks an actor; the effects of dying (messages, trauma,
//! score, slow-mo) run once, from `process_deaths`, and the pool release runs
//! once, from `return_to_pool_commit`. Nothing else writes `PendingReturn`
//! back to `Pooled`.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{ActorState, EntityInfo};
use super::messages::ActorDied;
use crate::common::kinds::ActorKind;
use crate::common::tunables::Tunables;
use crate::plugins::core::Score;
use crate::plugins::director::Director;
use crate::plugins::player::Player;
use crate::plugins::projectiles::BulletPool;
use crate::plugins::time_dilation::TimeDilation;
use crate::plugins::trauma::TraumaAdded;
use crate::plugins::world::Playfield;

/// Keep the membership, collide with nothing.
#[inline]
pub fn detach(layers: &mut CollisionLayers) {
    layers.filters = LayerMask::NONE;
}

pub fn detect_terminal(mut q: Query<(&EntityInfo, &mut ActorState)>) {
    for (info, mut state) in &mut q {
        if *state == ActorState::Alive && info.is_depleted() {
            *state = ActorState::Dying;
        }
    }
}

/// Death effects for pooled kinds. The player has its own sequence.
pub fn process_deaths(
    tunables: Res<Tunables>,
    mut score: ResMut<Score>,
    mut dilation: ResMut<TimeDilation>,
    mut died: MessageWriter<ActorDied>,
    mut trauma: MessageWriter<TraumaAdded>,
    mut q: Query<
        (
            Entity,
            &ActorKind,
            &EntityInfo,
            &Transform,
            &mut ActorState,
            &mut CollisionLayers,
        ),
        Without<Player>,
    >,
) {
    for (entity, kind, info, tf, mut state, mut layers) in &mut q {
        if *state != ActorState::Dying {
            continue;
        }

        died.write(ActorDied {
            entity,
            kind: *kind,
            position: tf.translation.truncate(),
            impact: info.impact,
        });
        trauma.write(TraumaAdded { amount: info.impact });

        if let ActorKind::Enemy(tier) = *kind {
            score.add(u64::from(info.max_hp));
            dilation.set_game_speed(tunables.time.kill_speed);
            debug!("{tier:?} {entity} destroyed, score {}", score.value());
        }

        detach(&mut layers);
        *state = ActorState::PendingReturn;
    }
}

/// Past the far edge in the direction of travel: back to the pool, no death effect.
pub fn leave_field(
    playfield: Res<Playfield>,
    mut q: Query<
        (&EntityInfo, &Transform, &mut ActorState, &mut CollisionLayers),
        Without<Player>,
    >,
) {
    for (info, tf, mut state, mut layers) in &mut q {
        if *state != ActorState::Alive {
            continue;
        }
        if playfield.has_left(tf.translation.truncate(), info.speed) {
            detach(&mut layers);
            *state = ActorState::PendingReturn;
        }
    }
}

/// PendingReturn -> Pooled.
///
/// Owner of the pooled invariants: hidden, at rest, colliding with nothing,
/// hp restored, and on exactly one free list.
pub fn return_to_pool_commit(
    mut bullets: ResMut<BulletPool>,
    mut director: ResMut<Director>,
    mut q: Query<(
        Entity,
        &ActorKind,
        &mut ActorState,
        &mut EntityInfo,
        &mut LinearVelocity,
        &mut CollisionLayers,
        Option<&mut Visibility>,
    )>,
) {
    for (entity, kind, mut state, mut info, mut vel, mut layers, vis) in &mut q {
        if *state != ActorState::PendingReturn {
            continue;
        }

        let released = match *kind {
            ActorKind::Bullet => bullets.release(entity),
            ActorKind::Enemy(tier) => director.release(tier, entity),
            ActorKind::Player => {
                *state = ActorState::Destroyed;
                continue;
            }
        };
        if let Err(err) = released {
            warn!("return to pool refused: {err}");
            continue;
        }

        *state = ActorState::Pooled;
        info.restore();
        vel.0 = Vec2::ZERO;
        detach(&mut layers);
        if let Some(mut vis) = vis {
            *vis = Visibility::Hidden;
        }
    }
}
