//! Bullet slots: heavy construction once, cheap activation every shot.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{bullet_color, Bullet};
use super::messages::SpawnBulletRequest;
use crate::common::layers::{bullet_layers, inert_layers, Layer};
use crate::common::kinds::ActorKind;
use crate::common::state::GameState;
use crate::common::tunables::{BulletConfig, Tunables};
use crate::plugins::actors::{ActorState, EntityInfo};
use crate::plugins::pool::EntityPool;

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct BulletPool(EntityPool);

impl BulletPool {
    pub fn new(capacity: Option<usize>) -> Self {
        Self(EntityPool::with_capacity(capacity))
    }
}

/// Body, collider and sprite for one bullet slot. Spawned inert and hidden.
///
/// Bullets are sensors with swept CCD: fast enough to tunnel through a
/// 20 px enemy in one step otherwise, and they never push what they hit.
pub fn construct_bullet(commands: &mut Commands, cfg: &BulletConfig) -> Entity {
    commands
        .spawn((
            Name::new("Bullet"),
            Bullet,
            ActorKind::Bullet,
            ActorState::Pooled,
            EntityInfo::bullet(cfg, true),
            Sprite {
                color: bullet_color(true),
                custom_size: Some(Vec2::splat(cfg.radius * 2.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 2.0),
            Visibility::Hidden,
            (
                RigidBody::Dynamic,
                Collider::circle(cfg.radius),
                Sensor,
                SweptCcd::default(),
                inert_layers(Layer::PlayerBullet),
                LinearVelocity::ZERO,
                CollisionEventsEnabled,
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Logical init: faction, stats, position, course. Same path for fresh and recycled slots.
pub fn activate_bullet(
    commands: &mut Commands,
    entity: Entity,
    req: &SpawnBulletRequest,
    cfg: &BulletConfig,
) {
    let info = EntityInfo::bullet(cfg, req.friendly);
    commands.entity(entity).insert((
        ActorState::Alive,
        info,
        Transform::from_translation(req.position.extend(2.0)),
        LinearVelocity(Vec2::new(0.0, info.speed)),
        bullet_layers(req.friendly),
        Sprite {
            color: bullet_color(req.friendly),
            custom_size: Some(Vec2::splat(cfg.radius * 2.0)),
            ..default()
        },
        Visibility::Visible,
    ));
}

/// Fresh pool for the session, with `prewarm` slots already constructed.
pub fn prewarm_bullet_pool(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut pool: ResMut<BulletPool>,
) {
    let cfg = &tunables.bullet;
    *pool = BulletPool::new(cfg.pool_cap);

    let n = cfg.pool_cap.map_or(cfg.prewarm, |cap| cfg.prewarm.min(cap));
    for _ in 0..n {
        let e = construct_bullet(&mut commands, cfg);
        if let Err(err) = pool.stock(e) {
            warn!("bullet prewarm stopped early: {err}");
            commands.entity(e).despawn();
            break;
        }
    }
    debug!("bullet pool prewarmed with {n} slots");
}

/// Slots are despawned with the session; forget them.
pub fn clear_bullet_pool(mut pool: ResMut<BulletPool>) {
    pool.clear();
}
