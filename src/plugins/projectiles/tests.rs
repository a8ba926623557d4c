//! Projectile tests: pool prewarm, allocation, recycling and exhaustion.
//!
//! Systems are run once against a bare `World`; no physics step is involved.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::messages::{ShotFired, SpawnBulletRequest};
use super::pool::BulletPool;
use super::{allocator, flight, pool, Bullet};
use crate::common::layers::{bullet_layers, Layer};
use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once, world_with_tunables};
use crate::common::tunables::Tunables;
use crate::plugins::actors::{ActorState, EntityInfo};
use crate::plugins::trauma::TraumaAdded;

fn bullet_world(tunables: Tunables) -> World {
    let mut world = World::new();
    world.insert_resource(BulletPool::new(tunables.bullet.pool_cap));
    world.insert_resource(tunables);
    ensure_messages::<SpawnBulletRequest>(&mut world);
    ensure_messages::<ShotFired>(&mut world);
    ensure_messages::<TraumaAdded>(&mut world);
    world
}

fn request(world: &mut World, position: Vec2, friendly: bool) {
    world.write_message(SpawnBulletRequest { position, friendly, owner: None });
}

fn bullets(world: &mut World) -> Vec<(Entity, ActorState, Vec2, Vec2)> {
    world
        .query_filtered::<(Entity, &ActorState, &Transform, &LinearVelocity), With<Bullet>>()
        .iter(world)
        .map(|(e, s, tf, v)| (e, *s, tf.translation.truncate(), v.0))
        .collect()
}

#[test]
fn prewarm_spawns_inert_hidden_slots() {
    let mut world = world_with_tunables();
    world.insert_resource(BulletPool::default());

    run_system_once(&mut world, pool::prewarm_bullet_pool);

    let prewarm = world.resource::<Tunables>().bullet.prewarm;
    let pool = world.resource::<BulletPool>();
    assert_eq!(pool.free_len(), prewarm);
    assert_eq!(pool.checked_out(), 0);

    let mut q = world.query_filtered::<(&ActorState, &Visibility, &CollisionLayers), With<Bullet>>();
    assert_eq!(q.iter(&world).count(), prewarm);
    for (state, vis, layers) in q.iter(&world) {
        assert_eq!(*state, ActorState::Pooled);
        assert_eq!(*vis, Visibility::Hidden);
        assert_eq!(layers.filters, LayerMask::NONE);
    }
}

#[test]
fn prewarm_never_exceeds_the_hard_cap() {
    let mut tunables = Tunables::default();
    tunables.bullet.pool_cap = Some(4);
    tunables.bullet.prewarm = 10;
    let mut world = bullet_world(tunables);

    run_system_once(&mut world, pool::prewarm_bullet_pool);

    assert_eq!(world.resource::<BulletPool>().constructed(), 4);
}

#[test]
fn friendly_request_activates_a_bullet_heading_up() {
    let mut world = bullet_world(Tunables::default());
    request(&mut world, Vec2::new(5.0, -300.0), true);

    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    let all = bullets(&mut world);
    assert_eq!(all.len(), 1);
    let (e, state, pos, vel) = all[0];
    assert_eq!(state, ActorState::Alive);
    assert_eq!(pos, Vec2::new(5.0, -300.0));
    assert!(vel.y > 0.0 && vel.x == 0.0);

    assert_eq!(*world.get::<CollisionLayers>(e).unwrap(), bullet_layers(true));
    assert!(world.get::<EntityInfo>(e).unwrap().friendly);
    assert_eq!(world.resource::<BulletPool>().checked_out(), 1);

    let shots = drain_messages::<ShotFired>(&mut world);
    assert_eq!(shots, vec![ShotFired { position: Vec2::new(5.0, -300.0), friendly: true }]);
    let kicks = drain_messages::<TraumaAdded>(&mut world);
    assert_eq!(kicks.len(), 1);
}

#[test]
fn hostile_request_heads_down_without_muzzle_kick() {
    let mut world = bullet_world(Tunables::default());
    request(&mut world, Vec2::new(0.0, 200.0), false);

    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    let (e, _, _, vel) = bullets(&mut world)[0];
    assert!(vel.y < 0.0);
    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(layers.memberships.has_all(Layer::EnemyBullet));
    assert!(drain_messages::<TraumaAdded>(&mut world).is_empty());
}

#[test]
fn released_slot_is_reused_without_construction() {
    let mut world = bullet_world(Tunables::default());
    request(&mut world, Vec2::ZERO, true);
    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    let (first, ..) = bullets(&mut world)[0];
    world.resource_mut::<BulletPool>().release(first).unwrap();
    *world.get_mut::<ActorState>(first).unwrap() = ActorState::Pooled;

    request(&mut world, Vec2::new(0.0, 10.0), false);
    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    let all = bullets(&mut world);
    assert_eq!(all.len(), 1, "no second slot constructed");
    assert_eq!(all[0].0, first);
    assert_eq!(all[0].1, ActorState::Alive);
    assert!(!world.get::<EntityInfo>(first).unwrap().friendly);
    assert_eq!(world.resource::<BulletPool>().high_water(), 1);
}

#[test]
fn exhausted_pool_skips_the_shot() {
    let mut tunables = Tunables::default();
    tunables.bullet.pool_cap = Some(1);
    let mut world = bullet_world(tunables);
    request(&mut world, Vec2::ZERO, true);
    request(&mut world, Vec2::ONE, true);

    run_system_once(&mut world, allocator::allocate_bullets_from_pool);

    assert_eq!(bullets(&mut world).len(), 1);
    assert_eq!(drain_messages::<ShotFired>(&mut world).len(), 1);
}

#[test]
fn course_is_restored_for_live_bullets_only() {
    let mut world = World::new();
    let cfg = Tunables::default().bullet;
    let live = world
        .spawn((
            Bullet,
            ActorState::Alive,
            EntityInfo::bullet(&cfg, false),
            LinearVelocity(Vec2::new(30.0, -1.0)),
        ))
        .id();
    let parked = world
        .spawn((Bullet, ActorState::Pooled, EntityInfo::bullet(&cfg, true), LinearVelocity::ZERO))
        .id();

    run_system_once(&mut world, flight::hold_bullet_course);

    assert_eq!(world.get::<LinearVelocity>(live).unwrap().0, Vec2::new(0.0, -cfg.stats.speed));
    assert_eq!(world.get::<LinearVelocity>(parked).unwrap().0, Vec2::ZERO);
}
