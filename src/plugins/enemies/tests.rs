//! Enemy steering and init tests.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::behaviour::{dive_step, dogfight_step, snake_step, velocity_floor, BurstFire};
use super::{construct_enemy, init_enemy, steer_enemies, Brain, Enemy};
use crate::common::kinds::{ActorKind, EnemyTier};
use crate::common::layers::Layer;
use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once, time_with_delta};
use crate::common::tunables::{Behaviour, DogfightConfig, Tunables};
use crate::plugins::actors::{ActorState, EntityInfo};
use crate::plugins::player::Player;
use crate::plugins::projectiles::SpawnBulletRequest;
use crate::plugins::world::Playfield;

fn dogfight_cfg() -> DogfightConfig {
    match Tunables::default().enemies.dogfighter.behaviour {
        Behaviour::Dogfight(cfg) => cfg,
        other => panic!("dogfighter configured as {other:?}"),
    }
}

#[test]
fn velocity_floor_only_restores_lost_speed() {
    assert_eq!(velocity_floor(-2.0, -8.0), -8.0);
    assert_eq!(velocity_floor(3.0, -8.0), -8.0);
    assert_eq!(velocity_floor(-12.0, -8.0), -12.0);
    assert_eq!(velocity_floor(1.0, 5.0), 5.0);
}

#[test]
fn snake_drifts_toward_the_player() {
    let v = snake_step(Vec2::new(0.0, -256.0), Vec2::new(100.0, 200.0), Some(Vec2::new(0.0, -300.0)), -256.0, 40_000.0, 0.1);
    assert!(v.x < 0.0);
    assert_eq!(v.y, -256.0);

    let v = snake_step(Vec2::new(0.0, -256.0), Vec2::new(-100.0, 0.0), Some(Vec2::new(0.0, -300.0)), -256.0, 40_000.0, 0.1);
    assert!(v.x > 0.0);
}

#[test]
fn snake_lateral_speed_is_capped() {
    let mut v = Vec2::new(0.0, -256.0);
    for _ in 0..1000 {
        v = snake_step(v, Vec2::new(5.0, 0.0), Some(Vec2::new(0.0, -1.0)), -256.0, 1.0e6, 0.1);
    }
    assert!(v.x.abs() <= 256.0);
}

#[test]
fn snake_without_a_target_keeps_falling() {
    let v = snake_step(Vec2::new(3.0, 0.0), Vec2::ZERO, None, -256.0, 40_000.0, 0.1);
    assert_eq!(v, Vec2::new(3.0, -256.0));
}

#[test]
fn dogfight_stops_lateral_motion_inside_epsilon() {
    let cfg = dogfight_cfg();
    let s = dogfight_step(Vec2::new(50.0, 0.0), Vec2::new(2.0, 300.0), Some(Vec2::new(0.0, 0.0)), -256.0, &cfg, 0.1);
    assert_eq!(s.velocity.x, 0.0);
}

#[test]
fn dogfight_homes_when_player_is_below() {
    let cfg = dogfight_cfg();
    let s = dogfight_step(Vec2::ZERO, Vec2::new(100.0, 300.0), Some(Vec2::new(0.0, 0.0)), -256.0, &cfg, 0.1);
    assert!(s.velocity.x < 0.0);
    assert!(s.velocity.x.abs() <= cfg.max_lateral_speed);
}

#[test]
fn dogfight_keeps_range() {
    let cfg = dogfight_cfg();
    let player = Some(Vec2::ZERO);

    let far = dogfight_step(Vec2::ZERO, Vec2::new(0.0, cfg.engage_range + 50.0), player, -256.0, &cfg, 0.1);
    assert_eq!((far.velocity.y, far.engaged), (-256.0, false));

    let mid = (cfg.engage_range + cfg.retreat_range) * 0.5;
    let hold = dogfight_step(Vec2::ZERO, Vec2::new(0.0, mid), player, -256.0, &cfg, 0.1);
    assert_eq!((hold.velocity.y, hold.engaged), (0.0, true));

    let close = dogfight_step(Vec2::ZERO, Vec2::new(0.0, cfg.retreat_range - 10.0), player, -256.0, &cfg, 0.1);
    assert_eq!((close.velocity.y, close.engaged), (256.0, true));
}

#[test]
fn burst_fire_cadence() {
    // 3 shots 0.5 s apart, then a 1.5 s reload. Binary-exact step.
    let mut burst = BurstFire::new(3, 0.5, 1.5);
    let shot_ticks: Vec<usize> = (0..40).filter(|_| burst.tick(0.125, true)).collect();
    // The first shot overshoots by one step; the remainder is kept, so the
    // burst catches up and later gaps are exact (4 and 12 steps).
    assert_eq!(shot_ticks, vec![0, 3, 7, 19, 23, 27, 39]);
}

#[test]
fn burst_fire_holds_while_disengaged() {
    let mut burst = BurstFire::new(2, 0.5, 1.0);
    for _ in 0..100 {
        assert!(!burst.tick(0.1, false));
    }
    // Ready, not banked: exactly one shot now, the next after the delay.
    assert!(burst.tick(0.1, true));
    assert!(!burst.tick(0.1, true));
    assert_eq!(burst.shots_left(), 1);
}

#[test]
fn dive_weave_is_bounded() {
    let mut phase = 0.0;
    for _ in 0..500 {
        let v = dive_step(-384.0, 90.0, 3.0, &mut phase, 0.016, -384.0);
        assert!(v.x.abs() <= 90.0 * 3.0 + 1e-3);
        assert_eq!(v.y, -384.0);
    }
}

#[test]
fn construct_then_init_gives_a_live_enemy() {
    let t = Tunables::default();
    let mut world = World::new();

    let cfg = t.enemies.swarmer.clone();
    let e = run_system_once(&mut world, move |mut commands: Commands| {
        let e = construct_enemy(&mut commands, EnemyTier::Swarmer, &cfg);
        init_enemy(&mut commands, e, EnemyTier::Swarmer, &cfg, Vec2::new(10.0, 400.0), 0.5);
        e
    });

    assert_eq!(*world.get::<ActorState>(e).unwrap(), ActorState::Alive);
    assert_eq!(*world.get::<ActorKind>(e).unwrap(), ActorKind::Enemy(EnemyTier::Swarmer));
    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(layers.memberships.has_all(Layer::Swarm));
    assert!(layers.filters.has_all(Layer::PlayerBullet));
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(0.0, -384.0));
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Visible);
}

#[test]
fn constructed_slot_is_inert() {
    let t = Tunables::default();
    let mut world = World::new();
    let cfg = t.enemies.grunt.clone();
    let e = run_system_once(&mut world, move |mut commands: Commands| {
        construct_enemy(&mut commands, EnemyTier::Grunt, &cfg)
    });

    assert_eq!(*world.get::<ActorState>(e).unwrap(), ActorState::Pooled);
    assert_eq!(world.get::<CollisionLayers>(e).unwrap().filters, LayerMask::NONE);
}

fn steer_world(dt: f32) -> World {
    let t = Tunables::default();
    let mut world = World::new();
    world.insert_resource(Playfield::from_config(&t.playfield));
    world.insert_resource(t);
    world.insert_resource(time_with_delta(dt));
    ensure_messages::<SpawnBulletRequest>(&mut world);
    world
}

#[test]
fn engaged_dogfighter_requests_hostile_shots() {
    let mut world = steer_world(0.1);
    let cfg = world.resource::<Tunables>().enemies.dogfighter.clone();
    world.spawn((Player, ActorState::Alive, Transform::from_xyz(0.0, -100.0, 1.0)));
    let df = world
        .spawn((
            Enemy { tier: EnemyTier::Dogfighter, half_size: cfg.half_size },
            EntityInfo::enemy(&cfg),
            ActorState::Alive,
            Transform::from_xyz(0.0, 150.0, 1.0),
            LinearVelocity(Vec2::new(0.0, cfg.stats.speed)),
            Brain::for_tier(&cfg, 0.0),
        ))
        .id();

    run_system_once(&mut world, steer_enemies);

    let shots = drain_messages::<SpawnBulletRequest>(&mut world);
    assert_eq!(shots.len(), 1);
    assert!(!shots[0].friendly);
    assert_eq!(shots[0].owner, Some(df));
    assert!(shots[0].position.y < 150.0);
    // Inside engage range, outside retreat range: hold.
    assert_eq!(world.get::<LinearVelocity>(df).unwrap().y, 0.0);
}

#[test]
fn dogfighters_hold_fire_once_the_player_is_down() {
    let mut world = steer_world(0.1);
    let cfg = world.resource::<Tunables>().enemies.dogfighter.clone();
    world.spawn((Player, ActorState::Destroyed, Transform::from_xyz(0.0, -100.0, 1.0)));
    world.spawn((
        Enemy { tier: EnemyTier::Dogfighter, half_size: cfg.half_size },
        EntityInfo::enemy(&cfg),
        ActorState::Alive,
        Transform::from_xyz(0.0, 150.0, 1.0),
        LinearVelocity::ZERO,
        Brain::for_tier(&cfg, 0.0),
    ));

    run_system_once(&mut world, steer_enemies);

    assert!(drain_messages::<SpawnBulletRequest>(&mut world).is_empty());
}

#[test]
fn retreat_stops_at_the_top_edge() {
    let mut world = steer_world(0.1);
    let cfg = world.resource::<Tunables>().enemies.dogfighter.clone();
    let top = world.resource::<Playfield>().top();
    world.spawn((Player, ActorState::Alive, Transform::from_xyz(0.0, top - 60.0, 1.0)));
    let df = world
        .spawn((
            Enemy { tier: EnemyTier::Dogfighter, half_size: cfg.half_size },
            EntityInfo::enemy(&cfg),
            ActorState::Alive,
            Transform::from_xyz(0.0, top - 10.0, 1.0),
            LinearVelocity::ZERO,
            Brain::for_tier(&cfg, 0.0),
        ))
        .id();

    run_system_once(&mut world, steer_enemies);

    assert_eq!(world.get::<LinearVelocity>(df).unwrap().y, 0.0);
}
