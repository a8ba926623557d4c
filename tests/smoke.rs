mod common;

use bevy::prelude::*;
use juicy_shmup::common::kinds::{ActorKind, EnemyTier};
use juicy_shmup::common::state::GameState;
use juicy_shmup::plugins::actors::{actor_snapshots, ActorState};
use juicy_shmup::plugins::director::Director;
use juicy_shmup::plugins::player::Player;
use juicy_shmup::plugins::projectiles::{BulletPool, SpawnBulletRequest};

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::InGame
    );
}

#[test]
fn entering_the_game_spawns_player_and_prewarms_bullets() {
    let mut app = common::app_headless();
    common::enter_game(&mut app);

    let players = app
        .world_mut()
        .query_filtered::<&ActorState, With<Player>>()
        .iter(app.world())
        .copied()
        .collect::<Vec<_>>();
    assert_eq!(players, vec![ActorState::Alive]);

    let pool = app.world().resource::<BulletPool>();
    assert_eq!(pool.free_len(), 64);
    assert_eq!(pool.checked_out(), 0);
}

#[test]
fn first_grunt_arrives_after_its_base_timer() {
    let mut app = common::app_headless();
    common::enter_game(&mut app);
    assert_eq!(app.world().resource::<Director>().live(EnemyTier::Grunt), 0);

    // 1 s of fixed steps at 64 Hz, plus slack.
    common::tick(&mut app, 70);

    assert_eq!(app.world().resource::<Director>().live(EnemyTier::Grunt), 1);
    let grunts = actor_snapshots(app.world_mut())
        .into_iter()
        .filter(|s| s.kind == ActorKind::Enemy(EnemyTier::Grunt))
        .count();
    assert_eq!(grunts, 1);
}

#[test]
fn shot_requests_are_served_from_the_prewarmed_pool() {
    let mut app = common::app_headless();
    common::enter_game(&mut app);

    app.world_mut().write_message(SpawnBulletRequest {
        position: Vec2::new(0.0, -200.0),
        friendly: true,
        owner: None,
    });
    app.update();

    let pool = app.world().resource::<BulletPool>();
    assert_eq!(pool.checked_out(), 1);
    assert_eq!(pool.free_len(), 63);
    assert_eq!(pool.constructed(), 64);
}
