//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `juicy_shmup::game::configure_headless` to install gameplay plugins.
//! - time advances by exactly one fixed step per `update`, so tests count ticks.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

use juicy_shmup::common::kinds::EnemyTier;
use juicy_shmup::common::tunables::Tunables;
use juicy_shmup::plugins::director::Director;
use juicy_shmup::plugins::enemies::{construct_enemy, init_enemy};
use juicy_shmup::plugins::projectiles::pool::{activate_bullet, construct_bullet};
use juicy_shmup::plugins::projectiles::{BulletPool, SpawnBulletRequest};

pub const STEP: f64 = 1.0 / 64.0;

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        TransformPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(STEP)));
    app.insert_resource(tunables);

    juicy_shmup::game::configure_headless(&mut app);
    // `App::run` would do this; tests drive `update` directly.
    app.finish();
    app.cleanup();
    app
}

/// Run the state transition into `InGame` and a couple of ticks past it.
pub fn enter_game(app: &mut App) {
    for _ in 0..3 {
        app.update();
    }
}

pub fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

/// Check out a bullet through the pool, exactly like the allocator does.
pub fn fire_bullet(app: &mut App, position: Vec2, friendly: bool) -> Entity {
    app.world_mut()
        .run_system_once(
            move |mut commands: Commands, tunables: Res<Tunables>, mut pool: ResMut<BulletPool>| {
                let cfg = &tunables.bullet;
                let req = SpawnBulletRequest { position, friendly, owner: None };
                let issued = pool
                    .obtain(|| construct_bullet(&mut commands, cfg))
                    .expect("bullet pool has room");
                activate_bullet(&mut commands, issued.entity, &req, cfg);
                issued.entity
            },
        )
        .expect("system runs")
}

/// Check out an enemy through the director, exactly like the spawner does.
pub fn spawn_enemy(app: &mut App, tier: EnemyTier, position: Vec2) -> Entity {
    app.world_mut()
        .run_system_once(
            move |mut commands: Commands, tunables: Res<Tunables>, mut director: ResMut<Director>| {
                let cfg = tunables.enemies.get(tier);
                let issued = director
                    .obtain(tier, || construct_enemy(&mut commands, tier, cfg))
                    .expect("enemy pool has room");
                init_enemy(&mut commands, issued.entity, tier, cfg, position, 0.0);
                issued.entity
            },
        )
        .expect("system runs")
}
