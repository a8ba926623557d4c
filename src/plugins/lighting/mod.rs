//! Lighting plugin (Firefly) (render-only).
//!
//! The ship carries a light that goes out with it, enemies occlude from the
//! moment their slot is constructed, and every death pops a short flash whose
//! reach follows the actor's impact.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::actors::{ActorDied, PlayerDied};
use crate::plugins::enemies::Enemy;
use crate::plugins::player::Player;

const SHIP_LIGHT_RANGE: f32 = 450.0;
/// Flash reach at impact 1.0; bullet pops stay small.
const FLASH_RANGE_PER_IMPACT: f32 = 900.0;
const FLASH_MIN_RANGE: f32 = 40.0;
/// Real seconds.
const FLASH_LIFETIME: f32 = 0.18;

#[derive(Component)]
pub struct ShipLight;

#[derive(Component, Debug)]
pub struct DeathFlash {
    timer: Timer,
    peak_range: f32,
}

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), spawn_ship_light).add_systems(
        Update,
        (
            track_ship,
            attach_enemy_occluders,
            spawn_death_flashes,
            fade_death_flashes,
        )
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_ship_light(mut commands: Commands) {
    commands.spawn((
        Name::new("ShipLight"),
        ShipLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: SHIP_LIGHT_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        Visibility::Visible,
        DespawnOnExit(GameState::InGame),
    ));
}

fn track_ship(
    q_player: Query<(&Transform, &Visibility), (With<Player>, Without<ShipLight>)>,
    mut q_light: Query<(&mut Transform, &mut Visibility), (With<ShipLight>, Without<Player>)>,
) {
    let Ok((ship, ship_vis)) = q_player.single() else {
        return;
    };
    let Ok((mut light, mut light_vis)) = q_light.single_mut() else {
        return;
    };

    light.translation = ship.translation.truncate().extend(light.translation.z);
    if *light_vis != *ship_vis {
        *light_vis = *ship_vis;
    }
}

fn attach_enemy_occluders(mut commands: Commands, q_new: Query<(Entity, &Enemy), Added<Enemy>>) {
    for (e, enemy) in &q_new {
        commands.entity(e).insert(Occluder2d::circle(enemy.half_size));
    }
}

#[inline]
fn flash_range(impact: f32) -> f32 {
    (impact * FLASH_RANGE_PER_IMPACT).max(FLASH_MIN_RANGE)
}

fn spawn_flash(commands: &mut Commands, position: Vec2, color: Color, impact: f32) {
    let peak_range = flash_range(impact);
    commands.spawn((
        Name::new("DeathFlash"),
        DeathFlash {
            timer: Timer::from_seconds(FLASH_LIFETIME, TimerMode::Once),
            peak_range,
        },
        PointLight2d { color, radius: peak_range, ..default() },
        Transform::from_translation(position.extend(10.0)),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_death_flashes(
    mut commands: Commands,
    mut died: MessageReader<ActorDied>,
    mut player_died: MessageReader<PlayerDied>,
) {
    for ev in died.read() {
        spawn_flash(&mut commands, ev.position, Color::srgb(1.0, 0.6, 0.3), ev.impact);
    }
    for ev in player_died.read() {
        spawn_flash(&mut commands, ev.position, Color::srgb(0.6, 0.85, 1.0), 1.0);
    }
}

/// Shrinks on real time, so a flash reads the same under slow-mo.
fn fade_death_flashes(
    mut commands: Commands,
    real: Res<Time<Real>>,
    mut q: Query<(Entity, &mut DeathFlash, &mut PointLight2d)>,
) {
    for (e, mut flash, mut light) in &mut q {
        flash.timer.tick(real.delta());
        if flash.timer.is_finished() {
            commands.entity(e).despawn();
            continue;
        }
        light.radius = flash.peak_range * flash.timer.fraction_remaining();
    }
}
