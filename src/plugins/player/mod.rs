//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard + gamepad into `PlayerInput`
//! - FixedUpdate: velocity from input, fire control, clamp to the playfield
//! - FixedPostUpdate: death sequence, then hold the death slow-mo
//! - Update (real time): count down to `GameOver`

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::kinds::ActorKind;
use crate::common::layers::player_layers;
use crate::common::schedule::{ResolveSet, SimSet};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::actors::lifecycle::detach;
use crate::plugins::actors::{ActorState, EntityInfo, PlayerDied};
use crate::plugins::enemies::Enemy;
use crate::plugins::projectiles::SpawnBulletRequest;
use crate::plugins::time_dilation::{simulation_running, TimeDilation};
use crate::plugins::trauma::TraumaAdded;
use crate::plugins::world::Playfield;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Resolved input, whatever the device.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub fire: bool,
}

/// Minimum interval between shots.
///
/// The timer only runs while the trigger is held, and keeps its remainder
/// when it fires, so the rate holds at any step size.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FireControl {
    shot_timer: f32,
    fire_delay: f32,
}

impl FireControl {
    pub fn new(fire_delay: f32) -> Self {
        Self { shot_timer: 0.0, fire_delay: fire_delay.max(f32::EPSILON) }
    }

    pub fn tick(&mut self, dt: f32, held: bool) -> bool {
        if !held {
            return false;
        }
        self.shot_timer -= dt;
        if self.shot_timer > 0.0 {
            return false;
        }
        self.shot_timer += self.fire_delay;
        true
    }
}

/// Real seconds left before `GameOver`; `None` while the player is alive.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct GameOverCountdown(pub Option<f32>);

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<GameOverCountdown>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (
                gather_input,
                game_over_countdown.run_if(simulation_running),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (
                (apply_movement, fire).in_set(SimSet::Input),
                clamp_to_playfield.in_set(SimSet::Behave),
            ),
        )
        .add_systems(
            FixedPostUpdate,
            (
                player_death.in_set(ResolveSet::Deaths),
                // Again after the step, so the stepped pose never leaves the field.
                (clamp_to_playfield, hold_death_speed).in_set(ResolveSet::Feel),
            ),
        );
}

fn spawn(
    mut commands: Commands,
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    mut countdown: ResMut<GameOverCountdown>,
) {
    let cfg = &tunables.player;
    countdown.0 = None;

    commands.spawn((
        Name::new("Player"),
        Player,
        ActorKind::Player,
        ActorState::Alive,
        EntityInfo::player(cfg),
        FireControl::new(cfg.fire_delay),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(cfg.half_size * 2.0)),
            ..default()
        },
        Transform::from_xyz(0.0, playfield.bottom() + cfg.spawn_height, 1.0),
        (
            RigidBody::Kinematic,
            Collider::circle(cfg.half_size),
            player_layers(),
            LinearVelocity::ZERO,
            CollisionEventsEnabled,
        ),
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<PlayerInput>,
) {
    let mut axis = Vec2::ZERO;
    let mut fire = false;

    if let Some(keys) = keys {
        if keys.pressed(KeyCode::ArrowUp) {
            axis.y += 1.0;
        }
        if keys.pressed(KeyCode::ArrowDown) {
            axis.y -= 1.0;
        }
        if keys.pressed(KeyCode::ArrowLeft) {
            axis.x -= 1.0;
        }
        if keys.pressed(KeyCode::ArrowRight) {
            axis.x += 1.0;
        }
        fire |= keys.any_pressed([KeyCode::Space, KeyCode::KeyZ]);
    }

    for pad in &gamepads {
        axis += pad.left_stick();
        fire |= pad.pressed(GamepadButton::South);
    }

    *input = PlayerInput { move_axis: axis.clamp_length_max(1.0), fire };
}

/// Input scaled by speed, each axis capped at `speed`.
#[inline]
pub fn move_velocity(axis: Vec2, speed: f32) -> Vec2 {
    let s = speed.abs();
    (axis * s).clamp(Vec2::splat(-s), Vec2::splat(s))
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&ActorState, &mut LinearVelocity), With<Player>>,
) {
    let Ok((state, mut vel)) = q_player.single_mut() else {
        return;
    };
    vel.0 = if *state == ActorState::Alive {
        move_velocity(input.move_axis, tunables.player.stats.speed)
    } else {
        Vec2::ZERO
    };
}

fn fire(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(Entity, &ActorState, &Transform, &mut FireControl), With<Player>>,
    mut shots: MessageWriter<SpawnBulletRequest>,
) {
    let Ok((entity, state, tf, mut control)) = q_player.single_mut() else {
        return;
    };
    if *state != ActorState::Alive {
        return;
    }
    if control.tick(time.delta_secs(), input.fire) {
        let muzzle = tunables.player.half_size + tunables.bullet.radius;
        shots.write(SpawnBulletRequest {
            position: tf.translation.truncate() + Vec2::Y * muzzle,
            friendly: true,
            owner: Some(entity),
        });
    }
}

/// Position is pulled back to the boundary; velocity is left alone.
///
/// The avian `Position` is clamped as well, so the pose holds whichever side
/// of the transform writeback this runs on.
fn clamp_to_playfield(
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    mut q_player: Query<(&mut Transform, Option<&mut Position>), With<Player>>,
) {
    let half = tunables.player.half_size;
    for (mut tf, body_pos) in &mut q_player {
        let pos = tf.translation.truncate();
        let clamped = playfield.clamp_inside(pos, half);
        if clamped != pos {
            tf.translation = clamped.extend(tf.translation.z);
        }
        if let Some(mut body_pos) = body_pos {
            let clamped = playfield.clamp_inside(body_pos.0, half);
            if clamped != body_pos.0 {
                body_pos.0 = clamped;
            }
        }
    }
}

/// Runs once per life, on the tick the player is found `Dying`.
fn player_death(
    tunables: Res<Tunables>,
    mut dilation: ResMut<TimeDilation>,
    mut countdown: ResMut<GameOverCountdown>,
    mut died: MessageWriter<PlayerDied>,
    mut trauma: MessageWriter<TraumaAdded>,
    mut q_player: Query<
        (
            &EntityInfo,
            &Transform,
            &mut ActorState,
            &mut CollisionLayers,
            &mut LinearVelocity,
            Option<&mut Visibility>,
        ),
        With<Player>,
    >,
    mut q_enemies: Query<(&mut EntityInfo, &ActorState), (With<Enemy>, Without<Player>)>,
) {
    for (info, tf, mut state, mut layers, mut vel, vis) in &mut q_player {
        if *state != ActorState::Dying {
            continue;
        }
        let position = tf.translation.truncate();

        died.write(PlayerDied { position });
        trauma.write(TraumaAdded { amount: info.impact });

        detach(&mut layers);
        vel.0 = Vec2::ZERO;
        if let Some(mut vis) = vis {
            *vis = Visibility::Hidden;
        }
        *state = ActorState::Destroyed;

        // Everything on screen goes down with the player (and still scores).
        for (mut enemy, enemy_state) in &mut q_enemies {
            if *enemy_state == ActorState::Alive {
                enemy.hp = 0;
            }
        }

        dilation.set_game_speed(tunables.player.death_speed);
        countdown.0 = Some(tunables.player.game_over_delay.max(0.0));
        info!("player down at ({:.0}, {:.0})", position.x, position.y);
    }
}

/// Kills from the wipe would otherwise pull the speed back to the kill value.
fn hold_death_speed(
    tunables: Res<Tunables>,
    mut dilation: ResMut<TimeDilation>,
    q_player: Query<&ActorState, With<Player>>,
) {
    if q_player.iter().any(|state| *state == ActorState::Destroyed) {
        dilation.set_game_speed(tunables.player.death_speed);
    }
}

fn game_over_countdown(
    real: Res<Time<Real>>,
    tunables: Res<Tunables>,
    mut countdown: ResMut<GameOverCountdown>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(remaining) = countdown.0.as_mut() else {
        return;
    };
    *remaining -= tunables.clamp_delta(real.delta_secs());
    if *remaining <= 0.0 {
        countdown.0 = None;
        info!("session over");
        next.set(GameState::GameOver);
    }
}
