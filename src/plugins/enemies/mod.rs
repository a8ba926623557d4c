//! Enemies: per-tier bodies, init, and steering.
//!
//! Slots are owned by the director's pools. `construct_enemy` builds the
//! heavy parts once per slot; `init_enemy` rewrites only logical state and is
//! the single entry into `ActorState::Alive`.

pub mod behaviour;

use std::f32::consts::TAU;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::kinds::{ActorKind, EnemyTier};
use crate::common::layers::inert_layers;
use crate::common::schedule::SimSet;
use crate::common::state::GameState;
use crate::common::tunables::{Behaviour, TierConfig, Tunables};
use crate::plugins::actors::{ActorState, EntityInfo};
use crate::plugins::player::Player;
use crate::plugins::projectiles::SpawnBulletRequest;
use crate::plugins::world::Playfield;

pub use behaviour::{Brain, BurstFire};

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub tier: EnemyTier,
    pub half_size: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, steer_enemies.in_set(SimSet::Behave));
}

impl Brain {
    /// `phase` offsets the weave so a squad does not move in lockstep.
    pub fn for_tier(cfg: &TierConfig, phase: f32) -> Self {
        match cfg.behaviour {
            Behaviour::Snake { gain } => Self::Snake { gain },
            Behaviour::Dogfight(df) => Self::Dogfight { cfg: df, burst: BurstFire::from_config(&df) },
            Behaviour::Dive { weave_amplitude, weave_frequency } => Self::Dive {
                amplitude: weave_amplitude,
                angular_freq: weave_frequency * TAU,
                phase,
            },
        }
    }
}

#[inline]
fn tier_color(tier: EnemyTier) -> Color {
    match tier {
        EnemyTier::Grunt => Color::srgb(0.9, 0.25, 0.25),
        EnemyTier::Dogfighter => Color::srgb(0.95, 0.55, 0.15),
        EnemyTier::Swarmer => Color::srgb(0.7, 0.3, 0.9),
        EnemyTier::Gunship => Color::srgb(0.35, 0.65, 1.0),
    }
}

/// Body, collider and sprite for one enemy slot. Spawned inert and hidden.
pub fn construct_enemy(commands: &mut Commands, tier: EnemyTier, cfg: &TierConfig) -> Entity {
    let size = cfg.half_size * 2.0;
    commands
        .spawn((
            Name::new(format!("{tier:?}")),
            Enemy { tier, half_size: cfg.half_size },
            ActorKind::Enemy(tier),
            ActorState::Pooled,
            EntityInfo::enemy(cfg),
            Brain::for_tier(cfg, 0.0),
            Sprite {
                color: tier_color(tier),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0),
            Visibility::Hidden,
            (
                RigidBody::Dynamic,
                Collider::rectangle(size, size),
                LockedAxes::ROTATION_LOCKED,
                inert_layers(tier.membership()),
                LinearVelocity::ZERO,
                CollisionEventsEnabled,
            ),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Logical init for a fresh or recycled slot.
pub fn init_enemy(
    commands: &mut Commands,
    entity: Entity,
    tier: EnemyTier,
    cfg: &TierConfig,
    position: Vec2,
    phase: f32,
) {
    commands.entity(entity).insert((
        ActorState::Alive,
        EntityInfo::enemy(cfg),
        Brain::for_tier(cfg, phase),
        Transform::from_translation(position.extend(1.0)),
        LinearVelocity(Vec2::new(0.0, cfg.stats.speed)),
        tier.collision_layers(),
        Visibility::Visible,
    ));
}

pub fn steer_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    q_player: Query<(&Transform, &ActorState), (With<Player>, Without<Enemy>)>,
    mut q_enemies: Query<
        (Entity, &Enemy, &EntityInfo, &ActorState, &Transform, &mut LinearVelocity, &mut Brain),
        Without<Player>,
    >,
    mut shots: MessageWriter<SpawnBulletRequest>,
) {
    let dt = time.delta_secs();
    let target = q_player
        .single()
        .ok()
        .filter(|(_, state)| **state == ActorState::Alive)
        .map(|(tf, _)| tf.translation.truncate());

    for (entity, enemy, info, state, tf, mut vel, mut brain) in &mut q_enemies {
        if *state != ActorState::Alive {
            continue;
        }
        let pos = tf.translation.truncate();

        match &mut *brain {
            Brain::Snake { gain } => {
                vel.0 = behaviour::snake_step(vel.0, pos, target, info.speed, *gain, dt);
            }
            Brain::Dogfight { cfg, burst } => {
                let steer = behaviour::dogfight_step(vel.0, pos, target, info.speed, cfg, dt);
                let mut v = steer.velocity;
                // Retreat stops at the top edge.
                if v.y > 0.0 && pos.y >= playfield.top() - enemy.half_size {
                    v.y = 0.0;
                }
                vel.0 = v;

                if burst.tick(dt, steer.engaged) {
                    shots.write(SpawnBulletRequest {
                        position: pos - Vec2::Y * (enemy.half_size + tunables.bullet.radius),
                        friendly: false,
                        owner: Some(entity),
                    });
                }
            }
            Brain::Dive { amplitude, angular_freq, phase } => {
                vel.0 = behaviour::dive_step(info.speed, *amplitude, *angular_freq, phase, dt, vel.y);
            }
        }
    }
}

#[cfg(test)]
mod tests;
