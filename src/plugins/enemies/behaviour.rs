//! Per-tier steering. Pure functions; the systems in `mod.rs` feed them.

use bevy::prelude::*;

use crate::common::tunables::DogfightConfig;

/// Burst fire cadence: `burst_num` shots `fire_delay` apart, then a reload.
///
/// The timer keeps its remainder (`+=`), so cadence does not drift with the
/// step size. While disengaged it idles at "ready" instead of banking shots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstFire {
    burst_num: u32,
    shots_left: u32,
    fire_delay: f32,
    reload: f32,
    timer: f32,
}

impl BurstFire {
    pub fn new(burst_num: u32, fire_delay: f32, reload: f32) -> Self {
        let burst_num = burst_num.max(1);
        Self {
            burst_num,
            shots_left: burst_num,
            fire_delay: fire_delay.max(0.0),
            reload: reload.max(0.0),
            timer: 0.0,
        }
    }

    pub fn from_config(cfg: &DogfightConfig) -> Self {
        Self::new(cfg.burst_num, cfg.fire_delay, cfg.reload_duration)
    }

    /// Advance by `dt`; `true` when a shot leaves this tick.
    pub fn tick(&mut self, dt: f32, engaged: bool) -> bool {
        self.timer -= dt;
        if self.timer > 0.0 {
            return false;
        }
        if !engaged {
            self.timer = 0.0;
            return false;
        }

        self.shots_left -= 1;
        if self.shots_left == 0 {
            self.shots_left = self.burst_num;
            self.timer += self.reload;
        } else {
            self.timer += self.fire_delay;
        }
        true
    }

    #[inline]
    pub fn shots_left(&self) -> u32 {
        self.shots_left
    }
}

/// Behaviour state carried by each enemy; rewritten on every init.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Brain {
    Snake { gain: f32 },
    Dogfight { cfg: DogfightConfig, burst: BurstFire },
    Dive { amplitude: f32, angular_freq: f32, phase: f32 },
}

/// Outcome of one dogfight steering step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steer {
    pub velocity: Vec2,
    pub engaged: bool,
}

/// Re-assert nominal travel speed if physics has slowed the actor down.
/// Faster-than-nominal motion in the travel direction is left alone.
#[inline]
pub fn velocity_floor(vy: f32, speed: f32) -> f32 {
    if speed < 0.0 {
        vy.min(speed)
    } else if speed > 0.0 {
        vy.max(speed)
    } else {
        vy
    }
}

/// Drift toward the player's X by `gain / distance` per second; lateral speed
/// capped at the nominal speed.
pub fn snake_step(vel: Vec2, pos: Vec2, target: Option<Vec2>, speed: f32, gain: f32, dt: f32) -> Vec2 {
    let mut vx = vel.x;
    if let Some(target) = target {
        let dx = target.x - pos.x;
        let dist = pos.distance(target).max(1.0);
        if dx != 0.0 {
            vx += dx.signum() * gain / dist * dt;
        }
        vx = vx.clamp(-speed.abs(), speed.abs());
    }
    Vec2::new(vx, velocity_floor(vel.y, speed))
}

/// Home laterally while the player is below, keep range vertically.
///
/// Inside the epsilon band lateral motion stops outright, which is what keeps
/// the homing from oscillating across the player's X.
pub fn dogfight_step(vel: Vec2, pos: Vec2, target: Option<Vec2>, speed: f32, cfg: &DogfightConfig, dt: f32) -> Steer {
    let Some(target) = target else {
        return Steer { velocity: Vec2::new(0.0, speed), engaged: false };
    };

    let to_player = target - pos;
    let mut vx = vel.x;
    if to_player.y < 0.0 {
        if to_player.x.abs() <= cfg.epsilon {
            vx = 0.0;
        } else {
            vx += to_player.x.signum() * cfg.homing_accel * dt;
        }
        vx = vx.clamp(-cfg.max_lateral_speed, cfg.max_lateral_speed);
    }

    let dist = to_player.length();
    let (vy, engaged) = if dist > cfg.engage_range {
        (speed, false)
    } else if dist < cfg.retreat_range {
        (-speed, true)
    } else {
        (0.0, true)
    };

    Steer { velocity: Vec2::new(vx, vy), engaged }
}

/// Straight dive plus a sinusoidal weave: `x' = A·ω·cos(phase)`.
pub fn dive_step(speed: f32, amplitude: f32, angular_freq: f32, phase: &mut f32, dt: f32, vy: f32) -> Vec2 {
    *phase += angular_freq * dt;
    Vec2::new(amplitude * angular_freq * phase.cos(), velocity_floor(vy, speed))
}
