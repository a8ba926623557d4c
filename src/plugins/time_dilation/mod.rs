//! Time dilation: one multiplier that stretches simulated time.
//!
//! `multiplier > 1` is slow motion, `< 1` fast motion. It reaches the
//! simulation through `Time<Virtual>`, whose relative speed is set to
//! `1 / multiplier`: the fixed clock, the physics step, spawn timers and fire
//! timers all advance by `dt / multiplier`. The drift back to 1.0 and
//! everything cosmetic run on real, unscaled seconds.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::{TimeConfig, Tunables};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct TimeDilation {
    multiplier: f32,
    min: f32,
    max: f32,
    normalize_rate: f32,
    snap_epsilon: f32,
}

impl TimeDilation {
    pub fn new(cfg: &TimeConfig) -> Self {
        let min = cfg.min_multiplier.max(f32::EPSILON);
        Self {
            multiplier: 1.0,
            min,
            max: cfg.max_multiplier.max(min),
            normalize_rate: cfg.normalize_rate.max(0.0),
            snap_epsilon: cfg.snap_epsilon.max(0.0),
        }
    }

    #[inline]
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Clamped to `[min, max]`. Non-finite targets are ignored.
    pub fn set_game_speed(&mut self, target: f32) {
        if target.is_finite() {
            self.multiplier = target.clamp(self.min, self.max);
        }
    }

    /// Relative change, used by the debug keys.
    pub fn step(&mut self, delta: f32) {
        self.set_game_speed(self.multiplier + delta);
    }

    /// Move toward 1.0 by `normalize_rate * dt`, then snap once close enough.
    ///
    /// The approach never crosses 1.0, so there is no overshoot to undo.
    pub fn normalize(&mut self, dt: f32) {
        let step = self.normalize_rate * dt.max(0.0);
        self.multiplier = if self.multiplier > 1.0 {
            (self.multiplier - step).max(1.0)
        } else {
            (self.multiplier + step).min(1.0)
        };
        if (self.multiplier - 1.0).abs() < self.snap_epsilon {
            self.multiplier = 1.0;
        }
    }

    /// Seconds of simulation for `dt` seconds of wall time.
    #[inline]
    pub fn scale(&self, dt: f32) -> f32 {
        dt / self.multiplier
    }

    #[inline]
    pub fn relative_speed(&self) -> f32 {
        1.0 / self.multiplier
    }

    pub fn reset(&mut self) {
        self.multiplier = 1.0;
    }
}

impl Default for TimeDilation {
    fn default() -> Self {
        Self::new(&TimeConfig::default())
    }
}

/// Run condition for real-time systems that belong to the simulation: a paused
/// `Time<Virtual>` freezes them along with the fixed clock.
pub fn simulation_running(time: Option<Res<Time<Virtual>>>) -> bool {
    time.is_none_or(|t| !t.is_paused())
}

pub fn plugin(app: &mut App) {
    let cfg = app.world().resource::<Tunables>().time.clone();
    app.insert_resource(TimeDilation::new(&cfg));

    app.add_systems(
        PreUpdate,
        (normalize_game_speed, apply_to_virtual_time)
            .chain()
            .run_if(in_state(GameState::InGame).and(simulation_running)),
    );
    app.add_systems(OnEnter(GameState::InGame), reset_game_speed);
}

pub(crate) fn normalize_game_speed(
    real: Res<Time<Real>>,
    tunables: Res<Tunables>,
    mut dilation: ResMut<TimeDilation>,
) {
    let dt = tunables.clamp_delta(real.delta_secs());
    dilation.normalize(dt);
}

/// Runs before the fixed loop, so a change made during a fixed step is seen
/// one frame later.
pub(crate) fn apply_to_virtual_time(dilation: Res<TimeDilation>, mut time: ResMut<Time<Virtual>>) {
    time.set_relative_speed(dilation.relative_speed());
}

fn reset_game_speed(mut dilation: ResMut<TimeDilation>, mut time: ResMut<Time<Virtual>>) {
    dilation.reset();
    time.set_relative_speed(1.0);
}
