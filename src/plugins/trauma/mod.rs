//! Trauma: a scalar in `[0, 1]` that drives camera shake.
//!
//! Producers never touch the resource; they write `TraumaAdded`, which is
//! absorbed at the end of each fixed step. Shake is re-rolled every rendered
//! frame from `trauma²` and then trauma decays, both on real time so slow-mo
//! does not stretch the shake.

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::schedule::ResolveSet;
use crate::common::state::GameState;
use crate::common::tunables::{TraumaConfig, Tunables};
use crate::plugins::time_dilation::simulation_running;

/// A value kept in `[0, 1]`; clamped on every write.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitF32(f32);

impl UnitF32 {
    #[inline]
    pub fn new_clamped(v: f32) -> Self {
        Self(if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn add_clamped(&mut self, dv: f32) {
        *self = Self::new_clamped(self.0 + dv);
    }

    #[inline]
    pub fn decay_to_zero(&mut self, rate_per_sec: f32, dt: f32) {
        self.0 = (self.0 - rate_per_sec * dt).max(0.0);
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct TraumaAdded {
    pub amount: f32,
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Trauma {
    value: UnitF32,
    /// Most recent value set by an addition (diagnostics).
    last: f32,
}

impl Trauma {
    /// Saturating: adding to a full meter leaves it full.
    pub fn add(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.value.add_clamped(amount);
        self.last = self.value.get();
    }

    pub fn decay(&mut self, rate_per_sec: f32, dt: f32) {
        self.value.decay_to_zero(rate_per_sec, dt.max(0.0));
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value.get()
    }

    #[inline]
    pub fn last(&self) -> f32 {
        self.last
    }

    /// Perceived shake, `trauma²`.
    #[inline]
    pub fn shake_amount(&self) -> f32 {
        let t = self.value.get();
        t * t
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// This frame's camera offset, relative to the neutral pose.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraShake {
    /// Radians about Z.
    pub angle: f32,
    pub offset: Vec2,
}

impl CameraShake {
    /// Fresh uniform samples in `[-1, 1]` scaled by `shake`; exactly neutral at zero.
    pub fn roll(&mut self, shake: f32, cfg: &TraumaConfig, rng: &mut SimRng) {
        if shake <= 0.0 {
            *self = Self::default();
            return;
        }
        self.angle = cfg.max_angle * shake * rng.unit_signed();
        self.offset = Vec2::new(
            cfg.max_offset * shake * rng.unit_signed(),
            cfg.max_offset * shake * rng.unit_signed(),
        );
    }

    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.angle == 0.0 && self.offset == Vec2::ZERO
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<TraumaAdded>()
        .init_resource::<Trauma>()
        .init_resource::<CameraShake>();

    app.add_systems(FixedPostUpdate, absorb_trauma.in_set(ResolveSet::Feel));
    app.add_systems(
        PostUpdate,
        roll_shake.run_if(in_state(GameState::InGame).and(simulation_running)),
    );
    app.add_systems(OnEnter(GameState::InGame), reset_trauma);
}

pub(crate) fn absorb_trauma(mut added: MessageReader<TraumaAdded>, mut trauma: ResMut<Trauma>) {
    for msg in added.read() {
        trauma.add(msg.amount);
    }
}

/// Shake from the current trauma, then decay it.
pub fn roll_shake(
    real: Res<Time<Real>>,
    tunables: Res<Tunables>,
    mut rng: ResMut<SimRng>,
    mut trauma: ResMut<Trauma>,
    mut shake: ResMut<CameraShake>,
) {
    let dt = tunables.clamp_delta(real.delta_secs());
    shake.roll(trauma.shake_amount(), &tunables.trauma, &mut rng);
    trauma.decay(tunables.trauma.decay_rate, dt);
}

fn reset_trauma(mut trauma: ResMut<Trauma>, mut shake: ResMut<CameraShake>) {
    trauma.reset();
    *shake = CameraShake::default();
}
