//! Core plugin: shared resources, global settings and the system-set layout.

use std::time::Duration;

use avian2d::schedule::PhysicsSystems;
use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::schedule::{ResolveSet, SimSet};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

/// Points earned this session.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score(u64);

impl Score {
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn add(&mut self, points: u64) {
        self.0 = self.0.saturating_add(points);
    }

    #[inline]
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

pub fn plugin(app: &mut App) {
    // A caller may have inserted loaded tunables already.
    app.init_resource::<Tunables>();
    let seed = app.world().resource::<Tunables>().seed;

    app.insert_resource(SimRng::seeded(seed))
        .init_resource::<Score>()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)));

    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Input,
            SimSet::Spawn,
            SimSet::Behave,
            SimSet::Allocate,
            SimSet::Bounds,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
    app.configure_sets(
        FixedPostUpdate,
        (
            ResolveSet::Contacts,
            ResolveSet::Terminal,
            ResolveSet::Deaths,
            ResolveSet::Commit,
            ResolveSet::Feel,
        )
            .chain()
            // `CollisionStart` is written inside the physics schedule, so the
            // resolve chain orders itself after the whole step and its writeback.
            .after(PhysicsSystems::Last)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(Startup, clamp_frame_delta);
    app.add_systems(OnEnter(GameState::InGame), reset_score);
    app.add_systems(Update, restart_on_key.run_if(in_state(GameState::GameOver)));
}

/// A stalled frame advances virtual time by at most `max_frame_delta`.
fn clamp_frame_delta(tunables: Res<Tunables>, time: Option<ResMut<Time<Virtual>>>) {
    if let Some(mut time) = time {
        time.set_max_delta(Duration::from_secs_f32(tunables.max_frame_delta.max(f32::EPSILON)));
    }
}

fn reset_score(mut score: ResMut<Score>) {
    score.reset();
}

fn restart_on_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else { return };
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::KeyR]) {
        info!("restarting session");
        next.set(GameState::InGame);
    }
}
