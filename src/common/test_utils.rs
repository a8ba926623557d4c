//! Test helpers.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()`
//! after running so queued commands are applied before assertions.

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use std::time::{Duration, Instant};

use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Make sure the backing storage for a message type exists.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Drain every pending message of one type (reads both buffers).
pub fn drain_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    ensure_messages::<M>(world);
    world.resource_mut::<Messages<M>>().drain().collect()
}

/// A world with the stock tunables inserted.
pub fn world_with_tunables() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world
}

/// A `Time<Fixed>` that has advanced by exactly `dt`.
pub fn fixed_time_with_delta(dt: f32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

/// A `Time<Real>` whose last frame took exactly `dt`.
pub fn real_time_with_delta(dt: f32) -> Time<Real> {
    let mut t = Time::<Real>::new(Instant::now());
    // The first update only records a timestamp.
    t.update_with_duration(Duration::ZERO);
    t.update_with_duration(Duration::from_secs_f32(dt));
    t
}

/// A plain `Time` (the generic clock systems read) that has advanced by `dt`.
pub fn time_with_delta(dt: f32) -> Time {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}
