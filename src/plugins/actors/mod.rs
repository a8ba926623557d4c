//! Actor model: the combat record every participant carries, its lifecycle,
//! and the read-only snapshot consumed by rendering and tests.

pub mod components;
pub mod lifecycle;
pub mod messages;

use bevy::prelude::*;

use crate::common::kinds::ActorKind;
use crate::common::schedule::{ResolveSet, SimSet};

pub use components::{ActorState, EntityInfo};
pub use messages::{ActorDied, PlayerDied};

pub fn plugin(app: &mut App) {
    app.add_message::<ActorDied>().add_message::<PlayerDied>();

    app.add_systems(FixedUpdate, lifecycle::leave_field.in_set(SimSet::Bounds));
    app.add_systems(
        FixedPostUpdate,
        (
            lifecycle::detect_terminal.in_set(ResolveSet::Terminal),
            lifecycle::process_deaths.in_set(ResolveSet::Deaths),
            lifecycle::return_to_pool_commit.in_set(ResolveSet::Commit),
        ),
    );
}

/// One active actor as seen from outside the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub entity: Entity,
    pub kind: ActorKind,
    pub state: ActorState,
    pub position: Vec2,
    pub hp: u32,
    pub max_hp: u32,
}

/// Every actor on the active roster (Alive or Dying), in no particular order.
pub fn actor_snapshots(world: &mut World) -> Vec<ActorSnapshot> {
    let mut q = world.query::<(Entity, &ActorKind, &ActorState, &EntityInfo, &Transform)>();
    q.iter(world)
        .filter(|(_, _, state, _, _)| state.is_active())
        .map(|(entity, kind, state, info, tf)| ActorSnapshot {
            entity,
            kind: *kind,
            state: *state,
            position: tf.translation.truncate(),
            hp: info.hp,
            max_hp: info.max_hp,
        })
        .collect()
}
