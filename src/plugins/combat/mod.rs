//! Combat resolver: every reported contact between two live actors of
//! opposing factions exchanges damage, symmetrically.
//!
//! Runs after avian has emitted `CollisionStart` for the step. Friendly fire is
//! already filtered out by collision layers; the faction check here is the
//! second line for anything that slips through (e.g. a layer set by hand).

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::schedule::ResolveSet;
use crate::plugins::actors::{ActorState, EntityInfo};
use crate::plugins::trauma::TraumaAdded;

pub fn plugin(app: &mut App) {
    app.add_systems(FixedPostUpdate, resolve_contacts.in_set(ResolveSet::Contacts));
}

#[derive(Clone, Copy, Debug)]
struct ContactSide {
    collider: Entity,
    body: Option<Entity>,
}

impl ContactSide {
    /// The entity that carries `EntityInfo`.
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn sides(ev: &CollisionStart) -> (ContactSide, ContactSide) {
    (
        ContactSide { collider: ev.collider1, body: ev.body1 },
        ContactSide { collider: ev.collider2, body: ev.body2 },
    )
}

/// Order-independent key for one pair.
#[inline]
fn pair_key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a < b { (a, b) } else { (b, a) }
}

/// One contact: each side takes the other's damage.
///
/// Both damages are read before either is applied, so a side that dies still
/// deals its full damage. Returns the player's impact when the player is in
/// the pair.
pub fn exchange_damage(a: &mut EntityInfo, b: &mut EntityInfo) -> Option<f32> {
    if !a.opposes(b) {
        return None;
    }

    let (dmg_a, dmg_b) = (a.dmg, b.dmg);
    a.take_damage(dmg_b);
    b.take_damage(dmg_a);

    if a.is_player {
        Some(a.impact)
    } else if b.is_player {
        Some(b.impact)
    } else {
        None
    }
}

pub fn resolve_contacts(
    mut started: MessageReader<CollisionStart>,
    mut q_actors: Query<(&mut EntityInfo, &ActorState)>,
    mut trauma: MessageWriter<TraumaAdded>,
    // One exchange per pair per step, however many collider pairs report it.
    mut seen: Local<HashSet<(Entity, Entity)>>,
) {
    seen.clear();

    for ev in started.read() {
        let (s1, s2) = sides(ev);
        let (a, b) = (s1.gameplay_owner(), s2.gameplay_owner());
        if a == b || !seen.insert(pair_key(a, b)) {
            continue;
        }

        let Ok([(mut info_a, state_a), (mut info_b, state_b)]) = q_actors.get_many_mut([a, b])
        else {
            continue;
        };

        // Only live actors interact. A side emptied earlier in this step is
        // still `Alive` until terminal detection, but it is spent.
        if *state_a != ActorState::Alive || *state_b != ActorState::Alive {
            continue;
        }
        if info_a.is_depleted() || info_b.is_depleted() {
            continue;
        }

        if let Some(impact) = exchange_damage(&mut info_a, &mut info_b) {
            trauma.write(TraumaAdded { amount: impact });
        }
    }
}
