//! Spawn consumer: serve shot requests from the bullet pool.
//!
//! Exhaustion is a capacity decision, not a failure: the shot is skipped and
//! the producer's cadence is unaffected.

use bevy::prelude::*;

use super::messages::{ShotFired, SpawnBulletRequest};
use super::pool::{activate_bullet, construct_bullet, BulletPool};
use crate::common::tunables::Tunables;
use crate::plugins::trauma::TraumaAdded;

pub fn allocate_bullets_from_pool(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut pool: ResMut<BulletPool>,
    mut requests: MessageReader<SpawnBulletRequest>,
    mut fired: MessageWriter<ShotFired>,
    mut trauma: MessageWriter<TraumaAdded>,
) {
    let cfg = &tunables.bullet;

    for req in requests.read() {
        let issued = match pool.obtain(|| construct_bullet(&mut commands, cfg)) {
            Ok(issued) => issued,
            Err(err) => {
                debug!("shot skipped: {err}");
                continue;
            }
        };

        activate_bullet(&mut commands, issued.entity, req, cfg);
        fired.write(ShotFired { position: req.position, friendly: req.friendly });

        // Muzzle kick, player side only.
        if req.friendly {
            trauma.write(TraumaAdded { amount: cfg.impact });
        }
    }
}
