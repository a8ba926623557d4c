//! Physics plugin: a top-down world with no gravity.
//!
//! Positions and velocities are in pixels; `pixels_per_meter` only tells avian
//! how big "one meter" is for its internal tolerances.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>();
    let ppm = tunables.pixels_per_meter;
    let substeps = tunables.substeps.max(1);

    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO))
        .insert_resource(SubstepCount(substeps));
}
