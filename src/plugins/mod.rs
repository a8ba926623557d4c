//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod actors;
pub mod combat;
pub mod core;
pub mod debug;
pub mod director;
pub mod enemies;
pub mod physics;
pub mod player;
pub mod pool;
pub mod projectiles;
pub mod time_dilation;
pub mod trauma;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
///
/// `core` goes first: everything after it reads `Tunables` at build time.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    time_dilation::plugin(app);
    trauma::plugin(app);
    actors::plugin(app);
    combat::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    enemies::plugin(app);
    director::plugin(app);
    player::plugin(app);
    debug::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}
