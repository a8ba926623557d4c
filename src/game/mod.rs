//! Game composition root.
//!
//! - `run`: windowed app built by `configure_full` (DefaultPlugins, so logging,
//!   window, render) plus the game.
//! - `configure_headless`: gameplay only, for integration tests.
//!
//! Both keep a `Tunables` inserted beforehand and fall back to the stock values.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins;

#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Director and lifecycle chatter is `debug!`; keep it visible for this crate only.
pub const DEFAULT_LOG_FILTER: &str = "wgpu=error,naga=warn,juicy_shmup=debug";

/// What the binary hands over after parsing its arguments.
#[derive(Debug, Clone)]
pub struct Launch {
    pub tunables: Tunables,
    /// `RUST_LOG`-style directives.
    pub log_filter: String,
}

impl Default for Launch {
    fn default() -> Self {
        Self { tunables: Tunables::default(), log_filter: DEFAULT_LOG_FILTER.to_owned() }
    }
}

pub fn run(launch: Launch) {
    let mut app = App::new();
    app.insert_resource(launch.tunables);
    configure_full(&mut app, launch.log_filter);
    app.run();
}

/// Window sized to the playfield, logging through `LogPlugin`.
pub fn configure_full(app: &mut App, log_filter: String) {
    app.init_resource::<Tunables>();
    let field = app.world().resource::<Tunables>().playfield.clone();

    let default_plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Juicy Shmup".into(),
                resolution: WindowResolution::new(field.width as u32, field.height as u32),
                resizable: false,
                ..default()
            }),
            ..default()
        })
        .set(LogPlugin { level: Level::INFO, filter: log_filter, ..default() });

    // Vulkan is unreliable on some Windows drivers; force DX12 on the high-performance GPU.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Gameplay without window, renderer or lights.
pub fn configure_headless(app: &mut App) {
    app.init_resource::<Tunables>();
    configure_game(app);
}

fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
