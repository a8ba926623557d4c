//! World plugin: playfield bounds and the backdrop that shows them.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::{PlayfieldConfig, Tunables};

/// Axis-aligned field centred on the origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub half_extents: Vec2,
    pub exit_margin: f32,
}

impl Playfield {
    pub fn from_config(cfg: &PlayfieldConfig) -> Self {
        Self {
            half_extents: Vec2::new(cfg.width, cfg.height) * 0.5,
            exit_margin: cfg.exit_margin.max(0.0),
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.half_extents.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        -self.half_extents.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        -self.half_extents.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.half_extents.x
    }

    /// Keep a box of `half_size` fully inside the field.
    pub fn clamp_inside(&self, pos: Vec2, half_size: f32) -> Vec2 {
        let limit = (self.half_extents - Vec2::splat(half_size)).max(Vec2::ZERO);
        pos.clamp(-limit, limit)
    }

    /// Lateral range a box of `half_size` can spawn in.
    pub fn spawn_span(&self, half_size: f32) -> (f32, f32) {
        let x = (self.half_extents.x - half_size).max(0.0);
        (-x, x)
    }

    /// Just above the top edge.
    #[inline]
    pub fn spawn_y(&self, half_size: f32) -> f32 {
        self.top() + half_size
    }

    /// Past the edge the actor is heading for. Sign of `heading` picks the edge.
    pub fn has_left(&self, pos: Vec2, heading: f32) -> bool {
        if heading > 0.0 {
            pos.y > self.top() + self.exit_margin
        } else if heading < 0.0 {
            pos.y < self.bottom() - self.exit_margin
        } else {
            false
        }
    }
}

pub fn plugin(app: &mut App) {
    let cfg = app.world().resource::<Tunables>().playfield.clone();
    app.insert_resource(Playfield::from_config(&cfg));
    app.add_systems(OnEnter(GameState::InGame), spawn_backdrop);
}

/// Field plus a thin frame. Decoration only: nothing here has a collider.
fn spawn_backdrop(mut commands: Commands, playfield: Res<Playfield>) {
    let size = playfield.half_extents * 2.0;
    let frame = 4.0;
    let frame_color = Color::srgb(0.22, 0.24, 0.32);

    commands.spawn((
        Name::new("Backdrop"),
        Sprite::from_color(Color::srgb(0.04, 0.04, 0.08), size),
        Transform::from_xyz(0.0, 0.0, -10.0),
        DespawnOnExit(GameState::InGame),
    ));

    let edges = [
        ("EdgeTop", Vec2::new(0.0, playfield.top()), Vec2::new(size.x + frame, frame)),
        ("EdgeBottom", Vec2::new(0.0, playfield.bottom()), Vec2::new(size.x + frame, frame)),
        ("EdgeLeft", Vec2::new(playfield.left(), 0.0), Vec2::new(frame, size.y + frame)),
        ("EdgeRight", Vec2::new(playfield.right(), 0.0), Vec2::new(frame, size.y + frame)),
    ];
    for (name, pos, edge) in edges {
        commands.spawn((
            Name::new(name),
            Sprite::from_color(frame_color, edge),
            Transform::from_translation(pos.extend(-9.0)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}
