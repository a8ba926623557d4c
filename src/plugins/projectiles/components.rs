use bevy::prelude::*;

/// Marker for pooled bullet entities.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Bullet;

#[inline]
pub fn bullet_color(friendly: bool) -> Color {
    if friendly {
        Color::srgb(1.0, 0.85, 0.3)
    } else {
        Color::srgb(1.0, 0.35, 0.55)
    }
}
