use bevy::prelude::*;

use crate::common::tunables::{BulletConfig, PlayerConfig, TierConfig};

/// Per-actor combat record.
///
/// Invariant: `0 <= hp <= max_hp`. `hp` only goes down, except on `restore`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EntityInfo {
    pub hp: u32,
    pub max_hp: u32,
    /// Damage dealt to an opposing-faction actor on contact.
    pub dmg: u32,
    /// Nominal velocity along Y; the sign is the travel direction.
    pub speed: f32,
    /// Trauma contribution (death for enemies and bullets, every hit for the player).
    pub impact: f32,
    pub friendly: bool,
    pub is_player: bool,
}

impl EntityInfo {
    pub fn player(cfg: &PlayerConfig) -> Self {
        Self {
            hp: cfg.stats.max_hp,
            max_hp: cfg.stats.max_hp,
            dmg: cfg.stats.dmg,
            speed: cfg.stats.speed,
            impact: cfg.impact,
            friendly: true,
            is_player: true,
        }
    }

    /// Friendly bullets head for the top edge, hostile ones for the bottom.
    pub fn bullet(cfg: &BulletConfig, friendly: bool) -> Self {
        let speed = cfg.stats.speed.abs();
        Self {
            hp: cfg.stats.max_hp,
            max_hp: cfg.stats.max_hp,
            dmg: cfg.stats.dmg,
            speed: if friendly { speed } else { -speed },
            impact: cfg.impact,
            friendly,
            is_player: false,
        }
    }

    pub fn enemy(cfg: &TierConfig) -> Self {
        Self {
            hp: cfg.stats.max_hp,
            max_hp: cfg.stats.max_hp,
            dmg: cfg.stats.dmg,
            speed: cfg.stats.speed,
            impact: cfg.death_impact(),
            friendly: false,
            is_player: false,
        }
    }

    #[inline]
    pub fn take_damage(&mut self, dmg: u32) {
        self.hp = self.hp.saturating_sub(dmg);
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp == 0
    }

    #[inline]
    pub fn restore(&mut self) {
        self.hp = self.max_hp;
    }

    #[inline]
    pub fn opposes(&self, other: &Self) -> bool {
        self.friendly != other.friendly
    }
}

/// Actor lifecycle.
///
/// ```text
/// Pooled -> Alive -> Dying -> PendingReturn -> Pooled     (pooled kinds)
///             |                    ^
///             +---- left field ----+                      (no death effect)
/// Alive -> Dying -> Destroyed                             (player)
/// ```
///
/// Leaving `Alive` is one-way; only a fresh init from the pool re-enters it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActorState {
    #[default]
    Pooled,
    Alive,
    /// `hp == 0` seen; death effects run exactly once from here.
    Dying,
    /// Detached from play, waiting for the commit system.
    PendingReturn,
    /// Terminal for actors that are never pooled.
    Destroyed,
}

impl ActorState {
    /// On the active roster (not pooled, not being returned).
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Alive | Self::Dying)
    }
}
