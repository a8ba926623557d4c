//! Ordering of the fixed-step simulation.
//!
//! ```text
//! FixedUpdate:     Input -> Spawn -> Behave -> Allocate -> Bounds
//! FixedPostUpdate: (avian step + CollisionStart) -> Contacts -> Terminal -> Deaths -> Commit -> Feel
//! ```
//!
//! Both chains only run while `GameState::InGame`.

use bevy::prelude::*;

/// Work done before the physics step.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Apply resolved player input (movement + fire requests).
    Input,
    /// Director timers and enemy pool allocation.
    Spawn,
    /// Per-actor AI, velocity floors, position clamps.
    Behave,
    /// Bullet requests from `Input` and `Behave` are served from the pool.
    Allocate,
    /// Leaving the field (no death effect).
    Bounds,
}

/// Work done after the physics step has emitted its contacts.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveSet {
    /// Contact messages -> symmetric damage.
    Contacts,
    /// `hp == 0` -> Dying.
    Terminal,
    /// Death effects, exactly once per life.
    Deaths,
    /// PendingReturn -> Pooled.
    Commit,
    /// Trauma intake, post-step player clamp, death speed hold.
    Feel,
}
