//! Entity pool: reusable actor slots.
//!
//! The pool decides "fresh vs recycled", not the actor:
//! - a fresh slot runs the caller's `construct` once (body, collider, sprite);
//! - every issue, fresh or recycled, is followed by the caller's `init`,
//!   which only rewrites logical state.
//!
//! ```text
//! obtain(construct) ──► Issued { entity, fresh }     (hot path: Vec::pop)
//! release(entity)   ──► free list                    (only the commit system calls this)
//! ```
//!
//! Membership invariant: an entity is either checked out (on the active
//! roster) or on the free list, never both. Releasing twice is a caller
//! defect: it panics in debug builds and is refused in release builds.

use bevy::prelude::*;

use crate::common::error::PoolError;

/// Result of a successful `obtain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Issued {
    pub entity: Entity,
    /// `true` when `construct` ran for this issue.
    pub fresh: bool,
}

#[derive(Debug, Default, Clone)]
pub struct EntityPool {
    free: Vec<Entity>,
    checked_out: usize,
    capacity: Option<usize>,
    high_water: usize,
}

impl EntityPool {
    /// Grows on demand; `obtain` never fails.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Never constructs more than `capacity` slots in total.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn with_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(cap) => Self::bounded(cap),
            None => Self::unbounded(),
        }
    }

    /// Hand out a recycled slot, or construct one if the free list is empty.
    pub fn obtain(&mut self, construct: impl FnOnce() -> Entity) -> Result<Issued, PoolError> {
        if let Some(entity) = self.free.pop() {
            self.checked_out += 1;
            return Ok(Issued { entity, fresh: false });
        }

        if let Some(capacity) = self.capacity {
            if self.constructed() >= capacity {
                return Err(PoolError::Exhausted { capacity });
            }
        }

        let entity = construct();
        self.checked_out += 1;
        self.high_water = self.high_water.max(self.constructed());
        Ok(Issued { entity, fresh: true })
    }

    /// Return a checked-out slot to the free list.
    pub fn release(&mut self, entity: Entity) -> Result<(), PoolError> {
        let invalid = self.checked_out == 0 || self.free.contains(&entity);
        debug_assert!(!invalid, "entity {entity} released while not checked out");
        if invalid {
            return Err(PoolError::InvalidActorState(entity));
        }

        self.checked_out -= 1;
        self.free.push(entity);
        Ok(())
    }

    /// Put a freshly constructed, inert slot straight onto the free list (prewarm).
    pub fn stock(&mut self, entity: Entity) -> Result<(), PoolError> {
        if let Some(capacity) = self.capacity {
            if self.constructed() >= capacity {
                return Err(PoolError::Exhausted { capacity });
            }
        }
        self.free.push(entity);
        self.high_water = self.high_water.max(self.constructed());
        Ok(())
    }

    /// Forget every slot (their entities are being despawned).
    pub fn clear(&mut self) {
        self.free.clear();
        self.checked_out = 0;
        self.high_water = 0;
    }

    #[inline]
    pub fn constructed(&self) -> usize {
        self.free.len() + self.checked_out
    }

    #[inline]
    pub fn checked_out(&self) -> usize {
        self.checked_out
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[inline]
    pub fn is_free(&self, entity: Entity) -> bool {
        self.free.contains(&entity)
    }
}
