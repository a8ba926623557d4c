//! Common, shared types.

pub mod error;
pub mod kinds;
pub mod layers;
pub mod rng;
pub mod schedule;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
