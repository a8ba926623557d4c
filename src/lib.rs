//! Arcade shooter simulation core on Bevy + avian2d.
//!
//! Integration tests in `tests/` are compiled as separate crates; this
//! library is the surface they import.

pub mod common;
pub mod game;
pub mod plugins;
