//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    /// Player is gone; everything tagged `DespawnOnExit(InGame)` has been cleaned up.
    GameOver,
}
