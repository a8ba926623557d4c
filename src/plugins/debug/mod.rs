//! Debug keys, enabled by `Tunables::debug_keys`.
//!
//! | key | effect |
//! |-----|--------|
//! | Q   | slower (multiplier + step) |
//! | W   | faster (multiplier - step) |
//! | O   | +10000 score |
//! | K   | player hp to zero |
//! | P   | pause / resume (resume applies `resume_speed`) |

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::actors::EntityInfo;
use crate::plugins::core::Score;
use crate::plugins::player::Player;
use crate::plugins::time_dilation::TimeDilation;

pub const SCORE_BONUS: u64 = 10_000;

pub fn plugin(app: &mut App) {
    if !app.world().resource::<Tunables>().debug_keys {
        return;
    }
    app.add_systems(
        Update,
        (time_keys, score_key, self_destruct_key, pause_key).run_if(in_state(GameState::InGame)),
    );
}

fn time_keys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    tunables: Res<Tunables>,
    mut dilation: ResMut<TimeDilation>,
) {
    let Some(keys) = keys else { return };
    let step = tunables.time.step;
    if keys.just_pressed(KeyCode::KeyQ) {
        dilation.step(step);
    }
    if keys.just_pressed(KeyCode::KeyW) {
        dilation.step(-step);
    }
}

fn score_key(keys: Option<Res<ButtonInput<KeyCode>>>, mut score: ResMut<Score>) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::KeyO)) {
        score.add(SCORE_BONUS);
    }
}

fn self_destruct_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q_player: Query<&mut EntityInfo, With<Player>>,
) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::KeyK)) {
        for mut info in &mut q_player {
            info.hp = 0;
        }
    }
}

fn pause_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    tunables: Res<Tunables>,
    mut time: ResMut<Time<Virtual>>,
    mut dilation: ResMut<TimeDilation>,
) {
    if !keys.is_some_and(|k| k.just_pressed(KeyCode::KeyP)) {
        return;
    }
    if time.is_paused() {
        time.unpause();
        dilation.set_game_speed(tunables.time.resume_speed);
    } else {
        time.pause();
    }
}

#[cfg(test)]
mod tests;
