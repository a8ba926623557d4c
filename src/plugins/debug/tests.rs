use bevy::prelude::*;

use crate::common::test_utils::{run_system_once, world_with_tunables};
use crate::plugins::actors::EntityInfo;
use crate::plugins::core::Score;
use crate::plugins::player::Player;
use crate::plugins::time_dilation::TimeDilation;

fn pressed(key: KeyCode) -> ButtonInput<KeyCode> {
    let mut input = ButtonInput::<KeyCode>::default();
    input.press(key);
    input
}

fn debug_world(key: KeyCode) -> World {
    let mut world = world_with_tunables();
    world.insert_resource(pressed(key));
    world.init_resource::<TimeDilation>();
    world.init_resource::<Score>();
    world.insert_resource(Time::<Virtual>::default());
    world
}

#[test]
fn q_slows_and_w_speeds_up() {
    let mut world = debug_world(KeyCode::KeyQ);
    run_system_once(&mut world, super::time_keys);
    assert_eq!(world.resource::<TimeDilation>().multiplier(), 1.5);

    world.insert_resource(pressed(KeyCode::KeyW));
    run_system_once(&mut world, super::time_keys);
    run_system_once(&mut world, super::time_keys);
    assert_eq!(world.resource::<TimeDilation>().multiplier(), 0.5);
}

#[test]
fn o_awards_bonus_score() {
    let mut world = debug_world(KeyCode::KeyO);
    run_system_once(&mut world, super::score_key);
    assert_eq!(world.resource::<Score>().value(), super::SCORE_BONUS);
}

#[test]
fn k_zeroes_player_hp() {
    let mut world = debug_world(KeyCode::KeyK);
    let cfg = world.resource::<crate::common::tunables::Tunables>().player.clone();
    let player = world.spawn((Player, EntityInfo::player(&cfg))).id();

    run_system_once(&mut world, super::self_destruct_key);

    assert_eq!(world.get::<EntityInfo>(player).unwrap().hp, 0);
}

#[test]
fn resuming_from_pause_applies_resume_speed() {
    let mut world = debug_world(KeyCode::KeyP);
    run_system_once(&mut world, super::pause_key);
    assert!(world.resource::<Time<Virtual>>().is_paused());

    run_system_once(&mut world, super::pause_key);
    assert!(!world.resource::<Time<Virtual>>().is_paused());
    // 6.0 clamped to the 5.0 ceiling.
    assert_eq!(world.resource::<TimeDilation>().multiplier(), 5.0);
}
