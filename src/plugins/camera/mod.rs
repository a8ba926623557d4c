//! Camera plugin: a fixed camera over the playfield, offset by `CameraShake`.
//!
//! The neutral pose is stored on the camera and the shake is written as
//! `neutral + offset` every frame, so nothing accumulates and zero trauma
//! lands exactly on the neutral pose.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::trauma::{roll_shake, CameraShake};

#[derive(Component, Debug, Clone, Copy)]
pub struct MainCamera {
    pub neutral: Vec3,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            apply_shake
                .after(roll_shake)
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    let neutral = Vec3::new(0.0, 0.0, 999.0);
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { neutral },
        FireflyConfig::default(),
        Transform::from_translation(neutral),
        DespawnOnExit(GameState::InGame),
    ));
}

fn apply_shake(shake: Res<CameraShake>, mut q_cam: Query<(&mut Transform, &MainCamera)>) {
    for (mut tf, cam) in &mut q_cam {
        tf.translation = cam.neutral + shake.offset.extend(0.0);
        tf.rotation = Quat::from_rotation_z(shake.angle);
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::{apply_shake, MainCamera};
    use crate::common::test_utils::run_system_once;
    use crate::plugins::trauma::CameraShake;

    #[test]
    fn shake_is_applied_relative_to_neutral_and_released_exactly() {
        let mut world = World::new();
        let neutral = Vec3::new(0.0, 0.0, 999.0);
        let cam = world.spawn((MainCamera { neutral }, Transform::from_translation(neutral))).id();

        world.insert_resource(CameraShake { angle: 0.01, offset: Vec2::new(3.0, -4.0) });
        run_system_once(&mut world, apply_shake);
        run_system_once(&mut world, apply_shake);
        assert_eq!(world.get::<Transform>(cam).unwrap().translation, Vec3::new(3.0, -4.0, 999.0));

        world.insert_resource(CameraShake::default());
        run_system_once(&mut world, apply_shake);
        let tf = world.get::<Transform>(cam).unwrap();
        assert_eq!(tf.translation, neutral);
        assert_eq!(tf.rotation, Quat::IDENTITY);
    }
}
