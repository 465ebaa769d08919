use glam::Vec3;
use viewer_navigation::config::{Pose, WalkSettings};
use viewer_navigation::core::{InputEvent, InputSurface, SharedInputSurface};
use viewer_navigation::math::AABB;
use viewer_navigation::modes::walk::JUMP_SPEED;
use viewer_navigation::traits::Button;
use viewer_navigation::{FixedStepFrames, NavigationMode, StaticScene, WalkMode};

fn enabled_walk(scene: StaticScene, settings: WalkSettings) -> (WalkMode, SharedInputSurface) {
    let surface = InputSurface::shared();
    let mut walk = WalkMode::new(settings);
    assert!(walk.initialize(scene.into_shared(), surface.clone()));
    walk.enable();
    (walk, surface)
}

fn step(walk: &mut WalkMode, frames: &mut FixedStepFrames, count: usize) {
    for frame in frames.take(count) {
        walk.update(&frame);
    }
}

fn position(walk: &WalkMode) -> Vec3 {
    walk.camera().map(|c| c.position).unwrap_or(Vec3::NAN)
}

#[cfg(test)]
mod walk_mode_tests {
    use super::*;

    #[test]
    fn test_falls_to_eye_height() {
        let settings = WalkSettings {
            spawn: Some(Pose {
                position: Vec3::new(0.0, 5.0, 0.0),
                yaw: 0.0,
                pitch: 0.0,
            }),
            ..WalkSettings::default()
        };
        let (mut walk, _surface) = enabled_walk(StaticScene::new("floor"), settings);
        let mut frames = FixedStepFrames::new(60.0);
        step(&mut walk, &mut frames, 10);
        assert!(position(&walk).y < 5.0);
        step(&mut walk, &mut frames, 120);
        assert!((position(&walk).y - 1.7).abs() < 1e-5);
        assert!(walk.is_grounded());
    }

    #[test]
    fn test_spawn_below_ground_is_lifted() {
        let settings = WalkSettings {
            spawn: Some(Pose {
                position: Vec3::new(1.0, -3.0, 1.0),
                yaw: 0.0,
                pitch: 0.0,
            }),
            ..WalkSettings::default()
        };
        let (walk, _surface) = enabled_walk(StaticScene::new("floor").with_ground_level(0.5), settings);
        assert!((position(&walk).y - 2.2).abs() < 1e-6);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (mut walk, _surface) = enabled_walk(StaticScene::new("floor"), WalkSettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        step(&mut walk, &mut frames, 2);

        assert!(walk.jump());
        assert_eq!(walk.vertical_velocity(), JUMP_SPEED);
        assert!(!walk.jump());

        step(&mut walk, &mut frames, 10);
        assert!(position(&walk).y > 1.7);
        assert!(!walk.jump());

        step(&mut walk, &mut frames, 120);
        assert!((position(&walk).y - 1.7).abs() < 1e-5);
        assert!(walk.jump());
    }

    #[test]
    fn test_shift_runs_faster() {
        let (mut walk, surface) = enabled_walk(StaticScene::new("floor"), WalkSettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().extend([InputEvent::KeyDown(Button::KeyW), InputEvent::KeyDown(Button::Shift)]);
        step(&mut walk, &mut frames, 61);
        let p = position(&walk);
        // Default spawn faces -Z
        assert!((p.z + 2.5 * 2.3).abs() < 1e-3, "ended at {:?}", p);
        assert!((p.y - 1.7).abs() < 1e-5);
    }

    #[test]
    fn test_wall_blocks_movement() {
        let wall = AABB::new(Vec3::new(-5.0, 0.0, -2.2), Vec3::new(5.0, 3.0, -2.0));
        let (mut walk, surface) = enabled_walk(StaticScene::new("room").with_collider(wall), WalkSettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().push(InputEvent::KeyDown(Button::KeyW));
        step(&mut walk, &mut frames, 180);
        let z = position(&walk).z;
        assert!(z > -1.6 && z < -1.5, "stopped at z = {}", z);
    }

    #[test]
    fn test_low_box_is_stepped_onto() {
        let plinth = AABB::new(Vec3::new(-2.0, 0.0, -3.0), Vec3::new(2.0, 0.3, -1.0));
        let (mut walk, surface) = enabled_walk(StaticScene::new("room").with_collider(plinth), WalkSettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().push(InputEvent::KeyDown(Button::KeyW));
        step(&mut walk, &mut frames, 49);
        let p = position(&walk);
        assert!(p.z < -1.5 && p.z > -2.5);
        assert!((p.y - 2.0).abs() < 1e-4, "standing at {:?}", p);
    }

    #[test]
    fn test_eye_height_keeps_feet_on_ground() {
        let (mut walk, _surface) = enabled_walk(StaticScene::new("floor"), WalkSettings::default());
        walk.set_eye_height(1.2);
        assert!((position(&walk).y - 1.2).abs() < 1e-6);
        assert!((walk.collider_radii().y - 0.425).abs() < 1e-6);
        walk.set_eye_height(0.1);
        assert_eq!(walk.eye_height(), 1.2);
    }

    #[test]
    fn test_reset_returns_to_spawn() {
        let (mut walk, surface) = enabled_walk(StaticScene::new("floor"), WalkSettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().push(InputEvent::KeyDown(Button::KeyA));
        step(&mut walk, &mut frames, 30);
        walk.reset();
        assert_eq!(position(&walk), walk.spawn_pose().position);
        assert_eq!(walk.vertical_velocity(), 0.0);
    }
}
