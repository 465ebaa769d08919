use glam::Vec3;
use viewer_navigation::config::{FlySettings, Pose};
use viewer_navigation::core::{InputEvent, InputSurface, SharedInputSurface};
use viewer_navigation::math::PITCH_LIMIT;
use viewer_navigation::modes::fly::FALLBACK_POSE;
use viewer_navigation::traits::Button;
use viewer_navigation::{FixedStepFrames, FlyMode, NavigationMode, StaticScene};

fn enabled_fly(settings: FlySettings) -> (FlyMode, SharedInputSurface) {
    let surface = InputSurface::shared();
    let mut fly = FlyMode::new(settings);
    assert!(fly.initialize(StaticScene::new("fly").into_shared(), surface.clone()));
    fly.enable();
    (fly, surface)
}

fn step(fly: &mut FlyMode, frames: &mut FixedStepFrames, count: usize) {
    for frame in frames.take(count) {
        fly.update(&frame);
    }
}

fn position(fly: &FlyMode) -> Vec3 {
    fly.camera().map(|c| c.position).unwrap_or(Vec3::NAN)
}

#[cfg(test)]
mod fly_mode_tests {
    use super::*;

    #[test]
    fn test_missing_pose_uses_fallback() {
        let (fly, _surface) = enabled_fly(FlySettings::default());
        assert_eq!(fly.start_pose(), FALLBACK_POSE);
        assert_eq!(position(&fly), Vec3::new(0.0, 3.0, 0.0));
        let dir = fly.camera().map(|c| c.look_direction()).unwrap_or(Vec3::NAN);
        assert!((dir - Vec3::NEG_Z).length() < 1e-5, "looking along {:?}", dir);
    }

    #[test]
    fn test_forward_for_one_second() {
        let (mut fly, surface) = enabled_fly(FlySettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().push(InputEvent::KeyDown(Button::KeyW));
        // First frame has no delta, the next 60 cover one second
        step(&mut fly, &mut frames, 61);
        let p = position(&fly);
        assert!((p - Vec3::new(0.0, 3.0, -5.0)).length() < 1e-3, "ended at {:?}", p);

        surface.borrow_mut().push(InputEvent::KeyUp(Button::KeyW));
        step(&mut fly, &mut frames, 10);
        assert!((position(&fly) - p).length() < 1e-6);
    }

    #[test]
    fn test_vertical_keys_ignore_pitch() {
        let (mut fly, surface) = enabled_fly(FlySettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().push(InputEvent::KeyDown(Button::Space));
        step(&mut fly, &mut frames, 31);
        let p = position(&fly);
        assert!((p.y - 5.5).abs() < 1e-3);
        assert!(p.x.abs() < 1e-6 && p.z.abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_exact_start() {
        let start = Pose {
            position: Vec3::new(2.0, 4.0, -1.0),
            yaw: 0.5,
            pitch: -0.2,
        };
        let (mut fly, surface) = enabled_fly(FlySettings {
            start: Some(start),
            ..FlySettings::default()
        });
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().extend([
            InputEvent::KeyDown(Button::KeyD),
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: 120.0, y: 40.0 },
        ]);
        step(&mut fly, &mut frames, 20);
        assert_ne!(position(&fly), start.position);

        fly.reset();
        assert_eq!(position(&fly), start.position);
        assert_eq!(fly.yaw(), 0.5);
        assert_eq!(fly.pitch(), -0.2);

        // Keys held before the reset are released
        step(&mut fly, &mut frames, 5);
        assert_eq!(position(&fly), start.position);
    }

    #[test]
    fn test_pointer_look_is_clamped() {
        let (mut fly, surface) = enabled_fly(FlySettings::default());
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().extend([
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerMove { x: 0.0, y: -100_000.0 },
        ]);
        step(&mut fly, &mut frames, 1);
        assert_eq!(fly.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn test_setters_reject_invalid_values() {
        let mut fly = FlyMode::new(FlySettings::default());
        fly.set_speed(12.0);
        fly.set_speed(0.0);
        fly.set_speed(f32::NAN);
        fly.set_sensitivity(-0.1);
        assert_eq!(fly.speed(), 12.0);
        assert_eq!(fly.sensitivity(), 0.003);
    }

    #[test]
    fn test_faster_speed_covers_more_ground() {
        let (mut fly, surface) = enabled_fly(FlySettings::default());
        fly.set_speed(10.0);
        let mut frames = FixedStepFrames::new(60.0);
        surface.borrow_mut().push(InputEvent::KeyDown(Button::KeyW));
        step(&mut fly, &mut frames, 31);
        assert!((position(&fly).z + 5.0).abs() < 1e-3);
    }
}
