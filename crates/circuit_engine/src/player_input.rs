//! Keyboard and mouse to camera glue
//!
//! Movement lives here, not in the camera: the camera exposes clamped setters
//! and basis vectors only. W/S and A/D translate along the world Z and X
//! axes, Q/E lower and raise along world up, all scaled by the camera speed
//! and the clamped frame delta. Mouse movement feeds the wrapped rotation
//! state through the camera sensitivity.

use crate::camera::Camera;
use crate::foundation::math::Vec3;
use crate::input::{InputState, KeyCode};

/// Apply one frame of held-key movement and mouse look to the camera
pub fn update_camera(input: &InputState, camera: &mut Camera, delta_time: f32) {
    if !camera.can_move() {
        return;
    }

    let step = camera.speed() * delta_time;
    let mut pos = camera.pos();

    if input.is_key_down(KeyCode::Q) {
        pos.y -= step;
    }
    if input.is_key_down(KeyCode::E) {
        pos.y += step;
    }
    if input.is_key_down(KeyCode::W) {
        pos.z -= step;
    }
    if input.is_key_down(KeyCode::S) {
        pos.z += step;
    }
    if input.is_key_down(KeyCode::A) {
        pos.x -= step;
    }
    if input.is_key_down(KeyCode::D) {
        pos.x += step;
    }
    camera.set_pos(pos);

    let (dx, dy) = input.mouse_delta();
    if dx != 0.0 || dy != 0.0 {
        let sensitivity = camera.sensitivity();
        camera.add_rot(Vec3::new(
            dy as f32 * sensitivity,
            dx as f32 * sensitivity,
            0.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowEvent;
    use approx::assert_relative_eq;

    fn held(input: &mut InputState, key: KeyCode) {
        input.handle_event(&WindowEvent::Key { key, pressed: true });
    }

    #[test]
    fn movement_requires_the_move_flag() {
        let mut input = InputState::new();
        held(&mut input, KeyCode::W);

        let mut camera = Camera::default();
        update_camera(&input, &mut camera, 0.1);
        assert_relative_eq!(camera.pos(), Vec3::zeros());
    }

    #[test]
    fn held_keys_translate_along_world_axes() {
        let mut input = InputState::new();
        held(&mut input, KeyCode::W);
        held(&mut input, KeyCode::D);
        held(&mut input, KeyCode::E);

        let mut camera = Camera::default();
        camera.set_move_state(true);
        camera.set_speed(2.0);

        update_camera(&input, &mut camera, 0.1);

        // speed * delta along +x (D), +y (E) and -z (W)
        assert_relative_eq!(camera.pos(), Vec3::new(0.2, 0.2, -0.2), epsilon = 1e-6);
    }

    #[test]
    fn movement_is_bounded_by_the_position_clamp() {
        let mut input = InputState::new();
        held(&mut input, KeyCode::E);

        let mut camera = Camera::default();
        camera.set_move_state(true);
        camera.set_pos(Vec3::new(0.0, 9_999.95, 0.0));
        camera.set_speed(10.0);

        update_camera(&input, &mut camera, 0.1);
        assert_relative_eq!(camera.pos().y, 10_000.0);
    }

    #[test]
    fn mouse_delta_feeds_wrapped_rotation() {
        let mut input = InputState::new();
        input.handle_event(&WindowEvent::CursorMoved { x: 100.0, y: 0.0 });

        let mut camera = Camera::default();
        camera.set_move_state(true);
        camera.set_sensitivity(0.1);

        update_camera(&input, &mut camera, 0.016);
        assert_relative_eq!(camera.rot().y, 10.0, epsilon = 1e-4);
    }
}
