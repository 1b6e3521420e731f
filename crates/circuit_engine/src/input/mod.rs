//! Input management system
//!
//! `InputState` is the per-frame edge tracker: it distinguishes keys that are
//! currently held from keys that went down or up this frame, and accumulates
//! transient mouse deltas. The frame loop feeds it translated window events
//! and calls [`InputState::end_frame`] exactly once per iteration, after all
//! consumers observed the edges; otherwise presses are silently dropped or
//! double-counted.

use std::collections::HashSet;

use crate::window::WindowEvent;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum KeyCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Space, Enter, Escape,
    LeftShift, LeftControl,
    Up, Down, Left, Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Keyboard and mouse state with per-frame edge detection
#[derive(Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    cursor_position: (f64, f64),
    mouse_delta: (f64, f64),
    scroll_delta: (f64, f64),
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state from a translated window event
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Key { key, pressed } => {
                if *pressed {
                    if !self.keys_down.contains(key) {
                        self.keys_pressed.insert(*key);
                    }
                    self.keys_down.insert(*key);
                } else {
                    self.keys_down.remove(key);
                    self.keys_released.insert(*key);
                }
            }
            WindowEvent::MouseButton { button, pressed } => {
                if *pressed {
                    if !self.buttons_down.contains(button) {
                        self.buttons_pressed.insert(*button);
                    }
                    self.buttons_down.insert(*button);
                } else {
                    self.buttons_down.remove(button);
                    self.buttons_released.insert(*button);
                }
            }
            WindowEvent::CursorMoved { x, y } => {
                self.mouse_delta.0 += x - self.cursor_position.0;
                self.mouse_delta.1 += y - self.cursor_position.1;
                self.cursor_position = (*x, *y);
            }
            WindowEvent::Scroll { dx, dy } => {
                self.scroll_delta.0 += dx;
                self.scroll_delta.1 += dy;
            }
            _ => {}
        }
    }

    /// True while the key is held down
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// True only on the frame the key went down
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// True only on the frame the key went up
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// True while the mouse button is held down
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// True only on the frame the button went down
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// True only on the frame the button went up
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Cursor position in window coordinates
    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor_position
    }

    /// Raw mouse movement accumulated this frame
    pub fn mouse_delta(&self) -> (f64, f64) {
        self.mouse_delta
    }

    /// Scroll wheel movement accumulated this frame
    pub fn scroll_delta(&self) -> (f64, f64) {
        self.scroll_delta
    }

    /// End-of-frame reset: clears the pressed/released edge sets and the
    /// transient mouse deltas. Held state persists.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = (0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyCode) -> WindowEvent {
        WindowEvent::Key { key, pressed: true }
    }

    fn release(key: KeyCode) -> WindowEvent {
        WindowEvent::Key {
            key,
            pressed: false,
        }
    }

    #[test]
    fn pressed_edge_lasts_one_frame_held_state_persists() {
        let mut input = InputState::new();
        input.handle_event(&press(KeyCode::W));

        assert!(input.is_key_pressed(KeyCode::W));
        assert!(input.is_key_down(KeyCode::W));

        input.end_frame();

        assert!(!input.is_key_pressed(KeyCode::W));
        assert!(input.is_key_down(KeyCode::W));
    }

    #[test]
    fn repeated_press_events_do_not_retrigger_the_edge() {
        let mut input = InputState::new();
        input.handle_event(&press(KeyCode::Space));
        input.end_frame();

        // key repeat delivers another press while already held
        input.handle_event(&press(KeyCode::Space));
        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn release_edge_clears_held_state() {
        let mut input = InputState::new();
        input.handle_event(&press(KeyCode::Q));
        input.end_frame();
        input.handle_event(&release(KeyCode::Q));

        assert!(input.is_key_released(KeyCode::Q));
        assert!(!input.is_key_down(KeyCode::Q));

        input.end_frame();
        assert!(!input.is_key_released(KeyCode::Q));
    }

    #[test]
    fn mouse_delta_accumulates_and_resets() {
        let mut input = InputState::new();
        input.handle_event(&WindowEvent::CursorMoved { x: 10.0, y: 5.0 });
        input.handle_event(&WindowEvent::CursorMoved { x: 15.0, y: 0.0 });

        assert_eq!(input.mouse_delta(), (15.0, 0.0));
        assert_eq!(input.cursor_position(), (15.0, 0.0));

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        assert_eq!(input.cursor_position(), (15.0, 0.0));
    }
}
