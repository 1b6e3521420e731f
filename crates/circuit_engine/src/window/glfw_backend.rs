//! GLFW window backend
//!
//! Wraps the external windowing library: window/context creation, event
//! polling, vsync and buffer swaps. Everything GPU-related lives behind the
//! render backend seam, not here.

use glfw::Context;

use super::{VsyncMode, WindowBackend, WindowError, WindowEvent, WindowResult};
use crate::config::WindowConfig;
use crate::input::{KeyCode, MouseButton};

/// GLFW-backed window with proper resource management
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
}

impl GlfwWindow {
    /// Create a windowed-mode window with an OpenGL context
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_size_polling(true);
        window.set_focus_polling(true);
        window.set_iconify_polling(true);
        window.set_close_polling(true);
        window.set_refresh_polling(true);

        Ok(Self {
            glfw,
            window,
            events,
            title: config.title.clone(),
        })
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(&event))
            .collect()
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn set_size_limits(&mut self, min: (u32, u32), max: (u32, u32)) {
        self.window
            .set_size_limits(Some(min.0), Some(min.1), Some(max.0), Some(max.1));
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
        self.title = title.to_string();
    }

    fn maximize(&mut self) {
        self.window.maximize();
    }

    fn is_idle(&self) -> bool {
        self.window.is_iconified() || !self.window.is_focused()
    }

    fn set_vsync(&mut self, mode: VsyncMode) {
        let interval = match mode {
            VsyncMode::Off => glfw::SwapInterval::None,
            VsyncMode::On => glfw::SwapInterval::Sync(1),
        };
        self.glfw.set_swap_interval(interval);
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

fn translate_event(event: &glfw::WindowEvent) -> Option<WindowEvent> {
    match event {
        glfw::WindowEvent::Key(key, _, action, _) => {
            let key = translate_key(*key)?;
            match action {
                glfw::Action::Press => Some(WindowEvent::Key { key, pressed: true }),
                glfw::Action::Release => Some(WindowEvent::Key {
                    key,
                    pressed: false,
                }),
                // repeats are not edges; held state already covers them
                glfw::Action::Repeat => None,
            }
        }
        glfw::WindowEvent::MouseButton(button, action, _) => {
            let button = translate_button(*button)?;
            match action {
                glfw::Action::Press => Some(WindowEvent::MouseButton {
                    button,
                    pressed: true,
                }),
                glfw::Action::Release => Some(WindowEvent::MouseButton {
                    button,
                    pressed: false,
                }),
                glfw::Action::Repeat => None,
            }
        }
        glfw::WindowEvent::CursorPos(x, y) => Some(WindowEvent::CursorMoved { x: *x, y: *y }),
        glfw::WindowEvent::Scroll(dx, dy) => Some(WindowEvent::Scroll { dx: *dx, dy: *dy }),
        glfw::WindowEvent::Size(width, height) => Some(WindowEvent::Resized {
            width: (*width).max(0) as u32,
            height: (*height).max(0) as u32,
        }),
        glfw::WindowEvent::Focus(focused) => Some(WindowEvent::Focused(*focused)),
        glfw::WindowEvent::Iconify(iconified) => Some(WindowEvent::Iconified(*iconified)),
        glfw::WindowEvent::Close => Some(WindowEvent::CloseRequested),
        glfw::WindowEvent::Refresh => Some(WindowEvent::RedrawRequested),
        _ => None,
    }
}

fn translate_key(key: glfw::Key) -> Option<KeyCode> {
    Some(match key {
        glfw::Key::A => KeyCode::A,
        glfw::Key::B => KeyCode::B,
        glfw::Key::C => KeyCode::C,
        glfw::Key::D => KeyCode::D,
        glfw::Key::E => KeyCode::E,
        glfw::Key::F => KeyCode::F,
        glfw::Key::G => KeyCode::G,
        glfw::Key::H => KeyCode::H,
        glfw::Key::I => KeyCode::I,
        glfw::Key::J => KeyCode::J,
        glfw::Key::K => KeyCode::K,
        glfw::Key::L => KeyCode::L,
        glfw::Key::M => KeyCode::M,
        glfw::Key::N => KeyCode::N,
        glfw::Key::O => KeyCode::O,
        glfw::Key::P => KeyCode::P,
        glfw::Key::Q => KeyCode::Q,
        glfw::Key::R => KeyCode::R,
        glfw::Key::S => KeyCode::S,
        glfw::Key::T => KeyCode::T,
        glfw::Key::U => KeyCode::U,
        glfw::Key::V => KeyCode::V,
        glfw::Key::W => KeyCode::W,
        glfw::Key::X => KeyCode::X,
        glfw::Key::Y => KeyCode::Y,
        glfw::Key::Z => KeyCode::Z,
        glfw::Key::Num0 => KeyCode::Num0,
        glfw::Key::Num1 => KeyCode::Num1,
        glfw::Key::Num2 => KeyCode::Num2,
        glfw::Key::Num3 => KeyCode::Num3,
        glfw::Key::Num4 => KeyCode::Num4,
        glfw::Key::Num5 => KeyCode::Num5,
        glfw::Key::Num6 => KeyCode::Num6,
        glfw::Key::Num7 => KeyCode::Num7,
        glfw::Key::Num8 => KeyCode::Num8,
        glfw::Key::Num9 => KeyCode::Num9,
        glfw::Key::Space => KeyCode::Space,
        glfw::Key::Enter => KeyCode::Enter,
        glfw::Key::Escape => KeyCode::Escape,
        glfw::Key::LeftShift => KeyCode::LeftShift,
        glfw::Key::LeftControl => KeyCode::LeftControl,
        glfw::Key::Up => KeyCode::Up,
        glfw::Key::Down => KeyCode::Down,
        glfw::Key::Left => KeyCode::Left,
        glfw::Key::Right => KeyCode::Right,
        _ => return None,
    })
}

fn translate_button(button: glfw::MouseButton) -> Option<MouseButton> {
    Some(match button {
        glfw::MouseButton::Button1 => MouseButton::Left,
        glfw::MouseButton::Button2 => MouseButton::Right,
        glfw::MouseButton::Button3 => MouseButton::Middle,
        _ => return None,
    })
}
