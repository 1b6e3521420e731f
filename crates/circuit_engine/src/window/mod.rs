//! Window facade over the external windowing library
//!
//! The engine talks to the platform through the [`WindowBackend`] trait so
//! the frame loop can be driven headless in tests. [`GlfwWindow`] is the real
//! implementation; [`HeadlessWindow`] is a scripted stand-in. Platform events
//! are translated into the engine's own [`WindowEvent`] enum before the input
//! tracker sees them.

mod glfw_backend;
mod headless;

pub use glfw_backend::GlfwWindow;
pub use headless::HeadlessWindow;

use thiserror::Error;

use crate::config::WindowConfig;
use crate::input::{KeyCode, MouseButton};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing library failed to initialize
    #[error("window system initialization failed")]
    InitializationFailed,

    /// The window itself could not be created
    #[error("window creation failed")]
    CreationFailed,

    /// Any other error reported by the windowing library
    #[error("window system error: {0}")]
    Backend(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Vertical sync mode for buffer swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsyncMode {
    /// Swap immediately
    Off,
    /// Swap on the next vertical blank
    On,
}

/// Translated window events delivered to the frame loop once per iteration
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// The drawable area changed size
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },

    /// The user asked the window to close
    CloseRequested,

    /// Focus was gained (`true`) or lost (`false`)
    Focused(bool),

    /// The window was minimized (`true`) or restored (`false`)
    Iconified(bool),

    /// The platform needs an immediate repaint (e.g. during a resize drag)
    RedrawRequested,

    /// Key state change
    Key {
        /// The key
        key: KeyCode,
        /// Pressed (`true`) or released (`false`)
        pressed: bool,
    },

    /// Mouse button state change
    MouseButton {
        /// The button
        button: MouseButton,
        /// Pressed (`true`) or released (`false`)
        pressed: bool,
    },

    /// Cursor moved to a new position in window coordinates
    CursorMoved {
        /// Cursor x
        x: f64,
        /// Cursor y
        y: f64,
    },

    /// Scroll wheel movement
    Scroll {
        /// Horizontal scroll delta
        dx: f64,
        /// Vertical scroll delta
        dy: f64,
    },
}

/// Interface every window backend implements
///
/// Kept deliberately small: the frame loop needs lifecycle control, event
/// draining, idle detection for sleep throttling, and buffer swaps.
pub trait WindowBackend {
    /// True once window closure has been requested
    fn should_close(&self) -> bool;

    /// Request (or cancel) window closure
    fn set_should_close(&mut self, should_close: bool);

    /// Process pending platform events and return them translated
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Current client area size in pixels
    fn size(&self) -> (u32, u32);

    /// Constrain the window size between `min` and `max`
    fn set_size_limits(&mut self, min: (u32, u32), max: (u32, u32));

    /// Current window title
    fn title(&self) -> &str;

    /// Replace the window title
    fn set_title(&mut self, title: &str);

    /// Maximize the window
    fn maximize(&mut self);

    /// True when the window needs no immediate redraws (unfocused or
    /// minimized); the frame loop stretches its sleep interval while idle
    fn is_idle(&self) -> bool;

    /// Change the vertical sync mode
    fn set_vsync(&mut self, mode: VsyncMode);

    /// Present the frame
    fn swap_buffers(&mut self);
}

/// High-level window handle owned by the engine
pub struct WindowHandle {
    backend: Box<dyn WindowBackend>,
}

impl WindowHandle {
    /// Create a regular windowed-mode window from configuration
    pub fn windowed(config: &WindowConfig) -> WindowResult<Self> {
        Ok(Self {
            backend: Box::new(GlfwWindow::new(config)?),
        })
    }

    /// Wrap an existing backend (used for headless runs and tests)
    pub fn from_backend(backend: Box<dyn WindowBackend>) -> Self {
        Self { backend }
    }

    /// True once window closure has been requested
    pub fn should_close(&self) -> bool {
        self.backend.should_close()
    }

    /// Request (or cancel) window closure
    pub fn set_should_close(&mut self, should_close: bool) {
        self.backend.set_should_close(should_close);
    }

    /// Process pending platform events and return them translated
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.backend.poll_events()
    }

    /// Current client area size in pixels
    pub fn size(&self) -> (u32, u32) {
        self.backend.size()
    }

    /// Constrain the window size between `min` and `max`
    pub fn set_size_limits(&mut self, min: (u32, u32), max: (u32, u32)) {
        self.backend.set_size_limits(min, max);
    }

    /// Current window title
    pub fn title(&self) -> &str {
        self.backend.title()
    }

    /// Replace the window title
    pub fn set_title(&mut self, title: &str) {
        self.backend.set_title(title);
    }

    /// Maximize the window
    pub fn maximize(&mut self) {
        self.backend.maximize();
    }

    /// True when the window is unfocused or minimized
    pub fn is_idle(&self) -> bool {
        self.backend.is_idle()
    }

    /// Change the vertical sync mode
    pub fn set_vsync(&mut self, mode: VsyncMode) {
        self.backend.set_vsync(mode);
    }

    /// Present the frame
    pub fn swap_buffers(&mut self) {
        self.backend.swap_buffers();
    }
}
