//! Core engine implementation
//!
//! The engine owns one window, one camera, one scene and one render backend,
//! and drives them through a single-threaded frame loop. Every iteration runs
//! the same named steps in order: tick the clock, pump window events, apply
//! hotkey toggles, apply player input, drain fixed steps, update the
//! application, dispatch rendering, refresh the title overlay, reset input
//! edges, and finally sleep if throttling is enabled. Cancellation is checked
//! only at the top of an iteration.

use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::application::Application;
use crate::camera::Camera;
use crate::config::{ConfigError, EngineConfig};
use crate::foundation::math::Transform;
use crate::foundation::time::{throttle_duration, FrameClock, FrameStats};
use crate::input::{InputState, KeyCode};
use crate::player_input;
use crate::render::backend::{RenderBackend, ShaderHandle, TextureHandle};
use crate::render::Renderer;
use crate::scene::{GameObject, ObjectKey, ObjectKind, SceneRegistry};
use crate::window::{VsyncMode, WindowEvent, WindowHandle};

/// Frame loop phases
///
/// The loop is created `Uninitialized`, becomes `Running` exactly once after
/// successful initialization, and only ever moves forward to `ShuttingDown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Subsystems exist but the loop has not started
    Uninitialized,
    /// The loop is iterating
    Running,
    /// Shutdown was requested; the loop exits before the next iteration
    ShuttingDown,
}

/// How the engine went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// Regular teardown, all resources released
    Clean,
    /// Teardown after a reported error, resources still released
    Failure,
    /// Crash-path teardown; regular cleanup is skipped
    Critical,
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error (fatal; the loop is never entered)
    #[error("Engine initialization failed: {0}")]
    Init(String),

    /// Window system error
    #[error("Window error: {0}")]
    Window(#[from] crate::window::WindowError),

    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(#[from] crate::render::RenderError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    Application(String),
}

/// Main engine struct
///
/// The engine coordinates all subsystems and manages the main loop. It is the
/// context object passed through the whole call chain; nothing here is
/// process-global, so multiple engines can exist in one process (one per
/// thread of execution, the loop itself is strictly single-threaded).
pub struct Engine {
    window: WindowHandle,
    renderer: Renderer,
    input: InputState,
    camera: Camera,
    scene: SceneRegistry,
    clock: FrameClock,
    stats: FrameStats,
    config: EngineConfig,
    phase: LoopPhase,
    sleep_enabled: bool,
    show_title_stats: bool,
    base_title: String,
    redraw_requested: bool,
}

impl Engine {
    /// Create an engine with a real window
    pub fn new(config: EngineConfig, backend: Box<dyn RenderBackend>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        let window = WindowHandle::windowed(&config.window)
            .map_err(|e| EngineError::Init(format!("Failed to create main window: {e}")))?;

        Self::with_window(config, window, backend)
    }

    /// Create an engine around an existing window (dependency injection for
    /// headless runs and tests)
    pub fn with_window(
        config: EngineConfig,
        mut window: WindowHandle,
        backend: Box<dyn RenderBackend>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        window.set_size_limits(config.window.min_size, config.window.max_size);
        window.set_vsync(if config.window.vsync {
            VsyncMode::On
        } else {
            VsyncMode::Off
        });

        let (width, height) = window.size();
        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let camera = Camera::from_config(&config.camera, aspect);

        let base_title = config.window.title.clone();
        let sleep_enabled = config.timing.sleep_enabled;
        let clock = FrameClock::new(config.timing.fixed_delta, config.timing.max_catchup_steps);

        Ok(Self {
            window,
            renderer: Renderer::new(backend),
            input: InputState::new(),
            camera,
            scene: SceneRegistry::new(),
            clock,
            stats: FrameStats::default(),
            config,
            phase: LoopPhase::Uninitialized,
            sleep_enabled,
            show_title_stats: false,
            base_title,
            redraw_requested: false,
        })
    }

    /// Run the main loop with the given application
    ///
    /// Initializes the application, enters the running phase, and iterates
    /// until the window closes or shutdown is requested. Initialization
    /// failures are fatal and returned without entering the loop.
    pub fn run(&mut self, app: &mut dyn Application) -> Result<(), EngineError> {
        app.initialize(self).map_err(|e| {
            self.finish(ShutdownState::Failure);
            EngineError::Application(format!("App initialization: {e}"))
        })?;

        if self.config.window.maximized {
            self.window.maximize();
        }

        self.phase = LoopPhase::Running;
        log::info!("Starting main loop...");

        while self.phase == LoopPhase::Running && !self.window.should_close() {
            if let Err(e) = self.step(app) {
                log::error!("Main loop error: {e}");
                self.phase = LoopPhase::ShuttingDown;
                app.cleanup(self);
                self.finish(ShutdownState::Failure);
                return Err(e);
            }
        }

        self.phase = LoopPhase::ShuttingDown;
        app.cleanup(self);
        self.finish(ShutdownState::Clean);
        Ok(())
    }

    /// One loop iteration; each named step in its fixed order
    fn step(&mut self, app: &mut dyn Application) -> Result<(), EngineError> {
        self.clock.tick();
        self.pump_events();
        self.handle_toggles();

        player_input::update_camera(&self.input, &mut self.camera, self.clock.delta_time() as f32);

        let fixed_delta = self.clock.fixed_delta() as f32;
        for _ in 0..self.clock.drain_fixed_steps() {
            app.fixed_update(self, fixed_delta)
                .map_err(|e| EngineError::Application(e.to_string()))?;
        }

        let delta_time = self.clock.delta_time() as f32;
        app.update(self, delta_time)
            .map_err(|e| EngineError::Application(e.to_string()))?;

        self.dispatch_render();
        self.update_title_overlay();

        // must run exactly once per iteration, after every edge consumer
        self.input.end_frame();

        self.throttle();
        Ok(())
    }

    /// Translate window events into input and camera state
    fn pump_events(&mut self) {
        for event in self.window.poll_events() {
            match &event {
                WindowEvent::Resized { width, height } => {
                    if *width > 0 && *height > 0 {
                        self.camera
                            .set_aspect_ratio(*width as f32 / *height as f32);
                    }
                }
                WindowEvent::CloseRequested => self.window.set_should_close(true),
                WindowEvent::RedrawRequested => self.redraw_requested = true,
                _ => {}
            }
            self.input.handle_event(&event);
        }
    }

    /// Hardcoded number-key behavior toggles
    fn handle_toggles(&mut self) {
        if self.input.is_key_pressed(KeyCode::Num1) {
            self.window.set_vsync(VsyncMode::On);
            log::debug!("Set 'vsync state' to 'ON'");
        }
        if self.input.is_key_pressed(KeyCode::Num2) {
            self.window.set_vsync(VsyncMode::Off);
            log::debug!("Set 'vsync state' to 'OFF'");
        }
        if self.input.is_key_pressed(KeyCode::Num3) {
            log::error!(
                "Cannot set 'vsync state' to 'TRIPLE BUFFERING' because OpenGL does not have it!"
            );
        }
        if self.input.is_key_pressed(KeyCode::Num4) {
            self.sleep_enabled = !self.sleep_enabled;
            log::debug!(
                "{} frame loop sleep",
                if self.sleep_enabled {
                    "Enabled"
                } else {
                    "Disabled"
                }
            );
        }
        if self.input.is_key_pressed(KeyCode::Num5) {
            self.show_title_stats = !self.show_title_stats;
            if !self.show_title_stats && self.window.title() != self.base_title {
                let title = self.base_title.clone();
                self.window.set_title(&title);
            }
            log::debug!(
                "{} 'display title data'",
                if self.show_title_stats {
                    "Enabled"
                } else {
                    "Disabled"
                }
            );
        }
    }

    /// Render dispatch; idle windows are skipped unless a redraw was demanded
    fn dispatch_render(&mut self) {
        if self.window.is_idle() && !self.redraw_requested {
            return;
        }
        self.redraw_requested = false;

        match self.renderer.render_scene(&self.scene, &self.camera) {
            Ok(()) => self.window.swap_buffers(),
            // skip this frame's present; the loop keeps going
            Err(e) => log::error!("Frame render failed: {e}"),
        }
    }

    /// FPS / resolution overlay in the window title
    fn update_title_overlay(&mut self) {
        if !self.show_title_stats {
            return;
        }
        let Some(sample) = self.stats.record(self.clock.frame_time()) else {
            return;
        };

        let (width, height) = self.window.size();
        let title = format!(
            "{} [ {}x{} ] [ {:.2} FPS ({:.2}ms) ]",
            self.base_title, width, height, sample.fps, sample.delta_ms
        );
        self.window.set_title(&title);
    }

    /// Target sleep interval for the current idle state, if throttling applies
    fn sleep_target(&self) -> Option<Duration> {
        if !self.sleep_enabled {
            return None;
        }
        let target_ms = if self.window.is_idle() {
            self.config.timing.idle_sleep_ms
        } else {
            self.config.timing.active_sleep_ms
        };
        if target_ms == 0 {
            return None;
        }
        Some(Duration::from_millis(target_ms))
    }

    /// End-of-iteration sleep; the loop's only blocking point
    fn throttle(&self) {
        let Some(target) = self.sleep_target() else {
            return;
        };
        let sleep = throttle_duration(target, Duration::from_secs_f64(self.clock.frame_time()));
        if !sleep.is_zero() {
            thread::sleep(sleep);
        }
    }

    /// Request shutdown; honored at the top of the next iteration
    pub fn request_shutdown(&mut self) {
        log::info!("Engine shutdown requested");
        self.phase = LoopPhase::ShuttingDown;
    }

    /// Crash-path teardown: marks the loop as shutting down and skips the
    /// regular resource release. Intended for crash handlers only.
    pub fn abort(&mut self) {
        self.phase = LoopPhase::ShuttingDown;
        self.finish(ShutdownState::Critical);
    }

    fn finish(&mut self, state: ShutdownState) {
        match state {
            ShutdownState::Critical => {
                log::error!("Engine shutdown: critical (skipping cleanup)");
            }
            ShutdownState::Failure => {
                log::warn!("Engine shutdown: failure");
                self.scene.clear(self.renderer.backend_mut());
            }
            ShutdownState::Clean => {
                log::info!("Engine shutdown complete");
                self.scene.clear(self.renderer.backend_mut());
            }
        }
    }

    /// Compile a shader program through the render backend
    pub fn load_shader(
        &mut self,
        name: &str,
        vert_path: &str,
        frag_path: &str,
    ) -> Result<ShaderHandle, EngineError> {
        let handle = self.renderer.backend_mut().create_shader(
            name,
            std::path::Path::new(vert_path),
            std::path::Path::new(frag_path),
        )?;
        Ok(handle)
    }

    /// Load a texture through the render backend
    pub fn load_texture(&mut self, name: &str, path: &str) -> Result<TextureHandle, EngineError> {
        let handle = self
            .renderer
            .backend_mut()
            .create_texture(name, std::path::Path::new(path))?;
        Ok(handle)
    }

    /// Upload a cube mesh and register it as a game object
    pub fn spawn_cube(
        &mut self,
        name: &str,
        shader: ShaderHandle,
        texture: TextureHandle,
        transform: Transform,
    ) -> Result<ObjectKey, EngineError> {
        log::info!("Creating cube '{name}'.");

        let mesh = self
            .renderer
            .backend_mut()
            .create_mesh(&crate::render::CUBE_VERTICES)?;

        let object = GameObject::new(name, ObjectKind::Cube)
            .with_transform(transform)
            .with_shader(shader)
            .with_texture(texture)
            .with_mesh(mesh);

        Ok(self.scene.spawn(object))
    }

    /// Destroy a game object and release its owned GPU buffers
    pub fn despawn(&mut self, key: ObjectKey) -> bool {
        self.scene.despawn(key, self.renderer.backend_mut())
    }

    /// The current loop phase
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// The clamped per-frame delta time in seconds
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time() as f32
    }

    /// The unclamped frame time in seconds
    pub fn frame_time(&self) -> f64 {
        self.clock.frame_time()
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the camera
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The scene registry
    pub fn scene(&self) -> &SceneRegistry {
        &self.scene
    }

    /// Mutable access to the scene registry
    pub fn scene_mut(&mut self) -> &mut SceneRegistry {
        &mut self.scene
    }

    /// The input edge tracker
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The render dispatcher
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Mutable access to the render dispatcher
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// The window
    pub fn window(&self) -> &WindowHandle {
        &self.window
    }

    /// Mutable access to the window
    pub fn window_mut(&mut self) -> &mut WindowHandle {
        &mut self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::render::backend::RecordingBackend;
    use crate::window::HeadlessWindow;

    struct NoopApp;

    impl Application for NoopApp {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            Ok(())
        }

        fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn headless_engine(window: HeadlessWindow) -> Engine {
        let config = EngineConfig::default().with_maximized(false);
        Engine::with_window(
            config,
            WindowHandle::from_backend(Box::new(window)),
            Box::new(RecordingBackend::new()),
        )
        .unwrap()
    }

    #[test]
    fn phase_advances_forward_only() {
        let mut window = HeadlessWindow::new(800, 600);
        window.close_after_polls(1);

        let mut engine = headless_engine(window);
        assert_eq!(engine.phase(), LoopPhase::Uninitialized);

        engine.run(&mut NoopApp).unwrap();
        assert_eq!(engine.phase(), LoopPhase::ShuttingDown);
    }

    #[test]
    fn edge_reset_runs_last_in_the_iteration() {
        let mut window = HeadlessWindow::new(800, 600);
        window.queue_events(vec![WindowEvent::Key {
            key: KeyCode::Num4,
            pressed: true,
        }]);
        window.close_after_polls(1);

        let mut engine = headless_engine(window);
        engine.run(&mut NoopApp).unwrap();

        // the press edge was consumed inside the iteration and then cleared,
        // while the held state survives the reset
        assert!(!engine.input().is_key_pressed(KeyCode::Num4));
        assert!(engine.input().is_key_down(KeyCode::Num4));
        // and the Num4 toggle actually fired
        assert!(!engine.sleep_enabled);
    }

    #[test]
    fn resize_events_update_the_camera_aspect_ratio() {
        let mut window = HeadlessWindow::new(800, 600);
        window.queue_events(vec![WindowEvent::Resized {
            width: 1000,
            height: 500,
        }]);
        window.close_after_polls(1);

        let mut engine = headless_engine(window);
        engine.run(&mut NoopApp).unwrap();
        assert!((engine.camera().aspect_ratio() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn idle_windows_use_the_idle_sleep_interval() {
        let mut window = HeadlessWindow::new(800, 600);
        window.set_idle(true);

        let engine = headless_engine(window);
        // defaults: active 0 ms (no throttling), idle 50 ms
        assert_eq!(engine.sleep_target(), Some(Duration::from_millis(50)));
    }

    #[test]
    fn active_windows_with_zero_interval_do_not_sleep() {
        let window = HeadlessWindow::new(800, 600);
        let engine = headless_engine(window);
        assert_eq!(engine.sleep_target(), None);
    }

    #[test]
    fn disabling_sleep_overrides_the_idle_interval() {
        let mut window = HeadlessWindow::new(800, 600);
        window.set_idle(true);

        let mut engine = headless_engine(window);
        engine.sleep_enabled = false;
        assert_eq!(engine.sleep_target(), None);
    }

    #[test]
    fn idle_windows_skip_render_dispatch() {
        let mut window = HeadlessWindow::new(800, 600);
        window.set_idle(true);
        window.close_after_polls(2);

        let mut engine = headless_engine(window);
        engine.run(&mut NoopApp).unwrap();

        let backend = engine
            .renderer()
            .backend()
            .as_any()
            .downcast_ref::<RecordingBackend>()
            .unwrap();
        assert!(backend.frames().is_empty());
    }
}
