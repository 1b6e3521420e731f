//! # Circuit Engine
//!
//! The owned core of the CircuitGame demo: a fixed/variable timestep frame
//! loop with input edge detection and idle-throttled sleep, a camera with
//! clamped transform setters, and a generation-checked game-object registry
//! with a flat render dispatch list. Window/context creation, GPU pipelines,
//! shader compilation and texture decoding are delegated to the external
//! windowing/graphics collaborator behind the [`render::backend`] and
//! [`window`] seams.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use circuit_engine::prelude::*;
//! use circuit_engine::render::backend::RecordingBackend;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let shader = engine.load_shader(
//!             "cube",
//!             "files/shaders/cube.vert",
//!             "files/shaders/cube.frag",
//!         )?;
//!         let texture = engine.load_texture("cube", "files/textures/cube.png")?;
//!         engine.spawn_cube("cube0", shader, texture, Transform::identity())?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::new("My Game");
//!     let mut engine = Engine::new(config, Box::new(RecordingBackend::new()))?;
//!     engine.run(&mut MyGame)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod camera;
pub mod config;
pub mod foundation;
pub mod input;
pub mod player_input;
pub mod render;
pub mod scene;
pub mod window;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError, LoopPhase, ShutdownState};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::Camera,
        config::{CameraConfig, EngineConfig, TimingConfig, WindowConfig},
        foundation::{
            math::{Mat4, Transform, Vec3},
            time::{FrameClock, FrameStats},
        },
        input::{InputState, KeyCode, MouseButton},
        render::backend::{MeshHandle, RenderBackend, ShaderHandle, TextureHandle},
        scene::{GameObject, ObjectKey, ObjectKind, SceneRegistry},
        window::{VsyncMode, WindowEvent, WindowHandle},
        AppError, Application, Engine, EngineError, LoopPhase, ShutdownState,
    };
}
