//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to build a game on top of the engine's frame loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once, before the loop enters its running phase. Create shaders,
    /// textures and game objects here; any error is treated as a fatal
    /// initialization failure and the loop is never entered.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Per-frame update with the clamped delta time in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Fixed-timestep update
    ///
    /// Called zero or more times per frame as the accumulator drains, always
    /// with the same fixed step.
    fn fixed_update(&mut self, _engine: &mut Engine, _fixed_delta: f32) -> Result<(), AppError> {
        Ok(())
    }

    /// Called once when the loop leaves its running phase
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(String),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
