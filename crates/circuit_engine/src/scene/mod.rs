//! Scene management
//!
//! The scene is an identity-keyed store of renderable entities plus a flat
//! draw list the render dispatcher iterates each frame without re-walking the
//! store. Entities live in a generation-checked arena, so a stale key can
//! never dereference into a dead or recycled entry.

mod game_object;
mod registry;

pub use game_object::{GameObject, ObjectKind};
pub use registry::{ObjectKey, SceneRegistry};
