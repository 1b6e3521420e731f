//! Render dispatch
//!
//! The engine does not talk to the GPU. [`backend::RenderBackend`] is the
//! seam to the external graphics library; this module owns the data that
//! crosses it (vertices, handles, matrices) and the per-frame dispatcher that
//! walks the scene draw list.

pub mod backend;

use thiserror::Error;

use crate::camera::Camera;
use crate::scene::{ObjectKind, SceneRegistry};
use backend::{MeshHandle, RenderBackend};

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Shader creation failed in the backend
    #[error("shader creation failed: {0}")]
    ShaderCreation(String),

    /// Texture creation failed in the backend
    #[error("texture creation failed: {0}")]
    TextureCreation(String),

    /// Mesh upload failed in the backend
    #[error("mesh upload failed: {0}")]
    MeshCreation(String),

    /// A draw referenced a mesh the backend no longer owns
    #[error("unknown mesh handle {0:?}")]
    UnknownMesh(MeshHandle),

    /// Any other backend failure
    #[error("render backend error: {0}")]
    Backend(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Interleaved vertex layout: position, normal, texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
}

const fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        uv,
    }
}

/// Unit cube as 36 unindexed vertices, one face per six entries
pub const CUBE_VERTICES: [Vertex; 36] = [
    // back face
    v([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    v([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
    v([0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    v([0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
    v([-0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
    v([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
    // front face
    v([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    v([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
    v([0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    v([0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
    v([-0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
    v([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
    // left face
    v([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    v([-0.5, 0.5, -0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    v([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    v([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    v([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    v([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    // right face
    v([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    v([0.5, 0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
    v([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    v([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
    v([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
    v([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
    // bottom face
    v([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    v([0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
    v([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    v([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
    v([-0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
    v([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
    // top face
    v([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
    v([0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
    v([0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    v([0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
    v([-0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
    v([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
];

/// Per-frame scene dispatcher
///
/// Iterates the registry draw list and submits one draw per live,
/// update-enabled object. An object missing its shader, texture or mesh is
/// reported and skipped for the current frame only; the loop never aborts
/// over a single entity.
pub struct Renderer {
    backend: Box<dyn RenderBackend>,
    clear_color: [f32; 4],
}

impl Renderer {
    /// Wrap a render backend
    pub fn new(backend: Box<dyn RenderBackend>) -> Self {
        Self {
            backend,
            // dark gray
            clear_color: [0.1, 0.1, 0.1, 1.0],
        }
    }

    /// Shared access to the backend
    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    /// Exclusive access to the backend, for resource creation and release
    pub fn backend_mut(&mut self) -> &mut dyn RenderBackend {
        self.backend.as_mut()
    }

    /// Draw every live object with the camera's current matrices
    pub fn render_scene(&mut self, scene: &SceneRegistry, camera: &Camera) -> RenderResult<()> {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();

        self.backend.begin_frame(self.clear_color)?;

        for object in scene.iter_draw_list() {
            if !object.is_active() {
                continue;
            }

            match object.kind() {
                ObjectKind::Cube => {}
                // light entities carry no mesh of their own; they reach the
                // backend as shader uniforms, not draw calls
                ObjectKind::PointLight | ObjectKind::DirLight => continue,
            }

            let Some(shader) = object.shader() else {
                log::error!(
                    "Cannot render game object '{}' because it has no shader assigned!",
                    object.name()
                );
                continue;
            };
            let Some(texture) = object.texture() else {
                log::error!(
                    "Cannot render game object '{}' because it has no texture assigned!",
                    object.name()
                );
                continue;
            };
            let Some(mesh) = object.mesh() else {
                log::error!(
                    "Cannot render game object '{}' because it has no mesh uploaded!",
                    object.name()
                );
                continue;
            };

            let model = object.model_matrix();
            if let Err(e) = self
                .backend
                .draw_mesh(mesh, shader, texture, &model, &view, &projection)
            {
                log::error!("Skipping draw for '{}': {}", object.name(), e);
            }
        }

        self.backend.end_frame()
    }
}
