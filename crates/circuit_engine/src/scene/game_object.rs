//! Renderable game objects

use crate::foundation::math::{Mat4, Transform};
use crate::render::backend::{MeshHandle, RenderBackend, ShaderHandle, TextureHandle};

/// The closed set of entity kinds the demo knows about
///
/// A tagged variant instead of a polymorphic base: the kinds are fixed and
/// small, and exhaustive matching keeps their handling statically checkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Textured cube
    Cube,
    /// Point light source
    PointLight,
    /// Directional light source
    DirLight,
}

/// A renderable entity
///
/// Owns its mesh buffers (released through the backend on despawn); shaders
/// and textures are shared resources referenced by handle, their lifetime is
/// managed by the backend's registries.
#[derive(Debug, Clone)]
pub struct GameObject {
    name: String,
    id: u32,
    kind: ObjectKind,
    transform: Transform,
    mesh: Option<MeshHandle>,
    shader: Option<ShaderHandle>,
    texture: Option<TextureHandle>,
    active: bool,
}

impl GameObject {
    /// Create an inactive object with no GPU resources attached
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            id: 0,
            kind,
            transform: Transform::identity(),
            mesh: None,
            shader: None,
            texture: None,
            active: true,
        }
    }

    /// Set the transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Reference a shader program
    pub fn with_shader(mut self, shader: ShaderHandle) -> Self {
        self.shader = Some(shader);
        self
    }

    /// Reference a texture
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Attach an owned mesh
    pub fn with_mesh(mut self, mesh: MeshHandle) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric id, unique within the owning registry
    pub fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Which kind of entity this is
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The entity's transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable access to the transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// The owned mesh handle, if uploaded
    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// The referenced shader, if assigned
    pub fn shader(&self) -> Option<ShaderHandle> {
        self.shader
    }

    /// The referenced texture, if assigned
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    /// Whether the render dispatcher should draw this object
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable per-frame updates and drawing
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Model matrix: translation * rotation * scale
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Release the owned mesh buffers through the backend.
    ///
    /// Safe to call more than once; the handle is taken on the first call, so
    /// double destruction is a no-op rather than a fault.
    pub fn release_gpu_resources(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(mesh) = self.mesh.take() {
            backend.destroy_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::backend::RecordingBackend;
    use crate::render::CUBE_VERTICES;
    use approx::assert_relative_eq;

    #[test]
    fn model_matrix_of_origin_cube_is_identity() {
        let object = GameObject::new("cube", ObjectKind::Cube);
        assert_relative_eq!(object.model_matrix(), Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn model_matrix_carries_translation() {
        let object = GameObject::new("cube", ObjectKind::Cube).with_transform(
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
        );
        let m = object.model_matrix();
        assert_relative_eq!(m[(1, 3)], 1.0);
    }

    #[test]
    fn releasing_resources_twice_is_a_noop() {
        let mut backend = RecordingBackend::new();
        let mesh = backend.create_mesh(&CUBE_VERTICES).unwrap();
        let mut object = GameObject::new("cube", ObjectKind::Cube).with_mesh(mesh);

        object.release_gpu_resources(&mut backend);
        assert_eq!(backend.live_mesh_count(), 0);
        assert!(object.mesh().is_none());

        // second release must not touch the backend again
        object.release_gpu_resources(&mut backend);
        assert_eq!(backend.live_mesh_count(), 0);
    }
}
