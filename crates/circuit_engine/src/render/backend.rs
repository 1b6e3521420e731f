//! Backend abstraction for the rendering seam
//!
//! The external windowing/graphics library owns GPU pipeline construction,
//! shader compilation, swapchain management and texture decoding. Everything
//! the engine needs from it is expressed by [`RenderBackend`]; resources
//! cross the seam as opaque handles. [`RecordingBackend`] stands in for the
//! real backend in tests and headless runs by recording the submitted draw
//! commands instead of executing them.

use std::any::Any;
use std::collections::HashSet;
use std::path::Path;

use super::{RenderError, RenderResult};
use crate::foundation::math::Mat4;

/// Handle to a mesh resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Handle to a compiled shader program stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u64);

/// Handle to a texture stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Result type for backend operations
pub type BackendResult<T> = RenderResult<T>;

/// Main rendering backend trait
///
/// Implemented outside this crate by the real graphics backend; implemented
/// here only by [`RecordingBackend`].
pub trait RenderBackend {
    /// Upload vertex data and return an opaque mesh handle
    fn create_mesh(&mut self, vertices: &[super::Vertex]) -> BackendResult<MeshHandle>;

    /// Release a mesh's GPU buffers. Releasing an unknown or already
    /// released handle is a no-op.
    fn destroy_mesh(&mut self, mesh: MeshHandle);

    /// Compile and link a shader program from vertex/fragment source files
    fn create_shader(
        &mut self,
        name: &str,
        vert_path: &Path,
        frag_path: &Path,
    ) -> BackendResult<ShaderHandle>;

    /// Load a texture from an image file
    fn create_texture(&mut self, name: &str, path: &Path) -> BackendResult<TextureHandle>;

    /// Start recording a frame
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> BackendResult<()>;

    /// Submit one draw: bind the shader and texture, upload the matrices,
    /// draw the mesh's vertex buffer
    fn draw_mesh(
        &mut self,
        mesh: MeshHandle,
        shader: ShaderHandle,
        texture: TextureHandle,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
    ) -> BackendResult<()>;

    /// Finish the frame's command recording
    fn end_frame(&mut self) -> BackendResult<()>;

    /// Downcast support for test inspection
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support for test inspection
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// One recorded draw submission
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Mesh that was drawn
    pub mesh: MeshHandle,
    /// Shader it was drawn with
    pub shader: ShaderHandle,
    /// Texture that was bound
    pub texture: TextureHandle,
    /// Model matrix uploaded for the draw
    pub model: Mat4,
    /// View matrix uploaded for the draw
    pub view: Mat4,
    /// Projection matrix uploaded for the draw
    pub projection: Mat4,
}

/// Backend that records draw commands instead of submitting them to a GPU
#[derive(Default)]
pub struct RecordingBackend {
    next_handle: u64,
    live_meshes: HashSet<MeshHandle>,
    current_frame: Vec<DrawCommand>,
    frames: Vec<Vec<DrawCommand>>,
}

impl RecordingBackend {
    /// Create an empty recording backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed frames, each a list of recorded draws
    pub fn frames(&self) -> &[Vec<DrawCommand>] {
        &self.frames
    }

    /// Number of meshes currently alive in the backend
    pub fn live_mesh_count(&self) -> usize {
        self.live_meshes.len()
    }

    fn next(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl RenderBackend for RecordingBackend {
    fn create_mesh(&mut self, vertices: &[super::Vertex]) -> BackendResult<MeshHandle> {
        if vertices.is_empty() {
            return Err(RenderError::MeshCreation("empty vertex data".to_string()));
        }
        // exercised so the wire format stays POD
        let _bytes: &[u8] = bytemuck::cast_slice(vertices);

        let handle = MeshHandle(self.next());
        self.live_meshes.insert(handle);
        Ok(handle)
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) {
        self.live_meshes.remove(&mesh);
    }

    fn create_shader(
        &mut self,
        name: &str,
        _vert_path: &Path,
        _frag_path: &Path,
    ) -> BackendResult<ShaderHandle> {
        log::debug!("Recording backend: created shader '{}'", name);
        Ok(ShaderHandle(self.next()))
    }

    fn create_texture(&mut self, name: &str, _path: &Path) -> BackendResult<TextureHandle> {
        log::debug!("Recording backend: created texture '{}'", name);
        Ok(TextureHandle(self.next()))
    }

    fn begin_frame(&mut self, _clear_color: [f32; 4]) -> BackendResult<()> {
        self.current_frame.clear();
        Ok(())
    }

    fn draw_mesh(
        &mut self,
        mesh: MeshHandle,
        shader: ShaderHandle,
        texture: TextureHandle,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
    ) -> BackendResult<()> {
        if !self.live_meshes.contains(&mesh) {
            return Err(RenderError::UnknownMesh(mesh));
        }
        self.current_frame.push(DrawCommand {
            mesh,
            shader,
            texture,
            model: *model,
            view: *view,
            projection: *projection,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        self.frames.push(std::mem::take(&mut self.current_frame));
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CUBE_VERTICES;

    #[test]
    fn draws_against_destroyed_meshes_are_rejected() {
        let mut backend = RecordingBackend::new();
        let mesh = backend.create_mesh(&CUBE_VERTICES).unwrap();
        backend.destroy_mesh(mesh);

        let identity = Mat4::identity();
        let result = backend.draw_mesh(
            mesh,
            ShaderHandle(1),
            TextureHandle(2),
            &identity,
            &identity,
            &identity,
        );
        assert!(matches!(result, Err(RenderError::UnknownMesh(_))));
    }

    #[test]
    fn destroying_twice_is_a_noop() {
        let mut backend = RecordingBackend::new();
        let mesh = backend.create_mesh(&CUBE_VERTICES).unwrap();
        backend.destroy_mesh(mesh);
        backend.destroy_mesh(mesh);
        assert_eq!(backend.live_mesh_count(), 0);
    }

    #[test]
    fn frames_collect_their_draws() {
        let mut backend = RecordingBackend::new();
        let mesh = backend.create_mesh(&CUBE_VERTICES).unwrap();
        let identity = Mat4::identity();

        backend.begin_frame([0.0; 4]).unwrap();
        backend
            .draw_mesh(
                mesh,
                ShaderHandle(10),
                TextureHandle(11),
                &identity,
                &identity,
                &identity,
            )
            .unwrap();
        backend.end_frame().unwrap();

        assert_eq!(backend.frames().len(), 1);
        assert_eq!(backend.frames()[0].len(), 1);
    }
}
