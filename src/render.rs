use glam::Mat4;
use std::collections::HashMap;

use crate::core::Viewport;
use crate::error::{StageError, StageResult};
use crate::scene::{Material, SceneObject, Shape};

/// Opaque mesh handle issued by a render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

/// Per-object transform and material state for one frame
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    /// RGB plus live opacity
    pub color: [f32; 4],
    pub mesh: u32,
    pub glow: f32,
    pub _pad: [f32; 2],
}

impl InstanceData {
    /// Pack an object's live state. Objects without a mesh are skipped.
    pub fn from_object(object: &SceneObject) -> Option<Self> {
        let mesh = object.mesh?;
        let [r, g, b] = object.material.color;
        Some(Self {
            model: object.live.transform.matrix().to_cols_array_2d(),
            color: [r, g, b, object.live.opacity],
            mesh: mesh.0,
            glow: object.live.intensity,
            _pad: [0.0; 2],
        })
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// Capability set consumed from the rendering collaborator
pub trait RenderBackend {
    /// Acquire rendering resources. Failure is fatal to the session.
    fn init(&mut self, viewport: Viewport) -> StageResult<()>;

    fn create_mesh(&mut self, shape: &Shape, material: &Material) -> StageResult<MeshHandle>;

    fn remove_mesh(&mut self, mesh: MeshHandle);

    fn resize(&mut self, _viewport: Viewport) {}

    /// Draw one frame. `instances` carries every live object's transform and material.
    fn render_frame(&mut self, camera: &CameraUniform, instances: &[InstanceData]) -> StageResult<()>;
}

/// In-memory backend: tracks live meshes and frame statistics without a GPU
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    viewport: Option<Viewport>,
    meshes: HashMap<MeshHandle, Shape>,
    next_handle: u32,
    frames: u64,
    last_instance_count: usize,
    last_upload_bytes: usize,
    last_camera: Option<CameraUniform>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn has_mesh(&self, mesh: MeshHandle) -> bool {
        self.meshes.contains_key(&mesh)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_instance_count(&self) -> usize {
        self.last_instance_count
    }

    /// Bytes a GPU backend would have uploaded for the last frame
    pub fn last_upload_bytes(&self) -> usize {
        self.last_upload_bytes
    }

    pub fn last_camera(&self) -> Option<&CameraUniform> {
        self.last_camera.as_ref()
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl RenderBackend for HeadlessBackend {
    fn init(&mut self, viewport: Viewport) -> StageResult<()> {
        self.viewport = Some(viewport);
        Ok(())
    }

    fn create_mesh(&mut self, shape: &Shape, _material: &Material) -> StageResult<MeshHandle> {
        if self.viewport.is_none() {
            return Err(StageError::BackendUnavailable("backend not initialised".into()));
        }
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.meshes.insert(handle, *shape);
        Ok(handle)
    }

    fn remove_mesh(&mut self, mesh: MeshHandle) {
        self.meshes.remove(&mesh);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn render_frame(&mut self, camera: &CameraUniform, instances: &[InstanceData]) -> StageResult<()> {
        if self.viewport.is_none() {
            return Err(StageError::BackendUnavailable("backend not initialised".into()));
        }
        self.last_upload_bytes = bytemuck::cast_slice::<InstanceData, u8>(instances).len()
            + bytemuck::bytes_of(camera).len();
        self.last_instance_count = instances.len();
        self.last_camera = Some(*camera);
        self.frames += 1;
        Ok(())
    }
}
