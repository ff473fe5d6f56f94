//! Headless recording device
//!
//! A [`GraphicsDevice`] that performs no GPU work and instead records
//! every operation it receives. Tests assert against the recording to
//! verify batching behavior (draw-call counts, upload sizes, slot
//! binds); demo binaries use it to run the full renderer without a
//! window or driver.

use std::collections::HashMap;

use crate::core::config::ShaderConfig;
use crate::foundation::math::Mat4;
use crate::render::api::{
    BufferHandle, GraphicsDevice, ShaderHandle, TextureFormat, TextureHandle, VertexArrayHandle,
    VertexLayout,
};
use crate::render::RenderResult;

/// One recorded indexed draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    /// Vertex array the draw was issued against
    pub vertex_array: VertexArrayHandle,
    /// Number of indices drawn
    pub index_count: u32,
}

/// One recorded vertex-data upload, payload included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexUpload {
    /// Destination buffer
    pub buffer: BufferHandle,
    /// Byte offset within the buffer
    pub offset: u64,
    /// Uploaded bytes, exactly as submitted
    pub data: Vec<u8>,
}

/// One recorded texture-to-slot bind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBind {
    /// Bound texture
    pub texture: TextureHandle,
    /// Sampler slot it was bound to
    pub slot: u32,
}

/// Recording no-op graphics device
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    next_handle: u64,

    buffer_capacities: HashMap<u64, u64>,
    texture_count: u32,
    shader_count: u32,

    draw_calls: Vec<DrawCall>,
    vertex_uploads: Vec<VertexUpload>,
    texture_binds: Vec<TextureBind>,
}

impl HeadlessDevice {
    /// Create a device with an empty recording
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Every indexed draw call issued, in submission order
    #[must_use]
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Every vertex upload received, payloads included
    #[must_use]
    pub fn vertex_uploads(&self) -> &[VertexUpload] {
        &self.vertex_uploads
    }

    /// Every texture bind received, in submission order
    #[must_use]
    pub fn texture_binds(&self) -> &[TextureBind] {
        &self.texture_binds
    }

    /// Number of textures created on this device
    #[must_use]
    pub const fn texture_count(&self) -> u32 {
        self.texture_count
    }

    /// Number of shader programs created on this device
    #[must_use]
    pub const fn shader_count(&self) -> u32 {
        self.shader_count
    }

    /// Drop the recorded draws, uploads, and binds
    ///
    /// Created resources and their handles survive; only the event
    /// history is cleared. Lets a test scope assertions to one scene.
    pub fn clear_recording(&mut self) {
        self.draw_calls.clear();
        self.vertex_uploads.clear();
        self.texture_binds.clear();
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_vertex_buffer(
        &mut self,
        capacity_bytes: u64,
        layout: &VertexLayout,
    ) -> RenderResult<BufferHandle> {
        let handle = BufferHandle(self.next_handle());
        self.buffer_capacities.insert(handle.0, capacity_bytes);
        log::trace!(
            "headless: vertex buffer {:?}, {} bytes, stride {}",
            handle,
            capacity_bytes,
            layout.stride()
        );
        Ok(handle)
    }

    fn upload_vertex_data(&mut self, buffer: BufferHandle, bytes: &[u8], offset: u64) {
        debug_assert!(
            self.buffer_capacities
                .get(&buffer.0)
                .is_some_and(|capacity| offset + bytes.len() as u64 <= *capacity),
            "upload of {} bytes at offset {offset} exceeds buffer capacity",
            bytes.len()
        );
        self.vertex_uploads.push(VertexUpload {
            buffer,
            offset,
            data: bytes.to_vec(),
        });
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> RenderResult<BufferHandle> {
        let handle = BufferHandle(self.next_handle());
        log::trace!("headless: index buffer {:?}, {} indices", handle, indices.len());
        Ok(handle)
    }

    fn create_vertex_array(
        &mut self,
        vertex_buffer: BufferHandle,
        index_buffer: BufferHandle,
    ) -> RenderResult<VertexArrayHandle> {
        let handle = VertexArrayHandle(self.next_handle());
        log::trace!(
            "headless: vertex array {:?} = {:?} + {:?}",
            handle,
            vertex_buffer,
            index_buffer
        );
        Ok(handle)
    }

    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> RenderResult<TextureHandle> {
        let handle = TextureHandle(self.next_handle());
        self.texture_count += 1;
        log::trace!("headless: texture {:?}, {}x{} {:?}", handle, width, height, format);
        Ok(handle)
    }

    fn upload_texture_data(&mut self, texture: TextureHandle, bytes: &[u8]) {
        log::trace!("headless: texture upload {:?}, {} bytes", texture, bytes.len());
    }

    fn bind_texture(&mut self, texture: TextureHandle, slot: u32) {
        self.texture_binds.push(TextureBind { texture, slot });
    }

    fn create_shader(&mut self, config: &ShaderConfig) -> RenderResult<ShaderHandle> {
        let handle = ShaderHandle(self.next_handle());
        self.shader_count += 1;
        log::trace!(
            "headless: shader {:?} from {} / {}",
            handle,
            config.vertex_shader_path,
            config.fragment_shader_path
        );
        Ok(handle)
    }

    fn bind_shader(&mut self, _shader: ShaderHandle) {}

    fn set_uniform_mat4(&mut self, _name: &str, _value: &Mat4) {}

    fn set_uniform_int(&mut self, _name: &str, _value: i32) {}

    fn set_uniform_int_array(&mut self, _name: &str, _values: &[i32]) {}

    fn draw_indexed(&mut self, vertex_array: VertexArrayHandle, index_count: u32) {
        self.draw_calls.push(DrawCall {
            vertex_array,
            index_count,
        });
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
