//! Graphics device abstraction
//!
//! This module defines the single trait a rendering backend must
//! implement to host the 2D batching core, plus the opaque handle and
//! vertex-layout types that cross the boundary.

use crate::core::config::ShaderConfig;
use crate::foundation::math::Mat4;
use crate::render::RenderResult;

/// Handle to a GPU-resident vertex or index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Handle to a vertex array (a vertex buffer + index buffer pairing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u64);

/// Handle to a texture resource stored in the backend
///
/// Handles are stable for the texture's lifetime and compare by
/// identity, which is what the batch slot table keys on. The handle
/// does not own the texture; lifetime belongs to whoever created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Handle to a compiled shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u64);

/// Pixel formats the core creates textures in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, four bytes per texel
    Rgba8,
}

impl TextureFormat {
    /// Bytes per texel for this format
    #[must_use]
    pub const fn bytes_per_texel(self) -> u32 {
        match self {
            Self::Rgba8 => 4,
        }
    }
}

/// Scalar type of one vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAttributeType {
    /// Single 32-bit float
    Float,
    /// Two 32-bit floats
    Float2,
    /// Three 32-bit floats
    Float3,
    /// Four 32-bit floats
    Float4,
}

impl VertexAttributeType {
    /// Number of float components in the attribute
    #[must_use]
    pub const fn component_count(self) -> u32 {
        match self {
            Self::Float => 1,
            Self::Float2 => 2,
            Self::Float3 => 3,
            Self::Float4 => 4,
        }
    }

    /// Size of the attribute in bytes
    #[must_use]
    pub const fn size_bytes(self) -> u32 {
        self.component_count() * 4
    }
}

/// One named attribute within a vertex record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute name as referenced by the shader program
    pub name: &'static str,
    /// Scalar type of the attribute
    pub ty: VertexAttributeType,
}

impl VertexAttribute {
    /// Create a named attribute
    #[must_use]
    pub const fn new(name: &'static str, ty: VertexAttributeType) -> Self {
        Self { name, ty }
    }
}

/// Describes the memory layout of one vertex record
///
/// Attributes are tightly packed in declaration order; the stride is
/// their summed size. Backends translate this into their own
/// input-assembly description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Build a layout from attributes in declaration order
    #[must_use]
    pub fn new(attributes: Vec<VertexAttribute>) -> Self {
        Self { attributes }
    }

    /// Attributes in declaration order
    #[must_use]
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Byte distance between consecutive vertex records
    #[must_use]
    pub fn stride(&self) -> u32 {
        self.attributes.iter().map(|a| a.ty.size_bytes()).sum()
    }
}

/// Abstract sink for finished buffers and draw-call requests
///
/// The batching core calls exactly these operations and nothing else;
/// one implementation is injected at renderer construction and never
/// swapped afterwards.
///
/// Creation operations can fail (driver, memory, shader compilation)
/// and return [`RenderResult`]. Upload, bind, and draw operations are
/// infallible by contract: the core pre-sizes every resource at
/// construction, so a well-behaved backend has nothing left to reject
/// on the per-frame path.
///
/// Uniform setters apply to the most recently bound shader program.
pub trait GraphicsDevice {
    /// Create a vertex buffer with fixed byte capacity and record layout
    fn create_vertex_buffer(
        &mut self,
        capacity_bytes: u64,
        layout: &VertexLayout,
    ) -> RenderResult<BufferHandle>;

    /// Upload vertex bytes into a buffer at the given byte offset
    fn upload_vertex_data(&mut self, buffer: BufferHandle, bytes: &[u8], offset: u64);

    /// Create an index buffer from its final contents (write-once)
    fn create_index_buffer(&mut self, indices: &[u32]) -> RenderResult<BufferHandle>;

    /// Pair a vertex buffer and index buffer into a drawable vertex array
    fn create_vertex_array(
        &mut self,
        vertex_buffer: BufferHandle,
        index_buffer: BufferHandle,
    ) -> RenderResult<VertexArrayHandle>;

    /// Create an empty texture of the given dimensions and format
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
    ) -> RenderResult<TextureHandle>;

    /// Upload full-texture pixel data
    fn upload_texture_data(&mut self, texture: TextureHandle, bytes: &[u8]);

    /// Bind a texture to a sampler slot for subsequent draws
    fn bind_texture(&mut self, texture: TextureHandle, slot: u32);

    /// Create a shader program from its configuration
    fn create_shader(&mut self, config: &ShaderConfig) -> RenderResult<ShaderHandle>;

    /// Bind a shader program for subsequent uniform updates and draws
    fn bind_shader(&mut self, shader: ShaderHandle);

    /// Set a 4x4 matrix uniform on the bound shader
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4);

    /// Set a scalar integer uniform on the bound shader
    fn set_uniform_int(&mut self, name: &str, value: i32);

    /// Set an integer array uniform on the bound shader
    fn set_uniform_int_array(&mut self, name: &str, values: &[i32]);

    /// Issue one indexed draw call over the first `index_count` indices
    fn draw_indexed(&mut self, vertex_array: VertexArrayHandle, index_count: u32);

    /// Downcast to the concrete device type
    ///
    /// Breaks the abstraction on purpose; used by tests and tooling
    /// that need to inspect a specific backend.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Downcast to the mutable concrete device type
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
