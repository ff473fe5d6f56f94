//! Device abstraction for the rendering core
//!
//! Defines the operations the batching core consumes from a graphics
//! backend, expressed over opaque handles so the core never sees a
//! concrete API type.

mod graphics_device;

pub use graphics_device::{
    BufferHandle, GraphicsDevice, ShaderHandle, TextureFormat, TextureHandle, VertexArrayHandle,
    VertexAttribute, VertexAttributeType, VertexLayout,
};
