//! Vertex record types for the 2D batching core
//!
//! Both records are `#[repr(C)]` and tightly packed (every field is an
//! `f32` or an `f32` array), so a staging slice can be uploaded with a
//! single byte cast. The attribute names in each layout are part of the
//! shader contract and must match the shader sources verbatim.

use bytemuck::{Pod, Zeroable};

use crate::render::api::{VertexAttribute, VertexAttributeType, VertexLayout};

/// One corner of a batched quad
///
/// Positions are world-space, already transformed at submission time;
/// the vertex shader applies only the scene's view-projection matrix.
/// `tex_index` selects an element of the bound sampler array and is
/// carried as a float for attribute-type uniformity.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    /// World-space position
    pub position: [f32; 3],
    /// RGBA color, linear, unmultiplied
    pub color: [f32; 4],
    /// Texture coordinate within the quad (0..1 each axis)
    pub tex_coord: [f32; 2],
    /// Sampler-array slot of this quad's texture
    pub tex_index: f32,
    /// Texture coordinate multiplier for tiled sampling
    pub tiling_factor: f32,
}

impl QuadVertex {
    /// Floats per record
    pub const FLOATS: usize = 11;
    /// Byte stride between consecutive records
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Buffer layout matching the textured-quad shader inputs
    #[must_use]
    pub fn layout() -> VertexLayout {
        VertexLayout::new(vec![
            VertexAttribute::new("a_Position", VertexAttributeType::Float3),
            VertexAttribute::new("a_Color", VertexAttributeType::Float4),
            VertexAttribute::new("a_TexCoord", VertexAttributeType::Float2),
            VertexAttribute::new("a_TexIndex", VertexAttributeType::Float),
            VertexAttribute::new("a_TilingFactor", VertexAttributeType::Float),
        ])
    }
}

/// One corner of a width-expanded line quad
///
/// Lines are expanded to quads in pixel space at submission time, so
/// the position is already in clip coordinates and bypasses the
/// view-projection transform. The local coordinate runs along the
/// segment (`-d .. length + d`) and across it (`±d`, where `d` is the
/// half-width); the fragment stage uses it together with `width` and
/// `length` for cap styling.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Clip-space position, already projected
    pub clip_coord: [f32; 4],
    /// RGBA color, linear, unmultiplied
    pub color: [f32; 4],
    /// Local coordinate within the expanded quad, in pixels
    pub local_coord: [f32; 2],
    /// Stroke width in pixels
    pub width: f32,
    /// Segment length in pixels
    pub length: f32,
}

impl LineVertex {
    /// Floats per record
    pub const FLOATS: usize = 12;
    /// Byte stride between consecutive records
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Buffer layout matching the line shader inputs
    #[must_use]
    pub fn layout() -> VertexLayout {
        VertexLayout::new(vec![
            VertexAttribute::new("a_ClipCrd", VertexAttributeType::Float4),
            VertexAttribute::new("a_Color", VertexAttributeType::Float4),
            VertexAttribute::new("a_TexCoord", VertexAttributeType::Float2),
            VertexAttribute::new("a_Width", VertexAttributeType::Float),
            VertexAttribute::new("a_Length", VertexAttributeType::Float),
        ])
    }
}
