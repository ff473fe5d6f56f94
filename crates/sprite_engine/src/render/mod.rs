//! # Rendering System
//!
//! The batched 2D rendering core and the abstractions it sits between.
//!
//! ## Architecture
//!
//! The module is layered so that nothing above the device boundary knows
//! which graphics API is in play:
//!
//! - **[`Renderer2D`]**: the public façade — scene lifecycle, primitive
//!   submission, and transparent flush/overflow handling
//! - **[`GraphicsDevice`]**: the abstract sink the core submits finished
//!   buffers and draw calls to; injected once at construction
//! - **Primitives**: cameras, textures, and the vertex record types the
//!   staging buffers are built from
//! - **Backends**: device implementations; this crate ships only the
//!   headless recording device used by tests and demos
//!
//! ## Design Goals
//!
//! - **Draw-Call Amortization**: submissions accumulate CPU-side and
//!   flush in bulk; state changes happen per batch, not per primitive
//! - **No Runtime Failure**: capacity overflow and sampler-slot
//!   exhaustion are normal, handled conditions, not errors
//! - **Submission Order Is Draw Order**: callers rely on this for
//!   alpha-blended overdraw

pub mod api;
pub mod backends;
pub mod primitives;
pub mod systems;

#[cfg(test)]
mod renderer2d_tests;

pub use api::{
    BufferHandle, GraphicsDevice, ShaderHandle, TextureFormat, TextureHandle, VertexArrayHandle,
    VertexAttribute, VertexAttributeType, VertexLayout,
};
pub use backends::HeadlessDevice;
pub use primitives::{LineVertex, OrthographicCamera, QuadVertex, Texture2D};
pub use systems::renderer2d::{BatchStats, Renderer2D};

use thiserror::Error;

/// Errors raised while building rendering resources
///
/// Nothing on the submission or flush path returns these; all runtime
/// failure modes there (capacity overflow, slot exhaustion, degenerate
/// geometry) are absorbed by the batching policy. These errors surface
/// only from construction-time resource creation.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Renderer initialization failed during setup
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// Resource creation or management failed
    ///
    /// Occurs when device resources (buffers, textures, shaders) cannot
    /// be created, typically due to memory constraints or invalid data.
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Backend-specific error occurred
    ///
    /// Wraps device-specific errors in a generic form for consistent
    /// handling across different graphics backends.
    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
