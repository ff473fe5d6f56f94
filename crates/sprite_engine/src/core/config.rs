//! # Unified Configuration System
//!
//! Configuration structures for the 2D rendering core. All capacity
//! limits and shader locations are decided here, once, before the
//! renderer is constructed; nothing in this module is consulted on the
//! per-frame path.
//!
//! ## Design Goals
//!
//! - **Centralized**: capacity constants and shader paths in one place
//! - **Serializable**: TOML/RON round-tripping via the [`Config`] trait
//! - **Validated**: nonsense capacities are rejected before any GPU
//!   resource is sized from them

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

/// # Shader Configuration
///
/// Defines shader loading parameters and paths for the rendering system.
/// The paths are handed to the graphics device verbatim; how they are
/// compiled or resolved is a backend concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader file
    pub vertex_shader_path: String,
    /// Path to the fragment shader file
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }
}

/// # 2D Renderer Configuration
///
/// Capacity limits and shader programs for [`Renderer2D`].
///
/// The capacity fields size the staging buffers allocated at
/// construction; they are never consulted again. Defaults match the
/// common hardware baseline: 20k primitives per batch per kind and a
/// 32-entry sampler array.
///
/// [`Renderer2D`]: crate::render::Renderer2D
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renderer2DConfig {
    /// Maximum quads accumulated per batch before an implicit flush
    pub max_quads: u32,
    /// Maximum lines accumulated per batch before an implicit flush
    pub max_lines: u32,
    /// Size of the sampler-slot array, including the reserved white slot
    pub max_texture_slots: u32,
    /// Shader program used for the textured-quad batch
    pub quad_shader: ShaderConfig,
    /// Shader program used for the line batch
    pub line_shader: ShaderConfig,
}

impl Renderer2DConfig {
    /// Indices appended per quad or line (two triangles)
    pub const INDICES_PER_PRIMITIVE: u32 = 6;
    /// Vertices appended per quad or line
    pub const VERTICES_PER_PRIMITIVE: u32 = 4;

    /// Validate capacity values
    ///
    /// Rejects capacities the batching core cannot operate under: at
    /// least one primitive per kind, and at least two texture slots
    /// (the reserved white slot plus one assignable slot).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quads == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_quads",
                reason: "must allow at least one quad per batch".to_string(),
            });
        }
        if self.max_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_lines",
                reason: "must allow at least one line per batch".to_string(),
            });
        }
        if self.max_texture_slots < 2 {
            return Err(ConfigError::InvalidValue {
                field: "max_texture_slots",
                reason: format!(
                    "need the reserved white slot plus one assignable slot, got {}",
                    self.max_texture_slots
                ),
            });
        }
        Ok(())
    }

    /// Vertex capacity of the quad staging buffer
    #[must_use]
    pub const fn max_quad_vertices(&self) -> u32 {
        self.max_quads * Self::VERTICES_PER_PRIMITIVE
    }

    /// Index capacity of the quad batch
    #[must_use]
    pub const fn max_quad_indices(&self) -> u32 {
        self.max_quads * Self::INDICES_PER_PRIMITIVE
    }

    /// Vertex capacity of the line staging buffer
    #[must_use]
    pub const fn max_line_vertices(&self) -> u32 {
        self.max_lines * Self::VERTICES_PER_PRIMITIVE
    }

    /// Index capacity of the line batch
    #[must_use]
    pub const fn max_line_indices(&self) -> u32 {
        self.max_lines * Self::INDICES_PER_PRIMITIVE
    }
}

impl Default for Renderer2DConfig {
    fn default() -> Self {
        Self {
            max_quads: 20000,
            max_lines: 20000,
            max_texture_slots: 32,
            quad_shader: ShaderConfig::new(
                "shaders/texture.vert.spv",
                "shaders/texture.frag.spv",
            ),
            line_shader: ShaderConfig::new("shaders/line.vert.spv", "shaders/line.frag.spv"),
        }
    }
}

impl Config for Renderer2DConfig {}
