//! # Sprite Engine
//!
//! A batched 2D rendering core with an abstract graphics-device backend.
//!
//! ## Features
//!
//! - **Batched Submission**: Quads and lines accumulate into pre-sized
//!   staging buffers and flush in bulk to minimize draw calls
//! - **Texture Slot Management**: Per-draw-call sampler-slot assignment
//!   under the hardware slot limit, with transparent overflow handling
//! - **Backend Agnostic**: The core talks to a single injected
//!   [`GraphicsDevice`](render::GraphicsDevice) and never touches a
//!   concrete graphics API
//! - **Zero Per-Frame Allocation**: All staging memory is allocated once
//!   at construction and reused for the renderer's lifetime
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let device = Box::new(HeadlessDevice::new());
//!     let mut renderer = Renderer2D::new(device, &Renderer2DConfig::default())?;
//!
//!     let camera = OrthographicCamera::new(-1.6, 1.6, -0.9, 0.9);
//!
//!     renderer.begin_scene(&camera);
//!     renderer.draw_quad(
//!         Vec3::new(0.0, 0.0, 0.0),
//!         Vec2::new(1.0, 1.0),
//!         Vec4::new(0.8, 0.2, 0.3, 1.0),
//!     );
//!     renderer.end_scene();
//!
//!     log::info!("{:?}", renderer.stats());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{Renderer2DConfig, ShaderConfig},
        foundation::math::{Mat4, Vec2, Vec3, Vec4},
        render::{
            BatchStats, GraphicsDevice, HeadlessDevice, OrthographicCamera, RenderError,
            RenderResult, Renderer2D, Texture2D,
        },
    };
}
