//! Core rendering primitives
//!
//! Cameras, textures, and the vertex record types the staging buffers
//! are built from.

pub mod camera;
pub mod texture;
pub mod vertex;

pub use camera::OrthographicCamera;
pub use texture::Texture2D;
pub use vertex::{LineVertex, QuadVertex};
