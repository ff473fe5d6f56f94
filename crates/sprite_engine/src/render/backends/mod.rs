//! Graphics device implementations
//!
//! Concrete [`GraphicsDevice`](crate::render::GraphicsDevice) backends.
//! This crate ships only the headless recording device; real
//! API-specific backends live with the embedding application.

pub mod headless;

pub use headless::{DrawCall, HeadlessDevice, TextureBind, VertexUpload};
