//! Rendering systems
//!
//! Higher-level machinery built on the device abstraction. The 2D
//! batching system is the only resident; it owns the whole
//! submission-to-flush pipeline.

pub mod renderer2d;
