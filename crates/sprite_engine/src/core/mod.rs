//! Core engine modules
//!
//! Holds the unified configuration types consumed at renderer
//! construction time.

pub mod config;
