//! Batch accumulation state and statistics
//!
//! [`BatchState`] is the live state of one scene pass: a sub-batch per
//! primitive kind, the shared texture slot table, and the running
//! statistics. The overflow decision lives here; the façade asks
//! [`SubBatch::can_fit`] before writing anything, so no primitive is
//! ever split across batches.

use bytemuck::Pod;

use crate::core::config::Renderer2DConfig;
use crate::render::api::TextureHandle;
use crate::render::primitives::{LineVertex, QuadVertex};

use super::geometry::GeometryBuffer;
use super::texture_slots::TextureSlotTable;

/// Statistics for batch rendering performance monitoring
///
/// Profiling data only; nothing here feeds back into batching
/// decisions. Counters accumulate across scenes until
/// [`Renderer2D::reset_stats`](super::Renderer2D::reset_stats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Indexed draw calls issued, one per non-empty kind per flush
    pub draw_calls: u32,
    /// Quads submitted
    pub quad_count: u32,
    /// Lines submitted (degenerate, dropped lines excluded)
    pub line_count: u32,
}

impl BatchStats {
    /// Vertices written for quads
    #[must_use]
    pub const fn total_quad_vertex_count(&self) -> u32 {
        self.quad_count * Renderer2DConfig::VERTICES_PER_PRIMITIVE
    }

    /// Indices consumed by quads
    #[must_use]
    pub const fn total_quad_index_count(&self) -> u32 {
        self.quad_count * Renderer2DConfig::INDICES_PER_PRIMITIVE
    }
}

/// Accumulation state for one primitive kind
#[derive(Debug)]
pub(crate) struct SubBatch<V> {
    geometry: GeometryBuffer<V>,
    index_count: u32,
    max_indices: u32,
}

impl<V: Pod> SubBatch<V> {
    fn new(max_primitives: u32) -> Self {
        let vertex_capacity = max_primitives * Renderer2DConfig::VERTICES_PER_PRIMITIVE;
        Self {
            geometry: GeometryBuffer::with_capacity(vertex_capacity as usize),
            index_count: 0,
            max_indices: max_primitives * Renderer2DConfig::INDICES_PER_PRIMITIVE,
        }
    }

    /// Whether `index_delta` more indices fit in the current batch
    pub(crate) fn can_fit(&self, index_delta: u32) -> bool {
        self.index_count + index_delta <= self.max_indices
    }

    /// Append one primitive: four vertices, six indices, atomically
    pub(crate) fn push_primitive(&mut self, vertices: [V; 4]) {
        debug_assert!(self.can_fit(Renderer2DConfig::INDICES_PER_PRIMITIVE));
        for vertex in vertices {
            self.geometry.write(vertex);
        }
        self.index_count += Renderer2DConfig::INDICES_PER_PRIMITIVE;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index_count == 0
    }

    pub(crate) fn index_count(&self) -> u32 {
        self.index_count
    }

    pub(crate) fn reset(&mut self) {
        self.geometry.reset();
        self.index_count = 0;
    }

    /// Staged bytes for upload
    pub(crate) fn bytes(&self) -> &[u8] {
        self.geometry.bytes()
    }

    /// Exact upload size in bytes
    pub(crate) fn bytes_written(&self) -> usize {
        self.geometry.bytes_written()
    }
}

/// Live accumulation state for one scene pass
///
/// Created once at renderer construction with capacity-sized buffers;
/// reset (never reallocated) at scene begin and after every
/// flush-and-reset.
#[derive(Debug)]
pub(crate) struct BatchState {
    pub(crate) quads: SubBatch<QuadVertex>,
    pub(crate) lines: SubBatch<LineVertex>,
    pub(crate) texture_slots: TextureSlotTable,
    pub(crate) stats: BatchStats,
}

impl BatchState {
    pub(crate) fn new(config: &Renderer2DConfig, white_texture: TextureHandle) -> Self {
        Self {
            quads: SubBatch::new(config.max_quads),
            lines: SubBatch::new(config.max_lines),
            texture_slots: TextureSlotTable::new(white_texture, config.max_texture_slots as usize),
            stats: BatchStats::default(),
        }
    }

    /// Reset cursors, index counts, and slot assignments
    ///
    /// Statistics survive; they reset only through the explicit stats
    /// API, independent of scene lifecycle.
    pub(crate) fn reset(&mut self) {
        self.quads.reset();
        self.lines.reset();
        self.texture_slots.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> [QuadVertex; 4] {
        [QuadVertex::default(); 4]
    }

    #[test]
    fn can_fit_is_exact_at_the_boundary() {
        let mut batch = SubBatch::<QuadVertex>::new(2);
        batch.push_primitive(quad_vertices());
        assert!(batch.can_fit(6));

        batch.push_primitive(quad_vertices());
        assert!(!batch.can_fit(6));
        assert!(batch.can_fit(0));
    }

    #[test]
    fn push_primitive_accounts_vertices_and_indices() {
        let mut batch = SubBatch::<QuadVertex>::new(4);
        batch.push_primitive(quad_vertices());

        assert_eq!(batch.index_count(), 6);
        assert_eq!(
            batch.bytes_written(),
            4 * std::mem::size_of::<QuadVertex>()
        );
    }

    #[test]
    fn reset_clears_accumulation_but_not_stats() {
        let config = Renderer2DConfig {
            max_quads: 4,
            max_lines: 4,
            ..Renderer2DConfig::default()
        };
        let mut state = BatchState::new(&config, TextureHandle(1));

        state.quads.push_primitive(quad_vertices());
        state.texture_slots.acquire(TextureHandle(2));
        state.stats.quad_count = 1;
        state.reset();

        assert!(state.quads.is_empty());
        assert_eq!(state.texture_slots.slot_count(), 1);
        assert_eq!(state.stats.quad_count, 1);
    }

    #[test]
    fn stats_derive_vertex_and_index_totals() {
        let stats = BatchStats {
            draw_calls: 2,
            quad_count: 100,
            line_count: 0,
        };
        assert_eq!(stats.total_quad_vertex_count(), 400);
        assert_eq!(stats.total_quad_index_count(), 600);
    }
}
