//! CPU-side vertex staging
//!
//! A [`GeometryBuffer`] is the staging array one primitive kind writes
//! into between flushes. Capacity is fixed at construction and the
//! backing memory is reused for the renderer's lifetime; reset moves
//! the cursor, it never frees or zeroes.

use bytemuck::Pod;

/// Fixed-capacity staging array of vertex records
///
/// The buffer is dumb storage: it does not check remaining capacity on
/// write beyond a debug assertion. The batch state decides whether a
/// primitive fits before any of its vertices are written.
#[derive(Debug)]
pub(crate) struct GeometryBuffer<V> {
    vertices: Vec<V>,
}

impl<V: Pod> GeometryBuffer<V> {
    /// Allocate the full capacity up front
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Move the write cursor back to the start, keeping the allocation
    pub(crate) fn reset(&mut self) {
        self.vertices.clear();
    }

    /// Append one vertex record at the cursor
    ///
    /// Precondition: the caller has verified remaining capacity; the
    /// buffer must never reallocate.
    pub(crate) fn write(&mut self, record: V) {
        debug_assert!(
            self.vertices.len() < self.vertices.capacity(),
            "geometry buffer overflow: capacity check belongs to the batch state"
        );
        self.vertices.push(record);
    }

    /// Byte size of the written prefix, the exact upload size
    pub(crate) fn bytes_written(&self) -> usize {
        self.vertices.len() * std::mem::size_of::<V>()
    }

    /// Byte view of the written prefix for upload
    pub(crate) fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Precompute the shared quad index pattern for the full batch capacity
///
/// Four vertices per primitive, six indices in fan order
/// `0,1,2, 2,3,0`, offset by 4 per primitive. Written once into a
/// device index buffer at construction and never touched again.
pub(crate) fn fan_quad_indices(max_indices: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity(max_indices as usize);
    let mut offset = 0u32;
    while indices.len() < max_indices as usize {
        indices.extend_from_slice(&[
            offset,
            offset + 1,
            offset + 2,
            offset + 2,
            offset + 3,
            offset,
        ]);
        offset += 4;
    }
    indices
}
