//! Batch-scoped texture slot assignment
//!
//! Maps texture identities to sampler-array slots for the duration of
//! one batch. Slot 0 is permanently the 1x1 white texture so that
//! untextured quads share the textured draw path.

use crate::render::api::TextureHandle;

/// Bounded registry of texture identity to sampler slot
///
/// Lookup is a linear scan: the table never exceeds the hardware slot
/// limit (32 by default), the scan runs at most once per textured
/// submission, and the dominant cost is the eventual bind, not the
/// lookup. Identities are opaque handles compared by equality; the
/// table owns none of the textures it references.
#[derive(Debug)]
pub(crate) struct TextureSlotTable {
    slots: Vec<TextureHandle>,
    max_slots: usize,
}

impl TextureSlotTable {
    /// Create a table with slot 0 bound to the white texture
    pub(crate) fn new(white_texture: TextureHandle, max_slots: usize) -> Self {
        let mut slots = Vec::with_capacity(max_slots);
        slots.push(white_texture);
        Self { slots, max_slots }
    }

    /// Drop all assignments except the reserved white slot
    pub(crate) fn reset(&mut self) {
        self.slots.truncate(1);
    }

    /// Look up or assign the slot for a texture identity
    ///
    /// Returns the existing slot if the identity is already bound this
    /// batch, the next free slot otherwise, or `None` when the table is
    /// saturated. `None` obliges the caller to flush-and-reset and then
    /// retry, which always succeeds against the fresh table.
    pub(crate) fn acquire(&mut self, texture: TextureHandle) -> Option<u32> {
        if let Some(slot) = self.slots.iter().position(|&bound| bound == texture) {
            return Some(slot as u32);
        }
        if self.slots.len() == self.max_slots {
            return None;
        }
        self.slots.push(texture);
        Some((self.slots.len() - 1) as u32)
    }

    /// Currently bound textures, slot order, for flush-time binding
    pub(crate) fn bound(&self) -> &[TextureHandle] {
        &self.slots
    }

    /// Number of occupied slots, the white slot included
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
