//! # Batched 2D Renderer
//!
//! Submission-time geometry batching over an abstract graphics device.
//! Draw calls accumulate primitives into pre-sized staging buffers and
//! flush in bulk, so a scene of tens of thousands of quads costs a
//! handful of device draw calls instead of one per primitive.
//!
//! ## Architecture
//!
//! - **[`Renderer2D`]**: public façade — scene lifecycle, primitive
//!   submission, flush/overflow handling
//! - **`BatchState`**: live accumulation state, one sub-batch per
//!   primitive kind plus the shared texture slot table
//! - **`GeometryBuffer`**: fixed-capacity CPU staging per kind
//! - **`TextureSlotTable`**: sampler-slot assignment under the hardware
//!   slot limit
//!
//! ## Overflow Policy
//!
//! A submission that would exceed the index capacity of its kind, or
//! saturate the texture slot table, triggers an implicit
//! flush-and-reset *before* anything is written. No primitive is ever
//! split across batches, and callers never observe the flush beyond
//! the draw-call statistics.

mod batch;
mod geometry;
mod texture_slots;

pub use batch::BatchStats;

use batch::BatchState;
use geometry::fan_quad_indices;

use crate::core::config::Renderer2DConfig;
use crate::foundation::math::{quad_transform, Mat4, Vec2, Vec3, Vec4};
use crate::render::api::{
    BufferHandle, GraphicsDevice, ShaderHandle, TextureHandle, VertexArrayHandle,
};
use crate::render::primitives::{LineVertex, OrthographicCamera, QuadVertex, Texture2D};
use crate::render::{RenderError, RenderResult};

/// Unit-quad corners, counter-clockwise from bottom-left
const QUAD_VERTEX_POSITIONS: [[f32; 4]; 4] = [
    [-0.5, -0.5, 0.0, 1.0],
    [0.5, -0.5, 0.0, 1.0],
    [0.5, 0.5, 0.0, 1.0],
    [-0.5, 0.5, 0.0, 1.0],
];

/// Texture coordinates matching [`QUAD_VERTEX_POSITIONS`]
const QUAD_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Sampler slot of the reserved 1x1 white texture
const WHITE_TEXTURE_SLOT: f32 = 0.0;

/// Screen-space lengths below this are treated as degenerate lines
const DEGENERATE_LINE_EPSILON: f32 = 1e-10;

/// # 2D Batch Renderer
///
/// Owns the staging buffers, slot table, and device resources of the
/// batching core for its whole lifetime. Construction allocates every
/// buffer at full capacity and uploads the reserved white texture;
/// dropping the renderer releases the CPU staging memory (device
/// resource reclamation is the backend's concern).
///
/// ## Contract
///
/// Single-threaded: all submissions for a scene must come from the one
/// thread driving the renderer. Submission order is draw order within a
/// batch, and batches flush in order, so visual order is submission
/// order — alpha blending relies on this.
///
/// `draw_*` calls are valid only between [`begin_scene`] and
/// [`end_scene`]; violating that is a programmer error checked by debug
/// assertions only, matching the no-runtime-guard design of the rest of
/// the core.
///
/// [`begin_scene`]: Renderer2D::begin_scene
/// [`end_scene`]: Renderer2D::end_scene
pub struct Renderer2D {
    device: Box<dyn GraphicsDevice>,

    batch: BatchState,

    quad_vertex_buffer: BufferHandle,
    quad_vertex_array: VertexArrayHandle,
    quad_shader: ShaderHandle,

    line_vertex_buffer: BufferHandle,
    line_vertex_array: VertexArrayHandle,
    line_shader: ShaderHandle,

    white_texture: Texture2D,

    view_projection: Mat4,
    viewport_width: u32,
    viewport_height: u32,
    in_scene: bool,
}

impl Renderer2D {
    /// Construct the renderer and allocate all batch resources
    ///
    /// Creates the staging buffers and their GPU-resident counterparts
    /// at full configured capacity, precomputes and uploads the index
    /// pattern for both primitive kinds, uploads the reserved white
    /// texture, and compiles the two shader programs. Nothing else is
    /// allocated for the renderer's lifetime.
    ///
    /// # Errors
    /// Returns [`RenderError`] when the configuration is invalid or the
    /// device fails to create a resource (memory, shader compilation).
    pub fn new(
        mut device: Box<dyn GraphicsDevice>,
        config: &Renderer2DConfig,
    ) -> RenderResult<Self> {
        config
            .validate()
            .map_err(|e| RenderError::InitializationFailed(e.to_string()))?;

        log::info!(
            "Initializing 2D batch renderer: {} quads, {} lines, {} texture slots per batch",
            config.max_quads,
            config.max_lines,
            config.max_texture_slots
        );

        let quad_vertex_buffer = device.create_vertex_buffer(
            u64::from(config.max_quad_vertices()) * QuadVertex::STRIDE_BYTES as u64,
            &QuadVertex::layout(),
        )?;
        let quad_index_buffer =
            device.create_index_buffer(&fan_quad_indices(config.max_quad_indices()))?;
        let quad_vertex_array = device.create_vertex_array(quad_vertex_buffer, quad_index_buffer)?;

        let line_vertex_buffer = device.create_vertex_buffer(
            u64::from(config.max_line_vertices()) * LineVertex::STRIDE_BYTES as u64,
            &LineVertex::layout(),
        )?;
        let line_index_buffer =
            device.create_index_buffer(&fan_quad_indices(config.max_line_indices()))?;
        let line_vertex_array = device.create_vertex_array(line_vertex_buffer, line_index_buffer)?;

        let white_texture = Texture2D::white(device.as_mut())?;

        let quad_shader = device.create_shader(&config.quad_shader)?;
        let line_shader = device.create_shader(&config.line_shader)?;

        // Seed the sampler array once; slots never move after this.
        let samplers: Vec<i32> = (0..config.max_texture_slots as i32).collect();
        device.bind_shader(quad_shader);
        device.set_uniform_int_array("u_Textures", &samplers);

        // Cap style is a numeric shader contract:
        // 0 none, 1 square, 2 round, 3 triangle.
        device.bind_shader(line_shader);
        device.set_uniform_int("u_Caps", 3);

        let batch = BatchState::new(config, white_texture.handle());

        log::debug!(
            "2D batch renderer ready: quad staging {} bytes, line staging {} bytes",
            config.max_quad_vertices() as usize * QuadVertex::STRIDE_BYTES,
            config.max_line_vertices() as usize * LineVertex::STRIDE_BYTES
        );

        Ok(Self {
            device,
            batch,
            quad_vertex_buffer,
            quad_vertex_array,
            quad_shader,
            line_vertex_buffer,
            line_vertex_array,
            line_shader,
            white_texture,
            view_projection: Mat4::identity(),
            viewport_width: 1280,
            viewport_height: 720,
            in_scene: false,
        })
    }

    /// Start a scene under the camera's view-projection matrix
    ///
    /// Captures the matrix for vertex transforms and for line
    /// clip/pixel conversion, uploads it to the quad shader, and resets
    /// the accumulation state. Must be paired with [`end_scene`];
    /// re-entering a scene is a contract violation.
    ///
    /// [`end_scene`]: Renderer2D::end_scene
    pub fn begin_scene(&mut self, camera: &OrthographicCamera) {
        debug_assert!(!self.in_scene, "begin_scene called twice without end_scene");

        self.view_projection = *camera.view_projection_matrix();
        self.device.bind_shader(self.quad_shader);
        self.device
            .set_uniform_mat4("u_ViewProjection", &self.view_projection);

        self.batch.reset();
        self.in_scene = true;
    }

    /// Finish the scene: upload staged vertices and flush both batches
    pub fn end_scene(&mut self) {
        debug_assert!(self.in_scene, "end_scene without matching begin_scene");

        self.upload_staged();
        self.flush();
        self.in_scene = false;
    }

    /// Issue the draw calls for the current batch contents
    ///
    /// Binds the slot table's textures, then the shader and buffers of
    /// each non-empty primitive kind, and draws it with one indexed
    /// call. Invoked by [`end_scene`] and by overflow handling; callers
    /// rarely need it directly, and it does not upload staged data by
    /// itself.
    ///
    /// [`end_scene`]: Renderer2D::end_scene
    pub fn flush(&mut self) {
        if !self.batch.quads.is_empty() {
            for (slot, texture) in self.batch.texture_slots.bound().iter().enumerate() {
                self.device.bind_texture(*texture, slot as u32);
            }
            self.device.bind_shader(self.quad_shader);
            self.device
                .draw_indexed(self.quad_vertex_array, self.batch.quads.index_count());
            self.batch.stats.draw_calls += 1;
        }

        if !self.batch.lines.is_empty() {
            self.device.bind_shader(self.line_shader);
            self.device
                .draw_indexed(self.line_vertex_array, self.batch.lines.index_count());
            self.batch.stats.draw_calls += 1;
        }
    }

    /// Draw an axis-aligned colored quad
    ///
    /// The quad is the unit square scaled by `size` and translated to
    /// `position`; `position.z` orders layers under the scene camera.
    pub fn draw_quad(&mut self, position: Vec3, size: Vec2, color: Vec4) {
        debug_assert!(self.in_scene, "draw_quad outside begin_scene/end_scene");

        if !self.batch.quads.can_fit(Renderer2DConfig::INDICES_PER_PRIMITIVE) {
            self.flush_and_reset();
        }

        let transform = Mat4::new_translation(&position)
            * Mat4::new_nonuniform_scaling(&Vec3::new(size.x, size.y, 1.0));
        self.emit_quad(&transform, color, WHITE_TEXTURE_SLOT, 1.0);
    }

    /// Draw an axis-aligned textured quad
    ///
    /// `tiling_factor` multiplies the texture coordinates for repeated
    /// sampling; `tint` is the per-vertex color the texture sample is
    /// modulated by.
    pub fn draw_textured_quad(
        &mut self,
        position: Vec3,
        size: Vec2,
        texture: &Texture2D,
        tiling_factor: f32,
        tint: Vec4,
    ) {
        debug_assert!(self.in_scene, "draw_textured_quad outside begin_scene/end_scene");

        if !self.batch.quads.can_fit(Renderer2DConfig::INDICES_PER_PRIMITIVE) {
            self.flush_and_reset();
        }
        let texture_index = self.acquire_texture_slot(texture.handle());

        let transform = Mat4::new_translation(&position)
            * Mat4::new_nonuniform_scaling(&Vec3::new(size.x, size.y, 1.0));
        self.emit_quad(&transform, tint, texture_index, tiling_factor);
    }

    /// Draw a rotated colored quad
    ///
    /// `rotation` is degrees counter-clockwise about the quad center;
    /// the transform composes as translate, rotate, scale.
    pub fn draw_rotated_quad(&mut self, position: Vec3, size: Vec2, rotation: f32, color: Vec4) {
        debug_assert!(self.in_scene, "draw_rotated_quad outside begin_scene/end_scene");

        if !self.batch.quads.can_fit(Renderer2DConfig::INDICES_PER_PRIMITIVE) {
            self.flush_and_reset();
        }

        let transform = quad_transform(position, rotation, size);
        self.emit_quad(&transform, color, WHITE_TEXTURE_SLOT, 1.0);
    }

    /// Draw a rotated textured quad
    pub fn draw_rotated_textured_quad(
        &mut self,
        position: Vec3,
        size: Vec2,
        rotation: f32,
        texture: &Texture2D,
        tiling_factor: f32,
        tint: Vec4,
    ) {
        debug_assert!(
            self.in_scene,
            "draw_rotated_textured_quad outside begin_scene/end_scene"
        );

        if !self.batch.quads.can_fit(Renderer2DConfig::INDICES_PER_PRIMITIVE) {
            self.flush_and_reset();
        }
        let texture_index = self.acquire_texture_slot(texture.handle());

        let transform = quad_transform(position, rotation, size);
        self.emit_quad(&transform, tint, texture_index, tiling_factor);
    }

    /// Draw a constant-pixel-width line between two world points
    ///
    /// Both endpoints are projected through the scene's view-projection
    /// matrix and mapped into pixel space against the current viewport,
    /// where the segment is expanded into a quad of `width` pixels.
    /// The expansion happens in screen space so the stroke width is
    /// independent of camera zoom. Zero-length lines (below a small
    /// screen-space epsilon) are dropped without emitting geometry.
    pub fn draw_line(&mut self, a: Vec3, b: Vec3, width: f32, color: Vec4) {
        debug_assert!(self.in_scene, "draw_line outside begin_scene/end_scene");

        if !self.batch.lines.can_fit(Renderer2DConfig::INDICES_PER_PRIMITIVE) {
            self.flush_and_reset();
        }

        // World to clip.
        let clip_a = self.view_projection * Vec4::new(a.x, a.y, a.z, 1.0);
        let clip_b = self.view_projection * Vec4::new(b.x, b.y, b.z, 1.0);

        // Clip to pixel, y-down.
        let viewport_w = self.viewport_width as f32;
        let viewport_h = self.viewport_height as f32;
        let pixel_a = Vec2::new(
            0.5 * viewport_w * (clip_a.x / clip_a.w + 1.0),
            0.5 * viewport_h * (1.0 - clip_a.y / clip_a.w),
        );
        let pixel_b = Vec2::new(
            0.5 * viewport_w * (clip_b.x / clip_b.w + 1.0),
            0.5 * viewport_h * (1.0 - clip_b.y / clip_b.w),
        );

        let mut direction = pixel_b - pixel_a;
        let length = direction.norm();
        if length < DEGENERATE_LINE_EPSILON {
            return;
        }
        direction /= length;
        let normal = Vec2::new(-direction.y, direction.x);

        let d = 0.5 * width;
        let d_over_width = d / viewport_w;
        let d_over_height = d / viewport_h;

        // Each corner steps half a width outward along the segment and
        // across it; `along` is -1 at A and +1 at B, `across` matches
        // the sign of the local v coordinate. The y component flips
        // because pixel space is y-down while clip space is y-up.
        let corners = [
            (clip_a, -1.0_f32, 1.0_f32, -d),
            (clip_b, 1.0, 1.0, length + d),
            (clip_b, 1.0, -1.0, length + d),
            (clip_a, -1.0, -1.0, -d),
        ];

        let color: [f32; 4] = color.into();
        let mut vertices = [LineVertex::default(); 4];
        for (vertex, (clip, along, across, local_u)) in vertices.iter_mut().zip(corners) {
            let offset = Vec4::new(
                (along * direction.x + across * normal.x) * d_over_width,
                (-along * direction.y - across * normal.y) * d_over_height,
                0.0,
                0.0,
            );
            let position = clip + offset;
            *vertex = LineVertex {
                clip_coord: [position.x, position.y, position.z, position.w],
                color,
                local_coord: [local_u, across * d],
                width: 2.0 * d,
                length,
            };
        }

        self.batch.lines.push_primitive(vertices);
        self.batch.stats.line_count += 1;
    }

    /// Update the viewport dimensions used for line pixel mapping
    ///
    /// Must be called whenever the render target size changes; stale
    /// dimensions skew every subsequent line width.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_width = width.max(1);
        self.viewport_height = height.max(1);
    }

    /// Running statistics since the last [`reset_stats`]
    ///
    /// [`reset_stats`]: Renderer2D::reset_stats
    #[must_use]
    pub const fn stats(&self) -> BatchStats {
        self.batch.stats
    }

    /// Zero the statistics counters
    ///
    /// Independent of scene lifecycle; typically called once per frame
    /// by a profiling overlay.
    pub fn reset_stats(&mut self) {
        self.batch.stats = BatchStats::default();
    }

    /// The injected graphics device
    #[must_use]
    pub fn device(&self) -> &dyn GraphicsDevice {
        self.device.as_ref()
    }

    /// Mutable access to the injected graphics device
    ///
    /// Texture creation goes through here so textures live on the same
    /// device the batches draw with.
    pub fn device_mut(&mut self) -> &mut dyn GraphicsDevice {
        self.device.as_mut()
    }

    /// The reserved white texture bound to slot 0
    #[must_use]
    pub const fn white_texture(&self) -> &Texture2D {
        &self.white_texture
    }

    /// Transform the unit quad and stage four vertices
    ///
    /// Capacity and slot assignment are the caller's responsibility;
    /// nothing here may flush.
    fn emit_quad(&mut self, transform: &Mat4, color: Vec4, texture_index: f32, tiling_factor: f32) {
        let color: [f32; 4] = color.into();
        let mut vertices = [QuadVertex::default(); 4];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            let position = transform * Vec4::from(QUAD_VERTEX_POSITIONS[i]);
            *vertex = QuadVertex {
                position: [position.x, position.y, position.z],
                color,
                tex_coord: QUAD_TEX_COORDS[i],
                tex_index: texture_index,
                tiling_factor,
            };
        }

        self.batch.quads.push_primitive(vertices);
        self.batch.stats.quad_count += 1;
    }

    /// Resolve a texture identity to its sampler slot for this batch
    ///
    /// Saturation is absorbed here: the current batch is flushed and
    /// the acquisition retried against the fresh table.
    fn acquire_texture_slot(&mut self, texture: TextureHandle) -> f32 {
        let slot = match self.batch.texture_slots.acquire(texture) {
            Some(slot) => slot,
            None => {
                log::trace!(
                    "all {} texture slots bound, flushing batch",
                    self.batch.texture_slots.slot_count()
                );
                self.flush_and_reset();
                // A freshly reset table always has a slot free past the
                // reserved white slot.
                self.batch.texture_slots.acquire(texture).unwrap_or(0)
            }
        };
        slot as f32
    }

    /// Upload the written prefix of each non-empty staging buffer
    fn upload_staged(&mut self) {
        log::trace!(
            "staging upload: {} quad bytes, {} line bytes",
            self.batch.quads.bytes_written(),
            self.batch.lines.bytes_written()
        );
        if !self.batch.quads.is_empty() {
            self.device
                .upload_vertex_data(self.quad_vertex_buffer, self.batch.quads.bytes(), 0);
        }
        if !self.batch.lines.is_empty() {
            self.device
                .upload_vertex_data(self.line_vertex_buffer, self.batch.lines.bytes(), 0);
        }
    }

    /// Flush the accumulated batch and start a fresh one mid-scene
    fn flush_and_reset(&mut self) {
        self.upload_staged();
        self.flush();
        self.batch.reset();
    }
}

impl std::fmt::Debug for Renderer2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer2D")
            .field("in_scene", &self.in_scene)
            .field("viewport", &(self.viewport_width, self.viewport_height))
            .field("stats", &self.batch.stats)
            .finish_non_exhaustive()
    }
}
