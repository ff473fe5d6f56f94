//! Scenario tests for the batched 2D renderer
//!
//! These drive the public façade against the headless recording device
//! and assert on what actually reached the device: draw-call counts,
//! upload sizes, slot binds, and the staged vertex payloads themselves
//! (reconstructed from the recorded uploads).

use approx::assert_relative_eq;

use crate::core::config::Renderer2DConfig;
use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};
use crate::render::backends::{HeadlessDevice, VertexUpload};
use crate::render::primitives::{LineVertex, OrthographicCamera, QuadVertex, Texture2D};
use crate::render::systems::renderer2d::Renderer2D;

const EPSILON: f32 = 1e-5;

fn renderer_with(config: &Renderer2DConfig) -> Renderer2D {
    Renderer2D::new(Box::new(HeadlessDevice::new()), config).expect("renderer construction")
}

fn small_renderer(max_quads: u32, max_texture_slots: u32) -> Renderer2D {
    renderer_with(&Renderer2DConfig {
        max_quads,
        max_lines: max_quads,
        max_texture_slots,
        ..Renderer2DConfig::default()
    })
}

fn recording(renderer: &Renderer2D) -> &HeadlessDevice {
    renderer
        .device()
        .as_any()
        .downcast_ref::<HeadlessDevice>()
        .expect("headless device")
}

/// Rebuild typed vertex records from a recorded byte upload
///
/// Copies record by record; the recorded `Vec<u8>` carries no
/// alignment guarantee, so a plain slice cast is not an option.
fn staged_records<V: bytemuck::Pod + Default>(upload: &VertexUpload) -> Vec<V> {
    assert_eq!(upload.data.len() % std::mem::size_of::<V>(), 0);
    upload
        .data
        .chunks_exact(std::mem::size_of::<V>())
        .map(|chunk| {
            let mut record = V::default();
            bytemuck::bytes_of_mut(&mut record).copy_from_slice(chunk);
            record
        })
        .collect()
}

fn quad_vertices(upload: &VertexUpload) -> Vec<QuadVertex> {
    staged_records(upload)
}

fn line_vertices(upload: &VertexUpload) -> Vec<LineVertex> {
    staged_records(upload)
}

fn camera() -> OrthographicCamera {
    OrthographicCamera::new(-1.0, 1.0, -1.0, 1.0)
}

/// Construction must not issue any draws or vertex uploads; it only
/// creates resources and seeds uniforms.
#[test]
fn construction_is_draw_free() {
    let renderer = small_renderer(8, 4);
    let device = recording(&renderer);

    assert!(device.draw_calls().is_empty());
    assert!(device.vertex_uploads().is_empty());
    // Buffers, index buffers, white texture, shaders all exist though.
    assert_eq!(device.texture_count(), 1);
    assert_eq!(device.shader_count(), 2);
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = Renderer2DConfig {
        max_texture_slots: 1,
        ..Renderer2DConfig::default()
    };
    assert!(Renderer2D::new(Box::new(HeadlessDevice::new()), &config).is_err());
}

/// An empty scene uploads nothing and draws nothing.
#[test]
fn empty_scene_is_a_no_op() {
    let mut renderer = small_renderer(8, 4);
    renderer.begin_scene(&camera());
    renderer.end_scene();

    let device = recording(&renderer);
    assert!(device.draw_calls().is_empty());
    assert!(device.vertex_uploads().is_empty());
    assert_eq!(renderer.stats().draw_calls, 0);
}

/// The emitted corners must equal the unit quad transformed by
/// translate * rotate * scale, in that matrix order.
#[test]
fn quad_vertices_follow_the_composed_transform() {
    let mut renderer = small_renderer(8, 4);
    let position = Vec3::new(1.0, 2.0, 0.5);
    let size = Vec2::new(2.0, 3.0);
    let rotation = 90.0;

    renderer.begin_scene(&camera());
    renderer.draw_rotated_quad(position, size, rotation, Vec4::new(1.0, 0.0, 0.0, 1.0));
    renderer.end_scene();

    let expected_transform = Mat4::new_translation(&position)
        * Mat4::from_axis_angle(&nalgebra::Vector3::z_axis(), rotation.to_radians())
        * Mat4::new_nonuniform_scaling(&Vec3::new(size.x, size.y, 1.0));
    let corners = [
        Vec4::new(-0.5, -0.5, 0.0, 1.0),
        Vec4::new(0.5, -0.5, 0.0, 1.0),
        Vec4::new(0.5, 0.5, 0.0, 1.0),
        Vec4::new(-0.5, 0.5, 0.0, 1.0),
    ];

    let device = recording(&renderer);
    let staged = quad_vertices(&device.vertex_uploads()[0]);
    assert_eq!(staged.len(), 4);

    for (vertex, corner) in staged.iter().zip(corners) {
        let expected = expected_transform * corner;
        assert_relative_eq!(vertex.position[0], expected.x, epsilon = EPSILON);
        assert_relative_eq!(vertex.position[1], expected.y, epsilon = EPSILON);
        assert_relative_eq!(vertex.position[2], expected.z, epsilon = EPSILON);
    }

    // Untextured quads ride the textured path through the white slot.
    assert_relative_eq!(staged[0].tex_index, 0.0);
    assert_relative_eq!(staged[0].tiling_factor, 1.0);
    assert_eq!(staged[0].tex_coord, [0.0, 0.0]);
    assert_eq!(staged[2].tex_coord, [1.0, 1.0]);
}

/// Filling a batch exactly must not flush early: one draw call, and
/// the upload carries exactly the written bytes, not the buffer size.
#[test]
fn full_batch_is_one_draw_call_with_exact_upload() {
    let mut renderer = small_renderer(4, 4);

    renderer.begin_scene(&camera());
    for i in 0..4 {
        renderer.draw_quad(
            Vec3::new(i as f32, 0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec4::new(1.0, 1.0, 1.0, 1.0),
        );
    }
    renderer.end_scene();

    let device = recording(&renderer);
    assert_eq!(device.draw_calls().len(), 1);
    assert_eq!(device.draw_calls()[0].index_count, 4 * 6);

    assert_eq!(device.vertex_uploads().len(), 1);
    assert_eq!(
        device.vertex_uploads()[0].data.len(),
        4 * 4 * std::mem::size_of::<QuadVertex>()
    );
}

/// One primitive past capacity: flush-and-reset happens before the
/// overflowing quad, which lands alone in the second batch.
#[test]
fn overflow_splits_into_two_draw_calls() {
    let mut renderer = small_renderer(2, 4);

    renderer.begin_scene(&camera());
    for _ in 0..3 {
        renderer.draw_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
    }
    renderer.end_scene();

    let device = recording(&renderer);
    let index_counts: Vec<u32> = device.draw_calls().iter().map(|d| d.index_count).collect();
    assert_eq!(index_counts, vec![12, 6]);
    assert_eq!(renderer.stats().draw_calls, 2);
    assert_eq!(renderer.stats().quad_count, 3);
}

/// Draw calls scale as the ceiling of submitted quads over capacity.
#[test]
fn draw_calls_match_capacity_ceiling() {
    let mut renderer = small_renderer(2, 4);

    renderer.begin_scene(&camera());
    for _ in 0..5 {
        renderer.draw_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
    }
    renderer.end_scene();

    assert_eq!(renderer.stats().draw_calls, 3); // ceil(5 / 2)
}

/// The default-capacity scenario: 20001 quads in one scene.
#[test]
fn scenario_20001_quads_two_draw_calls() {
    let mut renderer = renderer_with(&Renderer2DConfig::default());

    renderer.begin_scene(&camera());
    for _ in 0..20001 {
        renderer.draw_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
    }
    renderer.end_scene();

    let stats = renderer.stats();
    assert_eq!(stats.quad_count, 20001);
    assert_eq!(stats.draw_calls, 2);

    let device = recording(&renderer);
    let index_counts: Vec<u32> = device.draw_calls().iter().map(|d| d.index_count).collect();
    assert_eq!(index_counts, vec![20000 * 6, 6]);
}

/// Untextured flush binds exactly the white slot.
#[test]
fn untextured_flush_binds_only_white() {
    let mut renderer = small_renderer(8, 4);

    renderer.begin_scene(&camera());
    renderer.draw_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
    renderer.end_scene();

    let white = renderer.white_texture().handle();
    let device = recording(&renderer);
    assert_eq!(device.texture_binds().len(), 1);
    assert_eq!(device.texture_binds()[0].texture, white);
    assert_eq!(device.texture_binds()[0].slot, 0);
}

/// A textured quad takes slot 1 and writes the tint as vertex color.
#[test]
fn textured_quad_uses_slot_one_and_tint() {
    let mut renderer = small_renderer(8, 4);
    let texture = Texture2D::new(renderer.device_mut(), 2, 2).expect("texture");
    let tint = Vec4::new(0.2, 0.4, 0.6, 0.8);

    renderer.begin_scene(&camera());
    renderer.draw_textured_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), &texture, 3.0, tint);
    renderer.end_scene();

    let device = recording(&renderer);
    let staged = quad_vertices(&device.vertex_uploads()[0]);
    for vertex in &staged {
        assert_relative_eq!(vertex.tex_index, 1.0);
        assert_relative_eq!(vertex.tiling_factor, 3.0);
        assert_eq!(vertex.color, [0.2, 0.4, 0.6, 0.8]);
    }

    let binds: Vec<u32> = device.texture_binds().iter().map(|b| b.slot).collect();
    assert_eq!(binds, vec![0, 1]);
    assert_eq!(device.texture_binds()[1].texture, texture.handle());
}

/// Re-submitting the same texture identity must reuse its slot.
#[test]
fn same_texture_identity_shares_a_slot() {
    let mut renderer = small_renderer(8, 4);
    let texture = Texture2D::new(renderer.device_mut(), 2, 2).expect("texture");

    renderer.begin_scene(&camera());
    for _ in 0..2 {
        renderer.draw_textured_quad(
            Vec3::zeros(),
            Vec2::new(1.0, 1.0),
            &texture,
            1.0,
            Vec4::new(1.0, 1.0, 1.0, 1.0),
        );
    }
    renderer.end_scene();

    let device = recording(&renderer);
    assert_eq!(device.draw_calls().len(), 1);

    let staged = quad_vertices(&device.vertex_uploads()[0]);
    assert_eq!(staged.len(), 8);
    assert!(staged.iter().all(|v| (v.tex_index - 1.0).abs() < EPSILON));

    // White plus one texture, bound once each.
    assert_eq!(device.texture_binds().len(), 2);
}

/// The hardware slot limit: 31 distinct textures fill the table next
/// to the reserved white slot; the 32nd forces a flush, after which it
/// lands in slot 1 of the fresh table.
#[test]
fn slot_exhaustion_forces_flush_and_rebind() {
    let mut renderer = renderer_with(&Renderer2DConfig::default());
    let textures: Vec<Texture2D> = (0..32)
        .map(|_| Texture2D::new(renderer.device_mut(), 1, 1).expect("texture"))
        .collect();

    renderer.begin_scene(&camera());
    for texture in &textures[..31] {
        renderer.draw_textured_quad(
            Vec3::zeros(),
            Vec2::new(1.0, 1.0),
            texture,
            1.0,
            Vec4::new(1.0, 1.0, 1.0, 1.0),
        );
    }
    assert_eq!(renderer.stats().draw_calls, 0, "31 distinct textures fit one batch");

    renderer.draw_textured_quad(
        Vec3::zeros(),
        Vec2::new(1.0, 1.0),
        &textures[31],
        1.0,
        Vec4::new(1.0, 1.0, 1.0, 1.0),
    );
    assert_eq!(renderer.stats().draw_calls, 1, "the 32nd forces a flush");

    renderer.end_scene();
    assert_eq!(renderer.stats().draw_calls, 2);

    // The retried texture occupies slot 1 of the fresh table.
    let device = recording(&renderer);
    let second_upload = device.vertex_uploads().last().expect("second batch upload");
    let staged = quad_vertices(second_upload);
    assert_eq!(staged.len(), 4);
    assert!(staged.iter().all(|v| (v.tex_index - 1.0).abs() < EPSILON));
}

/// A zero-length line appends nothing at all.
#[test]
fn zero_length_line_is_dropped() {
    let mut renderer = small_renderer(8, 4);
    let point = Vec3::new(0.3, -0.2, 0.0);

    renderer.begin_scene(&camera());
    renderer.draw_line(point, point, 4.0, Vec4::new(1.0, 1.0, 1.0, 1.0));
    renderer.end_scene();

    let device = recording(&renderer);
    assert!(device.draw_calls().is_empty());
    assert!(device.vertex_uploads().is_empty());
    assert_eq!(renderer.stats().line_count, 0);
}

/// Line expansion happens in pixel space: a horizontal unit-ish line
/// on a 100x100 viewport spans 50 pixels, and every vertex carries the
/// stroke width and that length.
#[test]
fn line_vertices_carry_pixel_space_expansion() {
    let mut renderer = small_renderer(8, 4);
    renderer.set_viewport(100, 100);

    renderer.begin_scene(&camera());
    renderer.draw_line(
        Vec3::new(-0.5, 0.0, 0.0),
        Vec3::new(0.5, 0.0, 0.0),
        4.0,
        Vec4::new(0.0, 1.0, 0.0, 1.0),
    );
    renderer.end_scene();

    let device = recording(&renderer);
    assert_eq!(device.draw_calls().len(), 1);
    assert_eq!(device.draw_calls()[0].index_count, 6);

    let staged = line_vertices(&device.vertex_uploads()[0]);
    assert_eq!(staged.len(), 4);

    let half_width = 2.0;
    let expected_length = 50.0;
    for vertex in &staged {
        assert_relative_eq!(vertex.width, 4.0);
        assert_relative_eq!(vertex.length, expected_length, epsilon = EPSILON);
    }

    // Local coords: -d .. length + d along, +/-d across, corner order
    // A-top, B-top, B-bottom, A-bottom.
    let locals: Vec<[f32; 2]> = staged.iter().map(|v| v.local_coord).collect();
    let expected = [
        [-half_width, half_width],
        [expected_length + half_width, half_width],
        [expected_length + half_width, -half_width],
        [-half_width, -half_width],
    ];
    for (local, expected) in locals.iter().zip(expected) {
        assert_relative_eq!(local[0], expected[0], epsilon = EPSILON);
        assert_relative_eq!(local[1], expected[1], epsilon = EPSILON);
    }

    // The endpoints sit half a pixel-width outside the segment in clip
    // space: A is left of x = -0.5, B right of x = +0.5.
    assert!(staged[0].clip_coord[0] < -0.5);
    assert!(staged[1].clip_coord[0] > 0.5);
}

/// Quads and lines flush as separate draw calls from one scene.
#[test]
fn mixed_scene_issues_one_draw_per_kind() {
    let mut renderer = small_renderer(8, 4);

    renderer.begin_scene(&camera());
    renderer.draw_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
    renderer.draw_line(
        Vec3::new(-0.5, 0.0, 0.0),
        Vec3::new(0.5, 0.0, 0.0),
        1.0,
        Vec4::new(1.0, 1.0, 1.0, 1.0),
    );
    renderer.end_scene();

    let device = recording(&renderer);
    assert_eq!(device.draw_calls().len(), 2);
    assert_eq!(device.vertex_uploads().len(), 2);
    assert_eq!(renderer.stats().draw_calls, 2);
    assert_eq!(renderer.stats().quad_count, 1);
    assert_eq!(renderer.stats().line_count, 1);
}

/// Statistics survive scene boundaries and reset only explicitly.
#[test]
fn stats_reset_is_independent_of_scene_lifecycle() {
    let mut renderer = small_renderer(8, 4);

    renderer.begin_scene(&camera());
    renderer.draw_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
    renderer.end_scene();

    renderer.begin_scene(&camera());
    renderer.draw_quad(Vec3::zeros(), Vec2::new(1.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
    renderer.end_scene();

    assert_eq!(renderer.stats().quad_count, 2);
    assert_eq!(renderer.stats().total_quad_vertex_count(), 8);

    renderer.reset_stats();
    assert_eq!(renderer.stats(), crate::render::BatchStats::default());
}

/// A new scene starts from a clean slot table: textures from the
/// previous scene must be re-acquired, not remembered.
#[test]
fn begin_scene_resets_the_slot_table() {
    let mut renderer = small_renderer(8, 4);
    let texture = Texture2D::new(renderer.device_mut(), 2, 2).expect("texture");

    renderer.begin_scene(&camera());
    renderer.draw_textured_quad(
        Vec3::zeros(),
        Vec2::new(1.0, 1.0),
        &texture,
        1.0,
        Vec4::new(1.0, 1.0, 1.0, 1.0),
    );
    renderer.end_scene();

    renderer.begin_scene(&camera());
    renderer.draw_textured_quad(
        Vec3::zeros(),
        Vec2::new(1.0, 1.0),
        &texture,
        1.0,
        Vec4::new(1.0, 1.0, 1.0, 1.0),
    );
    renderer.end_scene();

    // Same slot both scenes: the table was rebuilt, not carried over.
    let device = recording(&renderer);
    for upload in device.vertex_uploads() {
        let staged = quad_vertices(upload);
        assert!(staged.iter().all(|v| (v.tex_index - 1.0).abs() < EPSILON));
    }
}
