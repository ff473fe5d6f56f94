//! Starfield demo application
//!
//! Drives the batched 2D renderer against the headless recording
//! device: a drifting field of quads plus constellation lines, no
//! window required. Run with `RUST_LOG=debug` to watch the renderer's
//! lifecycle, and read the per-frame stats to see batching at work.

use sprite_engine::prelude::*;

const STAR_COUNT: u32 = 2500;
const FRAME_COUNT: u32 = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    sprite_engine::foundation::logging::init();

    log::info!("Creating headless device and 2D batch renderer...");
    let device = Box::new(HeadlessDevice::new());
    let config = Renderer2DConfig::default();
    let mut renderer = Renderer2D::new(device, &config)?;
    renderer.set_viewport(1280, 720);

    let mut camera = OrthographicCamera::new(-1.6, 1.6, -0.9, 0.9);
    camera.set_position(Vec3::new(0.0, 0.0, 0.0));

    for frame in 0..FRAME_COUNT {
        let time = frame as f32 / FRAME_COUNT as f32;
        renderer.reset_stats();
        renderer.begin_scene(&camera);

        draw_stars(&mut renderer, time);
        draw_constellation(&mut renderer, time);

        renderer.end_scene();

        let stats = renderer.stats();
        log::info!(
            "frame {frame}: {} quads, {} lines, {} draw calls",
            stats.quad_count,
            stats.line_count,
            stats.draw_calls
        );
    }

    Ok(())
}

/// Scatter a deterministic spiral of star quads
fn draw_stars(renderer: &mut Renderer2D, time: f32) {
    for i in 0..STAR_COUNT {
        let t = i as f32 / STAR_COUNT as f32;
        let angle = t * 200.0 + time * std::f32::consts::TAU;
        let radius = 0.05 + 1.5 * t;

        let position = Vec3::new(radius * angle.cos(), radius * angle.sin() * 0.56, 0.0);
        let twinkle = 0.6 + 0.4 * (angle * 3.0).sin();
        let size = 0.004 + 0.006 * t;

        renderer.draw_rotated_quad(
            position,
            Vec2::new(size, size),
            angle.to_degrees(),
            Vec4::new(twinkle, twinkle, 1.0, 1.0),
        );
    }
}

/// Join a handful of the outer stars with constant-width lines
fn draw_constellation(renderer: &mut Renderer2D, time: f32) {
    let mut previous: Option<Vec3> = None;
    for i in (0..STAR_COUNT).step_by(250) {
        let t = i as f32 / STAR_COUNT as f32;
        let angle = t * 200.0 + time * std::f32::consts::TAU;
        let radius = 0.05 + 1.5 * t;
        let point = Vec3::new(radius * angle.cos(), radius * angle.sin() * 0.56, 0.0);

        if let Some(start) = previous {
            renderer.draw_line(start, point, 2.0, Vec4::new(0.4, 0.8, 1.0, 0.35));
        }
        previous = Some(point);
    }
}
