//! Anti-aliased thick lines.
use glam::{IVec2, Vec2};

use crate::color::Color;
use crate::raster::canvas::Canvas;

/// Draw a line of `width` pixels from `from` to `to`.
///
/// The centerline is walked in unit steps for `floor(length)` steps. At each step a
/// row of sub-pixel points spaced one pixel apart across the line is splatted, see
/// [`splat_point`].
pub fn draw_line(canvas: &mut Canvas, from: Vec2, to: Vec2, width: f32, color: Color) {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    let (sin, cos) = angle.sin_cos();
    let dir = Vec2::new(cos, sin);
    let normal = Vec2::new(-sin, cos);
    let steps = from.distance(to) as usize;
    let half = width / 2.0;

    let mut p = from;
    for _ in 0..steps {
        let mut w = -half;
        while w < half {
            splat_point(canvas, p - Vec2::splat(0.5) + normal * w, color);
            w += 1.0;
        }
        p += dir;
    }
}

/// Spread a sub-pixel point over the 3×3 pixels around its rounded position.
///
/// Each pixel receives coverage `1 - distance` (scaled to 0..=255) and is blended
/// with [`Canvas::blend_accumulate`]; pixels at distance ≥ 1 are skipped.
pub fn splat_point(canvas: &mut Canvas, point: Vec2, color: Color) {
    let center = IVec2::new(point.x.round() as i32, point.y.round() as i32);
    for dx in -1..=1 {
        for dy in -1..=1 {
            let pixel = center + IVec2::new(dx, dy);
            let v = 1.0 - point.distance(pixel.as_vec2());
            if v <= 0.0 {
                continue;
            }
            let coverage = (255.0 * v) as u32;
            if coverage == 0 {
                continue;
            }
            canvas.blend_accumulate(pixel.x, pixel.y, color, coverage.min(0xFF));
        }
    }
}
