//! Precomputed anti-aliased disc used to stamp nodes.
use glam::Vec2;

use crate::color::Color;
use crate::raster::canvas::Canvas;

/// Square alpha mask holding a disc with a one-pixel soft edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircleMask {
    side: u32,
    alpha: Vec<u8>,
}

impl CircleMask {
    /// Build the mask for a disc of `diameter` pixels.
    ///
    /// The side is `diameter` truncated to whole pixels; each pixel's alpha is
    /// `clamp(radius - distance, 0, 1) * 255`, measured from the pixel center.
    pub fn new(diameter: f32) -> Self {
        let side = diameter.max(0.0) as u32;
        let radius = diameter / 2.0;
        let center = Vec2::splat(radius);

        let mut alpha = Vec::with_capacity(side as usize * side as usize);
        for y in 0..side {
            for x in 0..side {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let v = (radius - p.distance(center)).clamp(0.0, 1.0);
                alpha.push((255.0 * v) as u8);
            }
        }

        Self { side, alpha }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Alpha at `(x, y)`; zero outside the mask.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.side || y >= self.side {
            return 0;
        }
        self.alpha[y as usize * self.side as usize + x as usize]
    }

    /// Composite `color` through the mask onto `canvas`, centered on `center`.
    ///
    /// The destination rectangle spans `center ± diameter / 2` with both corners
    /// truncated toward zero; mask pixels outside it or outside the canvas are skipped.
    pub fn stamp(&self, canvas: &mut Canvas, center: Vec2, diameter: f32, color: Color) {
        let half = diameter / 2.0;
        let min_x = (center.x - half) as i32;
        let min_y = (center.y - half) as i32;
        let max_x = (center.x + half) as i32;
        let max_y = (center.y + half) as i32;

        for my in 0..self.side {
            let y = min_y + my as i32;
            if y >= max_y {
                break;
            }
            for mx in 0..self.side {
                let x = min_x + mx as i32;
                if x >= max_x {
                    break;
                }
                let a = self.get(mx, my);
                if a > 0 {
                    canvas.blend_over(x, y, color, a);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_a_soft_disc() {
        let mask = CircleMask::new(10.0);
        assert_eq!(mask.side(), 10);
        // Center pixels are fully covered, corners are empty.
        assert_eq!(mask.get(4, 4), 255);
        assert_eq!(mask.get(5, 5), 255);
        assert_eq!(mask.get(0, 0), 0);
        assert_eq!(mask.get(9, 9), 0);
        // Rim pixel: partial coverage from its center's distance to the disc edge.
        let d = Vec2::new(0.5, 5.5).distance(Vec2::splat(5.0));
        assert_eq!(mask.get(0, 5), (255.0 * (5.0 - d)) as u8);
        assert!(mask.get(0, 5) > 0 && mask.get(0, 5) < 255);
        assert_eq!(mask.get(10, 0), 0);
    }

    #[test]
    fn mask_is_symmetric() {
        let mask = CircleMask::new(7.0);
        let s = mask.side();
        for y in 0..s {
            for x in 0..s {
                assert_eq!(mask.get(x, y), mask.get(s - 1 - x, y));
                assert_eq!(mask.get(x, y), mask.get(y, x));
            }
        }
    }

    #[test]
    fn fractional_and_zero_diameters() {
        assert_eq!(CircleMask::new(4.9).side(), 4);
        assert_eq!(CircleMask::new(0.0).side(), 0);
        assert_eq!(CircleMask::new(0.0).get(0, 0), 0);
    }

    #[test]
    fn stamp_paints_disc_centered_on_position() {
        let mut canvas = Canvas::new(20, 20, Color::TRANSPARENT);
        let mask = CircleMask::new(6.0);
        let green = Color::rgb(0, 255, 0);
        mask.stamp(&mut canvas, Vec2::new(10.0, 10.0), 6.0, green);

        assert_eq!(canvas.get(10, 10), Some(green));
        assert_eq!(canvas.get(9, 9), Some(green));
        assert_eq!(canvas.get(2, 2), Some(Color::TRANSPARENT));
        assert_eq!(canvas.get(13, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn stamp_clips_at_canvas_edges() {
        let mut canvas = Canvas::new(4, 4, Color::TRANSPARENT);
        let mask = CircleMask::new(6.0);
        mask.stamp(&mut canvas, Vec2::new(0.5, 0.5), 6.0, Color::rgb(255, 0, 0));
        assert_eq!(canvas.get(0, 0).unwrap().r, 255);
        assert!(canvas.get(0, 0).unwrap().a > 0);
    }
}
