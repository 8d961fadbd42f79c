//! Owned RGBA framebuffer and its compositing operators.
use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::color::Color;
use crate::error::Result;

/// A row-major grid of non-premultiplied RGBA pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            data: vec![background; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the size of the canvas as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Set the pixel at `(x, y)`; writes outside the canvas are dropped.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color;
        }
    }

    /// Accumulating blend used for connections.
    ///
    /// The existing color is weighted by its alpha and `color` by `coverage`
    /// (0..=255); the alphas add up, saturating at 255.
    pub fn blend_accumulate(&mut self, x: i32, y: i32, color: Color, coverage: u32) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if coverage == 0 {
            return;
        }
        let coverage = coverage.min(0xFF);
        let dst = self.data[i];
        let a = dst.a as u32;
        let total = a + coverage;
        let mix = |d: u8, s: u8| ((d as u32 * a + s as u32 * coverage) / total) as u8;

        self.data[i] = Color::rgba(
            mix(dst.r, color.r),
            mix(dst.g, color.g),
            mix(dst.b, color.b),
            total.min(0xFF) as u8,
        );
    }

    /// Porter-Duff "over": composite `color`, scaled by `mask` (0..=255), onto the pixel.
    pub fn blend_over(&mut self, x: i32, y: i32, color: Color, mask: u8) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let sa = (color.a as f32 / 255.0) * (mask as f32 / 255.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.data[i];
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |d: u8, s: u8| {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };

        self.data[i] = Color::rgba(
            mix(dst.r, color.r),
            mix(dst.g, color.g),
            mix(dst.b, color.b),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        );
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|c| c.to_array()).collect()
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            self.data[y as usize * self.width as usize + x as usize].into()
        })
    }

    /// Encode the canvas as PNG into `writer`.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        PngEncoder::new(writer).write_image(
            &self.to_rgba8(),
            self.width,
            self.height,
            ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_background() {
        let bg = Color::rgba(1, 2, 3, 4);
        let canvas = Canvas::new(3, 2, bg);
        assert_eq!(canvas.size(), (3, 2));
        assert!(canvas.pixels().iter().all(|c| *c == bg));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut canvas = Canvas::new(2, 2, Color::TRANSPARENT);
        assert_eq!(canvas.get(-1, 0), None);
        assert_eq!(canvas.get(2, 1), None);
        canvas.set(5, 5, Color::rgb(255, 0, 0));
        canvas.blend_accumulate(-1, 0, Color::rgb(255, 0, 0), 255);
        canvas.blend_over(0, 9, Color::rgb(255, 0, 0), 255);
        assert!(canvas.pixels().iter().all(|c| *c == Color::TRANSPARENT));
    }

    #[test]
    fn accumulate_on_transparent_takes_source_color() {
        let mut canvas = Canvas::new(1, 1, Color::TRANSPARENT);
        canvas.blend_accumulate(0, 0, Color::rgb(200, 100, 50), 128);
        assert_eq!(canvas.get(0, 0), Some(Color::rgba(200, 100, 50, 128)));
    }

    #[test]
    fn accumulate_weights_by_alpha_and_saturates() {
        let mut canvas = Canvas::new(1, 1, Color::TRANSPARENT);
        canvas.blend_accumulate(0, 0, Color::rgb(200, 0, 0), 100);
        canvas.blend_accumulate(0, 0, Color::rgb(0, 0, 200), 100);
        assert_eq!(canvas.get(0, 0), Some(Color::rgba(100, 0, 100, 200)));

        canvas.blend_accumulate(0, 0, Color::rgb(0, 0, 200), 100);
        assert_eq!(canvas.get(0, 0).unwrap().a, 255);
    }

    #[test]
    fn accumulate_ignores_zero_coverage() {
        let mut canvas = Canvas::new(1, 1, Color::rgba(9, 9, 9, 9));
        canvas.blend_accumulate(0, 0, Color::rgb(255, 255, 255), 0);
        assert_eq!(canvas.get(0, 0), Some(Color::rgba(9, 9, 9, 9)));
    }

    #[test]
    fn over_with_full_mask_replaces_pixel() {
        let mut canvas = Canvas::new(1, 1, Color::rgb(10, 20, 30));
        canvas.blend_over(0, 0, Color::rgb(0, 255, 0), 255);
        assert_eq!(canvas.get(0, 0), Some(Color::rgb(0, 255, 0)));
    }

    #[test]
    fn over_with_half_mask_mixes_on_opaque() {
        let mut canvas = Canvas::new(1, 1, Color::rgb(0, 0, 0));
        canvas.blend_over(0, 0, Color::rgb(255, 255, 255), 128);
        let px = canvas.get(0, 0).unwrap();
        assert_eq!(px.a, 255);
        assert!((127..=129).contains(&px.r));
    }

    #[test]
    fn over_on_transparent_keeps_source_color() {
        let mut canvas = Canvas::new(1, 1, Color::TRANSPARENT);
        canvas.blend_over(0, 0, Color::rgb(0, 255, 0), 64);
        assert_eq!(canvas.get(0, 0), Some(Color::rgba(0, 255, 0, 64)));
    }

    #[test]
    fn png_encoding_produces_signature() {
        let canvas = Canvas::new(4, 3, Color::rgb(1, 2, 3));
        let mut out = Vec::new();
        canvas.write_png(&mut out).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 3));
        assert_eq!(decoded.get_pixel(3, 2).0, [1, 2, 3, 255]);
    }

    #[test]
    fn to_image_matches_pixels() {
        let mut canvas = Canvas::new(3, 2, Color::TRANSPARENT);
        canvas.set(2, 1, Color::rgba(9, 8, 7, 6));
        canvas.set(0, 1, Color::rgb(200, 0, 0));

        let image = canvas.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [9, 8, 7, 6]);
        assert_eq!(image.get_pixel(0, 1).0, [200, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 0, 0, 0]);
        assert_eq!(image.as_raw(), &canvas.to_rgba8());
    }
}
