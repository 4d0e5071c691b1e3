//! In-memory render target for native and test use
//!
//! Squares are rasterized to whole pixels with no anti-aliasing: every pixel
//! the square touches is filled, and a square always covers at least one pixel.

use super::Surface;
use super::color::Color;

/// A CPU-side RGB framebuffer
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// Row-major pixels, `None` = cleared (transparent)
    pixels: Vec<Option<Color>>,
    /// Squares drawn since the last clear
    rects_drawn: usize,
    /// Number of clears since creation
    clears: u64,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
            rects_drawn: 0,
            clears: 0,
        }
    }

    /// Color at (x, y), `None` if cleared or out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Count of non-transparent pixels
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    /// Squares drawn since the last clear
    pub fn rects_drawn(&self) -> usize {
        self.rects_drawn
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![None; width as usize * height as usize];
        self.rects_drawn = 0;
    }

    fn clear(&mut self) {
        self.pixels.fill(None);
        self.rects_drawn = 0;
        self.clears += 1;
    }

    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Color) {
        self.rects_drawn += 1;
        if self.width == 0 || self.height == 0 || !x.is_finite() || !y.is_finite() {
            return;
        }

        let x0 = x.floor().max(0.0);
        let y0 = y.floor().max(0.0);
        // Cover at least one pixel even for sub-pixel squares
        let x1 = (x + size).ceil().max(x0 + 1.0).min(self.width as f64);
        let y1 = (y + size).ceil().max(y0 + 1.0).min(self.height as f64);

        let (x0, x1) = (x0 as usize, x1 as usize);
        let (y0, y1) = (y0 as usize, y1 as usize);
        let stride = self.width as usize;
        for row in y0..y1 {
            for px in &mut self.pixels[row * stride + x0.min(x1)..row * stride + x1] {
                *px = Some(color);
            }
        }
    }
}
