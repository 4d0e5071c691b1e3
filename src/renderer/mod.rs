//! Drawable surfaces
//!
//! The engine only ever clears a surface and fills axis-aligned squares on it.

pub mod buffer;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod color;

pub use buffer::PixelBuffer;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use color::Color;

/// A render target
pub trait Surface {
    /// Current drawable size in pixels
    fn size(&self) -> (u32, u32);

    /// Change the drawable size. Contents are undefined afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Erase the whole surface
    fn clear(&mut self);

    /// Fill a `size`×`size` square whose top-left corner is at (x, y)
    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Color);
}
