//! Canvas 2D render target (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use super::color::Color;
use crate::error::{Error, Result};

/// A `<canvas>` drawn through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Last fill style set on the context (avoids restyling per particle)
    fill: Option<Color>,
}

impl CanvasSurface {
    /// Look up a canvas by element id
    pub fn from_element_id(id: &str) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Surface("no document".to_string()))?;

        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| Error::Surface(format!("no element with id `{id}`")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::Surface(format!("element `{id}` is not a canvas")))?;

        Self::from_canvas(canvas)
    }

    /// Wrap an existing canvas element
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| Error::Surface("2d context unavailable".to_string()))?;

        Ok(Self {
            canvas,
            ctx,
            fill: None,
        })
    }

    /// Pin the canvas behind the page as a non-interactive, screen-blended layer
    pub fn apply_layer_style(&self, opacity: f64) {
        let style = self.canvas.style();
        let props = [
            ("position", "fixed".to_string()),
            ("inset", "0".to_string()),
            ("z-index", "0".to_string()),
            ("pointer-events", "none".to_string()),
            ("mix-blend-mode", "screen".to_string()),
            ("opacity", format!("{opacity}")),
        ];
        for (name, value) in props {
            if let Err(e) = style.set_property(name, &value) {
                log::warn!("Failed to set canvas style {name}: {e:?}");
            }
        }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        // Resizing resets the context state, fill style included
        self.fill = None;
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_rect(&mut self, x: f64, y: f64, size: f64, color: Color) {
        if self.fill != Some(color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.fill = Some(color);
        }
        self.ctx.fill_rect(x, y, size, size);
    }
}
