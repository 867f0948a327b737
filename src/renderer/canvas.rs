//! Canvas 2D renderer (browser only)

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{Color, Renderer};
use crate::sim::Viewport;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self, viewport: Viewport) {
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            position.x as f64,
            position.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }
}
