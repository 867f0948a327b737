//! Shared entity capability
//!
//! Character, platforms and checkpoints are a small closed set of concrete
//! types behind one "drawable + frame-steppable" trait.

use glam::Vec2;

use super::scale::Viewport;
use crate::renderer::{Color, Renderer};
use crate::settings::Tuning;

/// Per-frame inputs an entity may read while updating
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    /// Re-read from the host every frame (it may have been resized)
    pub viewport: Viewport,
    pub tuning: &'a Tuning,
}

pub trait Entity {
    /// Upper-left corner
    fn position(&self) -> Vec2;
    fn size(&self) -> Vec2;
    fn color(&self) -> Color;

    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.fill_rect(self.position(), self.size(), self.color());
    }

    /// Advance one frame. Passive entities do nothing.
    fn update(&mut self, _ctx: &StepContext<'_>) {}
}
