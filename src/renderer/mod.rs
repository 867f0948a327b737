//! Rectangle rendering collaborator
//!
//! The simulation only ever clears the viewport and fills axis-aligned
//! rectangles. Hosts implement `Renderer`; `DrawList` records commands for
//! headless runs and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::sim::{Entity, Simulation, Viewport};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#99c9ff`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Entity palette
pub mod palette {
    use super::Color;

    pub const PLAYER: Color = Color::rgb(0x99, 0xc9, 0xff);
    pub const PLATFORM: Color = Color::rgb(0xac, 0xd1, 0x57);
    pub const CHECKPOINT: Color = Color::rgb(0xf1, 0xbe, 0x32);
}

/// Drawing surface the simulation renders into
pub trait Renderer {
    fn clear(&mut self, viewport: Viewport);
    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Color);
}

/// Draw one frame: clear, platforms, checkpoints, then the character
pub fn render_frame(renderer: &mut dyn Renderer, sim: &Simulation, viewport: Viewport) {
    renderer.clear(viewport);
    for platform in &sim.platforms {
        platform.draw(renderer);
    }
    for checkpoint in &sim.checkpoints {
        checkpoint.draw(renderer);
    }
    sim.player.draw(renderer);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Viewport),
    FillRect { position: Vec2, size: Vec2, color: Color },
}

/// Renderer that records commands instead of drawing
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filled rectangles since the last clear
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }
}

impl Renderer for DrawList {
    fn clear(&mut self, viewport: Viewport) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            position,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::LevelDefinition;

    #[test]
    fn test_color_css() {
        assert_eq!(palette::PLAYER.to_css(), "#99c9ff");
        assert_eq!(palette::PLATFORM.to_css(), "#acd157");
        assert_eq!(palette::CHECKPOINT.to_css(), "#f1be32");
    }

    #[test]
    fn test_render_frame_order() {
        let viewport = Viewport::new(1170.0, 600.0);
        let settings = Settings::default();
        let sim = Simulation::from_level(
            &LevelDefinition::default(),
            viewport,
            settings.scale_mode,
            &settings.tuning,
        )
        .unwrap();

        let mut list = DrawList::new();
        render_frame(&mut list, &sim, viewport);

        assert_eq!(list.commands[0], DrawCommand::Clear(viewport));
        assert_eq!(list.rect_count(), 12 + 3 + 1);

        // Character is drawn last, on top of everything
        match list.commands.last() {
            Some(DrawCommand::FillRect { color, .. }) => assert_eq!(*color, palette::PLAYER),
            other => panic!("unexpected last command: {:?}", other),
        }
    }
}
