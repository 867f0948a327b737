//! Design-space to viewport-space scaling
//!
//! Every design coordinate or size is transformed exactly once, when the
//! level is built. The chosen `Scale` is captured at that moment, and the
//! derived thresholds and jump impulse go through the same one.

use serde::{Deserialize, Serialize};

use crate::consts::{REFERENCE_HEIGHT, REFERENCE_WIDTH};

/// Current drawable area in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Shrink a design size for short viewports.
///
/// Viewports at least `REFERENCE_HEIGHT` tall use design sizes as-is;
/// shorter ones scale proportionally, rounded up to whole pixels.
#[inline]
pub fn proportional_size(size: f32, viewport_height: f32) -> f32 {
    if viewport_height < REFERENCE_HEIGHT {
        (size / REFERENCE_HEIGHT * viewport_height).ceil()
    } else {
        size
    }
}

/// Which scaling convention a level is built with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaleMode {
    /// Height-driven shrink via `proportional_size`
    #[default]
    Proportional,
    /// Uniform multiplier `viewport.width / reference_width`
    Uniform { reference_width: f32 },
}

impl ScaleMode {
    pub fn uniform() -> Self {
        ScaleMode::Uniform {
            reference_width: REFERENCE_WIDTH,
        }
    }

    /// Uniform scaling needs a finite, positive reference width
    pub fn is_valid(&self) -> bool {
        match *self {
            ScaleMode::Proportional => true,
            ScaleMode::Uniform { reference_width } => {
                reference_width.is_finite() && reference_width > 0.0
            }
        }
    }
}

/// A scaling convention bound to the viewport it was created for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    mode: ScaleMode,
    viewport: Viewport,
}

impl Scale {
    pub fn new(mode: ScaleMode, viewport: Viewport) -> Self {
        Self { mode, viewport }
    }

    /// Transform a single design-space length
    pub fn apply(&self, size: f32) -> f32 {
        match self.mode {
            ScaleMode::Proportional => proportional_size(size, self.viewport.height),
            ScaleMode::Uniform { reference_width } => {
                size * self.viewport.width / reference_width
            }
        }
    }

    /// Transform a design-space point
    pub fn point(&self, x: f32, y: f32) -> glam::Vec2 {
        glam::Vec2::new(self.apply(x), self.apply(y))
    }
}
