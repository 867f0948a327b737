//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame, no wall-clock reads
//! - Stable iteration order (level definition order)
//! - No platform dependencies; drawing goes through the `Renderer` trait

pub mod collision;
pub mod entity;
pub mod input;
pub mod level;
pub mod scale;
pub mod state;
pub mod tick;

pub use collision::{PlatformContact, checkpoint_reached, resolve_platform};
pub use entity::{Entity, StepContext};
pub use input::{Direction, InputEvent, InputState};
pub use level::{CheckpointDef, EntityKind, LevelDefinition, LevelError, PlatformDef, PlayerDef};
pub use scale::{Scale, ScaleMode, Viewport, proportional_size};
pub use state::{Checkpoint, CheckpointStatus, GameEvent, MovingBody, Platform, Simulation, Vector2};
pub use tick::tick;
