//! Ledge Runner - a side-scrolling checkpoint platformer
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (body physics, platforms, checkpoints)
//! - `renderer`: Rectangle drawing collaborator
//! - `platform`: Host key/touch translation into input events
//! - `ui`: Milestone messages with cancellable auto-dismiss
//! - `runtime`: Frame driver invoked once per display refresh
//! - `settings`: Persisted tuning and presentation preferences

pub mod platform;
pub mod renderer;
pub mod runtime;
pub mod settings;
pub mod sim;
pub mod ui;

pub use runtime::FrameDriver;
pub use settings::{Settings, Tuning};

/// Design-space constants
///
/// All lengths are design units; velocities are units per frame.
pub mod consts {
    /// Downward acceleration applied every airborne frame
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal character speed while inside the free-movement band
    pub const MOVE_SPEED: f32 = 5.0;
    /// World translation per frame once the character is pinned
    pub const SCROLL_SPEED: f32 = 5.0;
    /// Upward impulse per jump press (scaled with the level)
    pub const JUMP_IMPULSE: f32 = 8.0;

    /// Character stops moving right (and the world scrolls) past this x
    pub const RIGHT_SCROLL_THRESHOLD: f32 = 400.0;
    /// Character stops moving left (and the world scrolls) before this x
    pub const LEFT_SCROLL_THRESHOLD: f32 = 100.0;

    /// Viewport height below which design sizes shrink proportionally
    pub const REFERENCE_HEIGHT: f32 = 500.0;
    /// Layout width the uniform scale factor is measured against
    pub const REFERENCE_WIDTH: f32 = 1170.0;

    /// Horizontal window past a checkpoint in which a claim is announced
    pub const ANNOUNCE_WINDOW: f32 = 40.0;
    /// Auto-dismiss delay for non-final milestone messages
    pub const MESSAGE_DELAY_MS: u32 = 2000;

    /// Character defaults
    pub const PLAYER_START_X: f32 = 10.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 40.0;

    /// Checkpoint defaults
    pub const CHECKPOINT_WIDTH: f32 = 40.0;
    pub const CHECKPOINT_HEIGHT: f32 = 70.0;
}
