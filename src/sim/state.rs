//! Simulation state and entity types
//!
//! The `Simulation` is the single owner of every entity. Platforms and
//! checkpoints are plain ordered vectors in level-definition order.

use glam::Vec2;

use super::entity::{Entity, StepContext};
use super::input::InputEvent;
use super::level::{EntityKind, LevelError};
use super::scale::Viewport;
use crate::renderer::{Color, palette};

/// Position/velocity vector in viewport units
pub type Vector2 = Vec2;

fn check_extent(kind: EntityKind, width: f32, height: f32) -> Result<(), LevelError> {
    // NaN fails both comparisons
    if !(width > 0.0 && height > 0.0) {
        return Err(LevelError::NonPositiveSize {
            kind,
            width,
            height,
        });
    }
    Ok(())
}

fn check_finite(kind: EntityKind, position: Vec2) -> Result<(), LevelError> {
    if !position.is_finite() {
        return Err(LevelError::NonFiniteCoordinate { kind });
    }
    Ok(())
}

/// The controllable character
#[derive(Debug, Clone, PartialEq)]
pub struct MovingBody {
    pub position: Vector2,
    pub velocity: Vector2,
    width: f32,
    height: f32,
}

impl MovingBody {
    pub fn new(position: Vector2, width: f32, height: f32) -> Result<Self, LevelError> {
        check_extent(EntityKind::Character, width, height)?;
        check_finite(EntityKind::Character, position)?;
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Integrate velocity, apply gravity, and contain the body in the viewport
    pub fn integrate(&mut self, viewport: Viewport, gravity: f32) {
        self.position += self.velocity;

        if self.position.y + self.height + self.velocity.y <= viewport.height {
            // Bumped the ceiling: pin to it and restart the fall
            if self.position.y < 0.0 {
                self.position.y = 0.0;
                self.velocity.y = gravity;
            }
            self.velocity.y += gravity;
        } else {
            self.velocity.y = 0.0;
        }

        if self.position.x < self.width {
            self.position.x = self.width;
        }
        let right_bound = viewport.width - self.width * 2.0;
        if self.position.x >= right_bound {
            self.position.x = right_bound;
        }
    }
}

impl Entity for MovingBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn color(&self) -> Color {
        palette::PLAYER
    }

    fn update(&mut self, ctx: &StepContext<'_>) {
        self.integrate(ctx.viewport, ctx.tuning.gravity);
    }
}

/// A static platform the character can stand on
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub position: Vector2,
    width: f32,
    height: f32,
}

impl Platform {
    pub fn new(position: Vector2, width: f32, height: f32) -> Result<Self, LevelError> {
        check_extent(EntityKind::Platform, width, height)?;
        check_finite(EntityKind::Platform, position)?;
        Ok(Self {
            position,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Entity for Platform {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn color(&self) -> Color {
        palette::PLATFORM
    }
}

/// Checkpoint lifecycle. `Claimed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckpointStatus {
    #[default]
    Unclaimed,
    Claimed,
}

/// A progress marker claimed by touching it in level order
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub position: Vector2,
    width: f32,
    height: f32,
    status: CheckpointStatus,
    level: u32,
}

impl Checkpoint {
    pub fn new(position: Vector2, width: f32, height: f32, level: u32) -> Result<Self, LevelError> {
        check_extent(EntityKind::Checkpoint, width, height)?;
        check_finite(EntityKind::Checkpoint, position)?;
        Ok(Self {
            position,
            width,
            height,
            status: CheckpointStatus::Unclaimed,
            level,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> CheckpointStatus {
        self.status
    }

    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.status == CheckpointStatus::Claimed
    }

    /// Make the checkpoint inert: zero-size and parked at y = +inf.
    ///
    /// Every overlap test against a claimed checkpoint is false from here on.
    pub fn claim(&mut self) {
        self.width = 0.0;
        self.height = 0.0;
        self.position.y = f32::INFINITY;
        self.status = CheckpointStatus::Claimed;
    }
}

impl Entity for Checkpoint {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn color(&self) -> Color {
        palette::CHECKPOINT
    }
}

/// Milestone emitted by a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A non-final checkpoint was claimed while the character was in its
    /// announce window
    CheckpointReached { level: u32 },
    /// The last checkpoint was claimed; the scroll gate is now closed
    FinalCheckpointReached { level: u32 },
}

impl GameEvent {
    pub fn level(&self) -> u32 {
        match *self {
            GameEvent::CheckpointReached { level } | GameEvent::FinalCheckpointReached { level } => {
                level
            }
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, GameEvent::FinalCheckpointReached { .. })
    }

    /// Player-facing text
    pub fn message(&self) -> String {
        let headline = match self {
            GameEvent::CheckpointReached { .. } => "You reached a checkpoint!",
            GameEvent::FinalCheckpointReached { .. } => "You reached the final checkpoint!",
        };
        format!("{} Level: {}", headline, self.level())
    }
}

/// Complete simulation context, owned by the frame driver
#[derive(Debug, Clone)]
pub struct Simulation {
    pub player: MovingBody,
    /// Level-definition order
    pub platforms: Vec<Platform>,
    /// Level-definition order, levels strictly increasing
    pub checkpoints: Vec<Checkpoint>,
    pub input: super::input::InputState,
    /// Steps executed since construction
    pub frame: u64,
    /// Scaled x past which the world scrolls instead of the character
    right_threshold: f32,
    /// Scaled x before which the world scrolls instead of the character
    left_threshold: f32,
    /// Scaled upward impulse per jump press
    jump_impulse: f32,
    scroll_gate: bool,
    halt_requested: bool,
}

impl Simulation {
    pub(crate) fn assemble(
        player: MovingBody,
        platforms: Vec<Platform>,
        checkpoints: Vec<Checkpoint>,
        thresholds: (f32, f32),
        jump_impulse: f32,
    ) -> Self {
        Self {
            player,
            platforms,
            checkpoints,
            input: Default::default(),
            frame: 0,
            right_threshold: thresholds.0,
            left_threshold: thresholds.1,
            jump_impulse,
            scroll_gate: true,
            halt_requested: false,
        }
    }

    pub fn right_threshold(&self) -> f32 {
        self.right_threshold
    }

    pub fn left_threshold(&self) -> f32 {
        self.left_threshold
    }

    pub fn jump_impulse(&self) -> f32 {
        self.jump_impulse
    }

    /// Whether world scroll and checkpoint claims are still live
    #[inline]
    pub fn scroll_gate_active(&self) -> bool {
        self.scroll_gate
    }

    /// Permanently disable scroll/claim coupling
    pub(crate) fn close_scroll_gate(&mut self) {
        if self.scroll_gate {
            log::debug!("Scroll gate closed at frame {}", self.frame);
        }
        self.scroll_gate = false;
    }

    /// Zero the character's velocity at the next step
    pub(crate) fn request_halt(&mut self) {
        self.halt_requested = true;
    }

    pub(crate) fn take_halt(&mut self) -> bool {
        std::mem::take(&mut self.halt_requested)
    }

    /// Record a host input event.
    ///
    /// Once the gate has closed, input no longer changes the held state and
    /// only brings the character to a stop.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.scroll_gate {
            self.request_halt();
            return;
        }
        self.input.apply(event);
    }

    /// Translate every platform and checkpoint horizontally
    pub(crate) fn scroll_world(&mut self, dx: f32) {
        for platform in &mut self.platforms {
            platform.position.x += dx;
        }
        for checkpoint in &mut self.checkpoints {
            checkpoint.position.x += dx;
        }
    }

    /// Number of claimed checkpoints
    pub fn claimed_count(&self) -> usize {
        self.checkpoints.iter().filter(|c| c.is_claimed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Direction;

    const VIEW: Viewport = Viewport {
        width: 1170.0,
        height: 600.0,
    };

    #[test]
    fn test_rejects_degenerate_sizes() {
        assert!(matches!(
            MovingBody::new(Vec2::ZERO, 0.0, 40.0),
            Err(LevelError::NonPositiveSize {
                kind: EntityKind::Character,
                ..
            })
        ));
        assert!(Platform::new(Vec2::ZERO, 200.0, -1.0).is_err());
        assert!(Checkpoint::new(Vec2::ZERO, f32::NAN, 70.0, 1).is_err());
        assert!(matches!(
            Platform::new(Vec2::new(f32::INFINITY, 0.0), 200.0, 40.0),
            Err(LevelError::NonFiniteCoordinate {
                kind: EntityKind::Platform
            })
        ));
    }

    #[test]
    fn test_scenario_a_first_frame_gravity() {
        let mut body = MovingBody::new(Vec2::new(10.0, 400.0), 40.0, 40.0).unwrap();
        body.integrate(VIEW, 0.5);

        // No velocity yet, so y is unchanged; gravity accumulates
        assert_eq!(body.position.y, 400.0);
        assert_eq!(body.velocity.y, 0.5);
        // x = 10 is inside the left margin, pushed out to the body width
        assert_eq!(body.position.x, 40.0);

        body.integrate(VIEW, 0.5);
        assert_eq!(body.position.y, 400.5);
        assert_eq!(body.velocity.y, 1.0);
    }

    #[test]
    fn test_floor_stops_fall() {
        let mut body = MovingBody::new(Vec2::new(100.0, 555.0), 40.0, 40.0).unwrap();
        body.velocity.y = 10.0;
        body.integrate(VIEW, 0.5);
        // 565 + 40 + 10 > 600
        assert_eq!(body.position.y, 565.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_ceiling_resets_fall() {
        let mut body = MovingBody::new(Vec2::new(100.0, 5.0), 40.0, 40.0).unwrap();
        body.velocity.y = -12.0;
        body.integrate(VIEW, 0.5);
        assert_eq!(body.position.y, 0.0);
        assert_eq!(body.velocity.y, 1.0);
    }

    #[test]
    fn test_right_edge_clamp() {
        let mut body = MovingBody::new(Vec2::new(1085.0, 100.0), 40.0, 40.0).unwrap();
        body.velocity.x = 20.0;
        body.integrate(VIEW, 0.5);
        assert_eq!(body.position.x, 1170.0 - 80.0);
    }

    #[test]
    fn test_claim_is_inert() {
        let mut cp = Checkpoint::new(Vec2::new(500.0, 80.0), 40.0, 70.0, 1).unwrap();
        assert_eq!(cp.status(), CheckpointStatus::Unclaimed);
        cp.claim();
        assert!(cp.is_claimed());
        assert_eq!(cp.size(), Vec2::ZERO);
        assert_eq!(cp.position.y, f32::INFINITY);
        assert_eq!(cp.level(), 1);
    }

    #[test]
    fn test_event_messages() {
        assert_eq!(
            GameEvent::CheckpointReached { level: 2 }.message(),
            "You reached a checkpoint! Level: 2"
        );
        assert_eq!(
            GameEvent::FinalCheckpointReached { level: 3 }.message(),
            "You reached the final checkpoint! Level: 3"
        );
    }

    #[test]
    fn test_input_ignored_after_gate_closes() {
        let player = MovingBody::new(Vec2::new(100.0, 100.0), 40.0, 40.0).unwrap();
        let mut sim = Simulation::assemble(
            player,
            Vec::new(),
            Vec::new(),
            (400.0, 100.0),
            8.0,
        );
        sim.handle_input(InputEvent::Press(Direction::Right));
        assert!(sim.input.move_right);

        sim.close_scroll_gate();
        sim.handle_input(InputEvent::Release(Direction::Right));
        assert!(sim.input.move_right);
        assert!(sim.take_halt());
        assert!(!sim.take_halt());
    }
}
