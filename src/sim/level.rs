//! Level layout data and simulation construction
//!
//! A level is immutable configuration in design space. Building a
//! `Simulation` scales every coordinate and size exactly once.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scale::{Scale, ScaleMode, Viewport};
use super::state::{Checkpoint, MovingBody, Platform, Simulation};
use crate::consts::*;
use crate::settings::Tuning;

/// Which kind of entity a construction error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Character,
    Platform,
    Checkpoint,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityKind::Character => "character",
            EntityKind::Platform => "platform",
            EntityKind::Checkpoint => "checkpoint",
        })
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("{kind} size must be positive, got {width}x{height}")]
    NonPositiveSize {
        kind: EntityKind,
        width: f32,
        height: f32,
    },
    #[error("{kind} coordinate is not finite")]
    NonFiniteCoordinate { kind: EntityKind },
    #[error("first checkpoint must be level 1, got {0}")]
    FirstLevel(u32),
    #[error("checkpoint levels must strictly increase ({previous} followed by {next})")]
    NonIncreasingLevel { previous: u32, next: u32 },
    #[error("bad level data: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_player_size() -> f32 {
    PLAYER_SIZE
}
fn default_platform_width() -> f32 {
    PLATFORM_WIDTH
}
fn default_platform_height() -> f32 {
    PLATFORM_HEIGHT
}
fn default_checkpoint_width() -> f32 {
    CHECKPOINT_WIDTH
}
fn default_checkpoint_height() -> f32 {
    CHECKPOINT_HEIGHT
}

/// Character spawn point and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_player_size")]
    pub width: f32,
    #[serde(default = "default_player_size")]
    pub height: f32,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_platform_width")]
    pub width: f32,
    #[serde(default = "default_platform_height")]
    pub height: f32,
}

impl PlatformDef {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLATFORM_WIDTH,
            height: PLATFORM_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointDef {
    pub x: f32,
    pub y: f32,
    /// Ordinal shown to the player; 1-based, strictly increasing
    pub level: u32,
    #[serde(default = "default_checkpoint_width")]
    pub width: f32,
    #[serde(default = "default_checkpoint_height")]
    pub height: f32,
}

impl CheckpointDef {
    pub fn at(x: f32, y: f32, level: u32) -> Self {
        Self {
            x,
            y,
            level,
            width: CHECKPOINT_WIDTH,
            height: CHECKPOINT_HEIGHT,
        }
    }
}

/// Ordered level layout in design space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    #[serde(default)]
    pub player: PlayerDef,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointDef>,
}

impl Default for LevelDefinition {
    /// The built-in three-checkpoint course
    fn default() -> Self {
        const PLATFORMS: [(f32, f32); 12] = [
            (500.0, 450.0),
            (700.0, 400.0),
            (850.0, 350.0),
            (900.0, 350.0),
            (1050.0, 150.0),
            (2500.0, 450.0),
            (2900.0, 400.0),
            (3150.0, 350.0),
            (3900.0, 450.0),
            (4200.0, 400.0),
            (4400.0, 200.0),
            (4700.0, 150.0),
        ];
        const CHECKPOINTS: [(f32, f32, u32); 3] =
            [(1170.0, 80.0, 1), (2900.0, 330.0, 2), (4800.0, 80.0, 3)];

        Self {
            player: PlayerDef::default(),
            platforms: PLATFORMS.iter().map(|&(x, y)| PlatformDef::at(x, y)).collect(),
            checkpoints: CHECKPOINTS
                .iter()
                .map(|&(x, y, level)| CheckpointDef::at(x, y, level))
                .collect(),
        }
    }
}

impl LevelDefinition {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Check checkpoint ordinals: first is 1, each strictly greater than the last
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut previous: Option<u32> = None;
        for checkpoint in &self.checkpoints {
            match previous {
                None if checkpoint.level != 1 => {
                    return Err(LevelError::FirstLevel(checkpoint.level));
                }
                Some(prev) if checkpoint.level <= prev => {
                    return Err(LevelError::NonIncreasingLevel {
                        previous: prev,
                        next: checkpoint.level,
                    });
                }
                _ => {}
            }
            previous = Some(checkpoint.level);
        }
        Ok(())
    }
}

impl Simulation {
    /// Build a fresh simulation for `level` at the given viewport.
    ///
    /// An empty platform or checkpoint list is valid; nothing ever collides.
    pub fn from_level(
        level: &LevelDefinition,
        viewport: Viewport,
        mode: ScaleMode,
        tuning: &Tuning,
    ) -> Result<Self, LevelError> {
        level.validate()?;
        let scale = Scale::new(mode, viewport);

        let p = &level.player;
        let player = MovingBody::new(
            scale.point(p.x, p.y),
            scale.apply(p.width),
            scale.apply(p.height),
        )?;

        let platforms = level
            .platforms
            .iter()
            .map(|d| Platform::new(scale.point(d.x, d.y), scale.apply(d.width), scale.apply(d.height)))
            .collect::<Result<Vec<_>, _>>()?;

        let checkpoints = level
            .checkpoints
            .iter()
            .map(|d| {
                Checkpoint::new(
                    scale.point(d.x, d.y),
                    scale.apply(d.width),
                    scale.apply(d.height),
                    d.level,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Level built: {} platforms, {} checkpoints ({:?} at {}x{})",
            platforms.len(),
            checkpoints.len(),
            mode,
            viewport.width,
            viewport.height
        );

        Ok(Simulation::assemble(
            player,
            platforms,
            checkpoints,
            (
                scale.apply(tuning.right_threshold),
                scale.apply(tuning.left_threshold),
            ),
            scale.apply(tuning.jump_impulse),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(level: &LevelDefinition, viewport: Viewport) -> Result<Simulation, LevelError> {
        Simulation::from_level(level, viewport, ScaleMode::Proportional, &Tuning::default())
    }

    #[test]
    fn test_default_level_builds() {
        let sim = build(&LevelDefinition::default(), Viewport::new(1170.0, 600.0)).unwrap();
        assert_eq!(sim.platforms.len(), 12);
        assert_eq!(sim.checkpoints.len(), 3);
        let levels: Vec<u32> = sim.checkpoints.iter().map(|c| c.level()).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert!(sim.scroll_gate_active());
        assert_eq!(sim.right_threshold(), 400.0);
    }

    #[test]
    fn test_short_viewport_scales_once() {
        let sim = build(&LevelDefinition::default(), Viewport::new(800.0, 250.0)).unwrap();
        // 450 / 500 * 250 = 225, 200 -> 100, 40 -> 20
        assert_eq!(sim.platforms[0].position.y, 225.0);
        assert_eq!(sim.platforms[0].width(), 100.0);
        assert_eq!(sim.player.width(), 20.0);
        assert_eq!(sim.right_threshold(), 200.0);
    }

    #[test]
    fn test_level_ordering_validation() {
        let mut level = LevelDefinition::default();
        level.checkpoints[0].level = 2;
        assert!(matches!(level.validate(), Err(LevelError::FirstLevel(2))));

        let mut level = LevelDefinition::default();
        level.checkpoints[2].level = 2;
        assert!(matches!(
            level.validate(),
            Err(LevelError::NonIncreasingLevel {
                previous: 2,
                next: 2
            })
        ));
    }

    #[test]
    fn test_empty_level_is_valid() {
        let level = LevelDefinition {
            player: PlayerDef::default(),
            platforms: Vec::new(),
            checkpoints: Vec::new(),
        };
        let sim = build(&level, Viewport::new(1170.0, 600.0)).unwrap();
        assert!(sim.platforms.is_empty());
        assert!(sim.checkpoints.is_empty());
    }

    #[test]
    fn test_zero_height_viewport_rejected() {
        // Every scaled size collapses to zero
        let err = build(&LevelDefinition::default(), Viewport::new(800.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            LevelError::NonPositiveSize {
                kind: EntityKind::Character,
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{
            "platforms": [{"x": 100, "y": 300}],
            "checkpoints": [{"x": 600, "y": 80, "level": 1}, {"x": 900, "y": 80, "level": 4}]
        }"#;
        let level = LevelDefinition::from_json(json).unwrap();
        assert_eq!(level.player, PlayerDef::default());
        assert_eq!(level.platforms[0], PlatformDef::at(100.0, 300.0));
        assert_eq!(level.checkpoints[1].height, CHECKPOINT_HEIGHT);

        let bad = r#"{"checkpoints": [{"x": 1, "y": 1, "level": 3}, {"x": 2, "y": 1, "level": 1}]}"#;
        assert!(matches!(
            LevelDefinition::from_json(bad),
            Err(LevelError::FirstLevel(3))
        ));
        assert!(matches!(
            LevelDefinition::from_json("{"),
            Err(LevelError::Parse(_))
        ));
    }
}
