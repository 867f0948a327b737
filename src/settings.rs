//! Game settings and tuning
//!
//! Persisted in LocalStorage. Tuning values are design-space numbers;
//! lengths among them are scaled with the level when it is built.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ScaleMode;

/// Physics and control-band tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per frame
    pub gravity: f32,
    /// Character speed inside the free-movement band
    pub move_speed: f32,
    /// World translation per frame while the character is pinned
    pub scroll_speed: f32,
    /// Upward impulse per jump press (scaled)
    pub jump_impulse: f32,
    /// Right edge of the free-movement band (scaled)
    pub right_threshold: f32,
    /// Left edge of the free-movement band (scaled)
    pub left_threshold: f32,
    /// Width of the window past a checkpoint in which a claim is announced
    pub announce_window: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            scroll_speed: SCROLL_SPEED,
            jump_impulse: JUMP_IMPULSE,
            right_threshold: RIGHT_SCROLL_THRESHOLD,
            left_threshold: LEFT_SCROLL_THRESHOLD,
            announce_window: ANNOUNCE_WINDOW,
        }
    }
}

impl Tuning {
    /// All values finite and non-negative
    pub fn is_valid(&self) -> bool {
        [
            self.gravity,
            self.move_speed,
            self.scroll_speed,
            self.jump_impulse,
            self.right_threshold,
            self.left_threshold,
            self.announce_window,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    /// How design coordinates map onto the viewport
    pub scale_mode: ScaleMode,

    // === Presentation ===
    /// Auto-dismiss delay for non-final milestone messages
    pub message_delay_ms: u32,
    /// Show on-screen touch buttons when the window is at most this wide
    pub touch_controls_max_width: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            scale_mode: ScaleMode::Proportional,
            message_delay_ms: MESSAGE_DELAY_MS,
            touch_controls_max_width: 768.0,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ledge_runner_settings";

    /// Parse settings, falling back to defaults for out-of-range tuning
    /// or scale mode
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if !settings.tuning.is_valid() {
            log::warn!("Stored tuning is out of range, using defaults");
            settings.tuning = Tuning::default();
        }
        if !settings.scale_mode.is_valid() {
            log::warn!("Stored scale mode is out of range, using proportional");
            settings.scale_mode = ScaleMode::Proportional;
        }
        Ok(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds have no storage and run on defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
