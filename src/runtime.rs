//! Frame driver
//!
//! The host calls `FrameDriver::frame` once per display refresh and never
//! reenters it. Input events may arrive between frames at any time; they
//! only update latched state read by the next frame.

use crate::renderer::{Renderer, render_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, InputEvent, LevelDefinition, LevelError, Simulation, Viewport, tick};
use crate::ui::{Banner, HideRequest, HideTicket, MessageDisplay};

/// What one frame produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub events: Vec<GameEvent>,
    /// Deferred hides the host must schedule, in order
    pub hide_requests: Vec<HideRequest>,
}

pub struct FrameDriver {
    level: LevelDefinition,
    settings: Settings,
    sim: Simulation,
    banner: Banner,
}

impl FrameDriver {
    pub fn new(
        level: LevelDefinition,
        settings: Settings,
        viewport: Viewport,
    ) -> Result<Self, LevelError> {
        let sim = Simulation::from_level(&level, viewport, settings.scale_mode, &settings.tuning)?;
        let banner = Banner::new(settings.message_delay_ms);
        Ok(Self {
            level,
            settings,
            sim,
            banner,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        self.sim.handle_input(event);
    }

    /// Run one simulation step and draw the result
    pub fn frame(
        &mut self,
        viewport: Viewport,
        renderer: &mut dyn Renderer,
        display: &mut dyn MessageDisplay,
    ) -> FrameOutput {
        let events = tick(&mut self.sim, viewport, &self.settings.tuning);
        render_frame(renderer, &self.sim, viewport);

        let hide_requests = events
            .iter()
            .filter_map(|event| self.banner.announce(display, event))
            .collect();

        FrameOutput {
            events,
            hide_requests,
        }
    }

    /// Called by the host when a scheduled hide fires
    pub fn dismiss(&mut self, display: &mut dyn MessageDisplay, ticket: HideTicket) -> bool {
        self.banner.dismiss(display, ticket)
    }

    /// Rebuild every entity at its initial position
    pub fn restart(
        &mut self,
        viewport: Viewport,
        display: &mut dyn MessageDisplay,
    ) -> Result<(), LevelError> {
        self.sim = Simulation::from_level(
            &self.level,
            viewport,
            self.settings.scale_mode,
            &self.settings.tuning,
        )?;
        self.banner.reset(display);
        log::info!("Simulation restarted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::sim::level::{CheckpointDef, PlayerDef};
    use crate::sim::Direction;
    use glam::Vec2;

    #[derive(Default)]
    struct FakeDisplay {
        text: Option<String>,
    }

    impl MessageDisplay for FakeDisplay {
        fn show(&mut self, text: &str) {
            self.text = Some(text.to_owned());
        }

        fn hide(&mut self) {
            self.text = None;
        }
    }

    const VIEW: Viewport = Viewport {
        width: 1170.0,
        height: 600.0,
    };

    fn two_checkpoint_level() -> LevelDefinition {
        LevelDefinition {
            player: PlayerDef::default(),
            platforms: Vec::new(),
            checkpoints: vec![CheckpointDef::at(600.0, 80.0, 1), CheckpointDef::at(700.0, 80.0, 2)],
        }
    }

    fn hover(driver: &mut FrameDriver, x: f32) {
        driver.sim.player.position = Vec2::new(x, 90.0);
        driver.sim.player.velocity = Vec2::new(0.0, -0.5);
    }

    #[test]
    fn test_frame_renders_and_announces() {
        let mut driver =
            FrameDriver::new(two_checkpoint_level(), Settings::default(), VIEW).unwrap();
        let mut list = DrawList::new();
        let mut display = FakeDisplay::default();

        let out = driver.frame(VIEW, &mut list, &mut display);
        assert!(out.events.is_empty());
        assert_eq!(list.rect_count(), 3);

        hover(&mut driver, 610.0);
        let out = driver.frame(VIEW, &mut list, &mut display);
        assert_eq!(out.events, vec![GameEvent::CheckpointReached { level: 1 }]);
        assert_eq!(out.hide_requests.len(), 1);
        assert_eq!(out.hide_requests[0].delay_ms, 2000);
        assert_eq!(display.text.as_deref(), Some("You reached a checkpoint! Level: 1"));

        assert!(driver.dismiss(&mut display, out.hide_requests[0].ticket));
        assert!(display.text.is_none());
    }

    #[test]
    fn test_final_message_stays_and_restart_resets() {
        let mut driver =
            FrameDriver::new(two_checkpoint_level(), Settings::default(), VIEW).unwrap();
        let mut list = DrawList::new();
        let mut display = FakeDisplay::default();

        hover(&mut driver, 610.0);
        let first = driver.frame(VIEW, &mut list, &mut display);
        hover(&mut driver, 710.0);
        let out = driver.frame(VIEW, &mut list, &mut display);
        assert_eq!(out.events, vec![GameEvent::FinalCheckpointReached { level: 2 }]);
        assert!(out.hide_requests.is_empty());

        // Earlier timer fires after the final message went up
        assert!(!driver.dismiss(&mut display, first.hide_requests[0].ticket));
        assert_eq!(
            display.text.as_deref(),
            Some("You reached the final checkpoint! Level: 2")
        );
        assert!(!driver.simulation().scroll_gate_active());

        driver.restart(VIEW, &mut display).unwrap();
        assert!(display.text.is_none());
        assert!(driver.simulation().scroll_gate_active());
        assert_eq!(driver.simulation().claimed_count(), 0);
        assert_eq!(driver.simulation().player.position, Vec2::new(10.0, 400.0));
    }

    #[test]
    fn test_input_between_frames_is_latched() {
        let mut driver =
            FrameDriver::new(LevelDefinition::default(), Settings::default(), VIEW).unwrap();
        let mut list = DrawList::new();
        let mut display = FakeDisplay::default();

        driver.handle_input(InputEvent::Press(Direction::Right));
        driver.handle_input(InputEvent::Release(Direction::Right));
        driver.handle_input(InputEvent::Press(Direction::Right));
        driver.frame(VIEW, &mut list, &mut display);
        assert_eq!(driver.simulation().player.velocity.x, 5.0);
    }
}
