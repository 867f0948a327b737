//! Milestone banner with cancellable auto-dismiss
//!
//! The host owns the actual timer. `Banner::announce` hands back a
//! `HideRequest` naming a ticket; when the host's one-shot timer fires it
//! calls `Banner::dismiss` with that ticket. A newer announcement
//! supersedes the older ticket, so a stale timer cannot hide a fresh
//! message.

use crate::sim::GameEvent;

/// Message surface provided by the host
pub trait MessageDisplay {
    fn show(&mut self, text: &str);
    fn hide(&mut self);
}

/// Identifies one scheduled hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HideTicket(u64);

/// Ask the host to call `Banner::dismiss(ticket)` after `delay_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideRequest {
    pub ticket: HideTicket,
    pub delay_ms: u32,
    /// Earlier hide this one replaces; the host may cancel its timer
    pub supersedes: Option<HideTicket>,
}

#[derive(Debug, Clone)]
pub struct Banner {
    delay_ms: u32,
    serial: u64,
    pending: Option<HideTicket>,
    visible: bool,
}

impl Banner {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            serial: 0,
            pending: None,
            visible: false,
        }
    }

    /// Show a milestone. Non-final milestones request an auto-dismiss; the
    /// final one stays up.
    pub fn announce(
        &mut self,
        display: &mut dyn MessageDisplay,
        event: &GameEvent,
    ) -> Option<HideRequest> {
        display.show(&event.message());
        self.visible = true;

        let supersedes = self.pending.take();
        if event.is_final() {
            return None;
        }

        self.serial += 1;
        let ticket = HideTicket(self.serial);
        self.pending = Some(ticket);
        Some(HideRequest {
            ticket,
            delay_ms: self.delay_ms,
            supersedes,
        })
    }

    /// Hide the banner if `ticket` is still the current pending hide.
    ///
    /// Returns whether anything was hidden.
    pub fn dismiss(&mut self, display: &mut dyn MessageDisplay, ticket: HideTicket) -> bool {
        if self.pending != Some(ticket) {
            log::debug!("Ignoring stale hide {:?}", ticket);
            return false;
        }
        self.pending = None;
        self.visible = false;
        display.hide();
        true
    }

    /// Clear any message and forget pending hides
    pub fn reset(&mut self, display: &mut dyn MessageDisplay) {
        self.pending = None;
        if self.visible {
            self.visible = false;
            display.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeDisplay {
        shown: Vec<String>,
        visible: bool,
        hides: u32,
    }

    impl MessageDisplay for FakeDisplay {
        fn show(&mut self, text: &str) {
            self.shown.push(text.to_owned());
            self.visible = true;
        }

        fn hide(&mut self) {
            self.visible = false;
            self.hides += 1;
        }
    }

    #[test]
    fn test_checkpoint_auto_dismisses() {
        let mut display = FakeDisplay::default();
        let mut banner = Banner::new(2000);

        let request = banner
            .announce(&mut display, &GameEvent::CheckpointReached { level: 1 })
            .unwrap();
        assert_eq!(request.delay_ms, 2000);
        assert_eq!(request.supersedes, None);
        assert_eq!(display.shown, vec!["You reached a checkpoint! Level: 1"]);

        assert!(banner.dismiss(&mut display, request.ticket));
        assert!(!display.visible);
        assert!(!banner.visible);
    }

    #[test]
    fn test_new_milestone_cancels_pending_hide() {
        let mut display = FakeDisplay::default();
        let mut banner = Banner::new(2000);

        let first = banner
            .announce(&mut display, &GameEvent::CheckpointReached { level: 1 })
            .unwrap();
        let second = banner
            .announce(&mut display, &GameEvent::CheckpointReached { level: 2 })
            .unwrap();
        assert_eq!(second.supersedes, Some(first.ticket));

        // The first timer fires late and must not hide the second message
        assert!(!banner.dismiss(&mut display, first.ticket));
        assert!(display.visible);
        assert!(banner.dismiss(&mut display, second.ticket));
        assert_eq!(display.hides, 1);
    }

    #[test]
    fn test_final_milestone_persists() {
        let mut display = FakeDisplay::default();
        let mut banner = Banner::new(2000);

        let earlier = banner
            .announce(&mut display, &GameEvent::CheckpointReached { level: 2 })
            .unwrap();
        let request = banner.announce(&mut display, &GameEvent::FinalCheckpointReached { level: 3 });
        assert!(request.is_none());
        assert_eq!(
            display.shown.last().map(String::as_str),
            Some("You reached the final checkpoint! Level: 3")
        );

        // The earlier checkpoint's timer no longer applies
        assert!(!banner.dismiss(&mut display, earlier.ticket));
        assert!(display.visible);
        assert!(banner.pending.is_none());
    }
}
