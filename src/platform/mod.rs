//! Platform abstraction layer
//!
//! Translates host input into simulation `InputEvent`s:
//! - Keyboard key names (`KeyboardEvent.key`)
//! - On-screen touch buttons

use crate::sim::{Direction, InputEvent};

/// Map a keyboard key name to a direction
pub fn key_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        "ArrowUp" | " " | "Spacebar" => Some(Direction::Up),
        _ => None,
    }
}

/// Translate a key down/up into an input event
///
/// Releasing a jump key means nothing, so it yields `None`.
pub fn key_event(key: &str, pressed: bool) -> Option<InputEvent> {
    let direction = key_direction(key)?;
    match (direction, pressed) {
        (d, true) => Some(InputEvent::Press(d)),
        (Direction::Up, false) => None,
        (d, false) => Some(InputEvent::Release(d)),
    }
}

/// On-screen touch controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Jump,
    Right,
}

impl TouchButton {
    pub const ALL: [TouchButton; 3] = [TouchButton::Left, TouchButton::Jump, TouchButton::Right];

    /// DOM element id
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchButton::Left => "left-btn",
            TouchButton::Jump => "jump-btn",
            TouchButton::Right => "right-btn",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TouchButton::Left => "Left",
            TouchButton::Jump => "Jump",
            TouchButton::Right => "Right",
        }
    }

    fn direction(&self) -> Direction {
        match self {
            TouchButton::Left => Direction::Left,
            TouchButton::Jump => Direction::Up,
            TouchButton::Right => Direction::Right,
        }
    }

    pub fn press(&self) -> InputEvent {
        InputEvent::Press(self.direction())
    }

    /// `None` for the jump button (it has no held state)
    pub fn release(&self) -> Option<InputEvent> {
        match self {
            TouchButton::Jump => None,
            other => Some(InputEvent::Release(other.direction())),
        }
    }
}

/// Markup for the touch control strip
pub fn touch_controls_html() -> String {
    let buttons: String = TouchButton::ALL
        .iter()
        .map(|b| format!(r#"<button id="{}">{}</button>"#, b.element_id(), b.label()))
        .collect();
    format!(r#"<div class="controls">{}</div>"#, buttons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            key_event("ArrowLeft", true),
            Some(InputEvent::Press(Direction::Left))
        );
        assert_eq!(
            key_event("ArrowRight", false),
            Some(InputEvent::Release(Direction::Right))
        );
        assert_eq!(key_event(" ", true), Some(InputEvent::Press(Direction::Up)));
        assert_eq!(key_event("Spacebar", true), Some(InputEvent::Press(Direction::Up)));
        assert_eq!(key_event("ArrowUp", false), None);
        assert_eq!(key_event("a", true), None);
    }

    #[test]
    fn test_touch_buttons() {
        assert_eq!(TouchButton::Right.press(), InputEvent::Press(Direction::Right));
        assert_eq!(
            TouchButton::Left.release(),
            Some(InputEvent::Release(Direction::Left))
        );
        assert_eq!(TouchButton::Jump.release(), None);

        let html = touch_controls_html();
        assert!(html.starts_with(r#"<div class="controls">"#));
        for b in TouchButton::ALL {
            assert!(html.contains(b.element_id()));
        }
    }
}
