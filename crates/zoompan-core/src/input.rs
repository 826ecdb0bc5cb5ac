//! Input events consumed by the view controller.
//!
//! Positions are canvas-local pixels; hosts subtract the canvas's client
//! offset before building these.

use crate::wheel::RawWheel;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// The bare canvas background.
    #[default]
    Canvas,
    /// A drawn element.
    Element,
}

/// Pointer event type for mouse/pen/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        target: PointerTarget,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    Leave {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::Leave { position } => position,
        }
    }
}

/// A wheel event at a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub position: Point,
    #[serde(flatten)]
    pub raw: RawWheel,
}

/// Any event the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Wheel(WheelInput),
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<WheelInput> for InputEvent {
    fn from(event: WheelInput) -> Self {
        InputEvent::Wheel(event)
    }
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the host's default action (scrolling, text selection).
    pub prevent_default: bool,
    /// The view state was modified.
    pub changed: bool,
}

impl EventResponse {
    /// The event was not handled at all.
    pub const IGNORED: Self = Self { prevent_default: false, changed: false };
    /// The event was handled without touching the view.
    pub const CONSUMED: Self = Self { prevent_default: true, changed: false };
    /// The event was handled and the view moved.
    pub const UPDATED: Self = Self { prevent_default: true, changed: true };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::DeltaMode;

    #[test]
    fn test_pointer_position() {
        let event = PointerEvent::Down {
            position: Point::new(3.0, 4.0),
            target: PointerTarget::Element,
        };
        assert_eq!(event.position(), Point::new(3.0, 4.0));
        assert_eq!(PointerEvent::Leave { position: Point::ZERO }.position(), Point::ZERO);
    }

    #[test]
    fn test_deserialize_pointer_event() {
        let event: InputEvent =
            serde_json::from_str(r#"{"type": "down", "position": {"x": 10.0, "y": 20.0}}"#)
                .unwrap();
        assert_eq!(
            event,
            InputEvent::Pointer(PointerEvent::Down {
                position: Point::new(10.0, 20.0),
                target: PointerTarget::Canvas,
            })
        );
    }

    #[test]
    fn test_deserialize_wheel_event() {
        let event: InputEvent = serde_json::from_str(
            r#"{"position": {"x": 1.0, "y": 2.0}, "deltaY": -100.0, "deltaMode": "line"}"#,
        )
        .unwrap();
        let InputEvent::Wheel(wheel) = event else {
            panic!("expected wheel event, got {event:?}");
        };
        assert_eq!(wheel.position, Point::new(1.0, 2.0));
        assert_eq!(wheel.raw.delta_y, Some(-100.0));
        assert_eq!(wheel.raw.delta_mode, DeltaMode::Line);
        assert_eq!(wheel.raw.wheel_delta, None);
    }
}
