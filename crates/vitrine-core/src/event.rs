//! Input events and the handler seam that consumes them.

use crate::Point;
use serde::{Deserialize, Serialize};

/// Input event delivered to interactive components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of click
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Mouse left the surface
    MouseLeave,
    /// Mouse wheel scrolled
    Scroll {
        /// Horizontal scroll delta
        delta_x: f32,
        /// Vertical scroll delta
        delta_y: f32,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Surface resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button
    Left,
    /// Wheel button
    Middle,
    /// Secondary button
    Right,
    /// Any other button
    Other(u16),
}

/// Keys the showcase reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Letter R
    R,
    /// Anything else
    Other,
}

/// Component that consumes input events.
///
/// Returns `true` when the event changed state that the next frame must show.
pub trait InputHandler {
    /// Handle one event.
    fn handle_event(&mut self, event: &Event) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mouse_button() {
        let e = Event::MouseDown {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Left,
        };
        if let Event::MouseDown { button, .. } = e {
            assert_eq!(button, MouseButton::Left);
        } else {
            panic!("Expected MouseDown event");
        }
    }

    #[test]
    fn test_event_scroll() {
        let e = Event::Scroll {
            delta_x: 0.0,
            delta_y: -10.0,
        };
        if let Event::Scroll { delta_y, .. } = e {
            assert_eq!(delta_y, -10.0);
        } else {
            panic!("Expected Scroll event");
        }
    }

    #[test]
    fn test_event_json_roundtrip() {
        let e = Event::KeyDown { key: Key::Space };
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(serde_json::from_str::<Event>(&json).unwrap(), e);
    }
}
