//! Browser event handling - converts DOM events to core `Event`s.

use vitrine_core::{Event, Key, MouseButton, Point};
use web_sys::{KeyboardEvent, MouseEvent, WheelEvent};

/// Convert a `MouseEvent` of the given DOM type to an [`Event`].
///
/// Unrecognized types are treated as a move.
pub fn mouse_event_to_vitrine(event: &MouseEvent, event_type: &str) -> Event {
    let position = Point::new(event.offset_x() as f32, event.offset_y() as f32);
    let button = match event.button() {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        other => MouseButton::Other(other.max(0) as u16),
    };

    match event_type {
        "mousedown" => Event::MouseDown { position, button },
        "mouseup" => Event::MouseUp { position, button },
        "mouseleave" => Event::MouseLeave,
        _ => Event::MouseMove { position },
    }
}

/// Convert a `WheelEvent` to a scroll.
pub fn wheel_event_to_vitrine(event: &WheelEvent) -> Event {
    Event::Scroll {
        delta_x: event.delta_x() as f32,
        delta_y: event.delta_y() as f32,
    }
}

/// Convert a `KeyboardEvent` to a key press.
pub fn keyboard_event_to_vitrine(event: &KeyboardEvent) -> Event {
    Event::KeyDown {
        key: code_to_key(&event.code()),
    }
}

fn code_to_key(code: &str) -> Key {
    match code {
        "Space" => Key::Space,
        "Escape" => Key::Escape,
        "KeyR" => Key::R,
        _ => Key::Other,
    }
}
