//! Host input events.
//!
//! The windowing layer translates its native events into [`Event`] and hands
//! them to the [`Gui`](crate::container::Gui), which routes them to widgets.

use crate::primitives::Point;

/// Mouse button types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Scroll delta types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDelta {
    /// Scroll by lines (discrete, e.g., mouse wheel notches).
    Lines { x: f32, y: f32 },

    /// Scroll by pixels (smooth, e.g., trackpad).
    Pixels { x: f32, y: f32 },
}

impl ScrollDelta {
    /// Vertical wheel notches, positive when scrolling towards the start.
    ///
    /// Pixel deltas are converted using `line_height`.
    pub fn notches(&self, line_height: f32) -> i32 {
        match *self {
            ScrollDelta::Lines { y, .. } => y.round() as i32,
            ScrollDelta::Pixels { y, .. } if line_height > 0.0 => (y / line_height).round() as i32,
            ScrollDelta::Pixels { .. } => 0,
        }
    }
}

/// Keys the widgets care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}

/// An input event in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MousePressed { button: MouseButton, position: Point },
    MouseReleased { button: MouseButton, position: Point },
    MouseMoved { position: Point },
    WheelScrolled { delta: ScrollDelta, position: Point },
    KeyPressed(Key),
    /// The window lost focus; every press/drag in progress is abandoned.
    FocusLost,
}

impl Event {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Event::MousePressed { position, .. }
            | Event::MouseReleased { position, .. }
            | Event::MouseMoved { position }
            | Event::WheelScrolled { position, .. } => Some(*position),
            Event::KeyPressed(_) | Event::FocusLost => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notches_from_lines_and_pixels() {
        assert_eq!(ScrollDelta::Lines { x: 0.0, y: -2.0 }.notches(24.0), -2);
        assert_eq!(ScrollDelta::Pixels { x: 0.0, y: 48.0 }.notches(24.0), 2);
        assert_eq!(ScrollDelta::Pixels { x: 0.0, y: 48.0 }.notches(0.0), 0);
    }

    #[test]
    fn position_of_pointer_events_only() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(Event::MouseMoved { position: p }.position(), Some(p));
        assert_eq!(Event::FocusLost.position(), None);
    }
}
