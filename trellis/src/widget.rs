//! Widget System
//!
//! Every widget implements [`Widget`]: it owns its geometry (position, scale
//! and unscaled pixel size), answers hit-tests, reacts to pointer and key
//! handlers, and draws itself onto a [`DrawSurface`].
//!
//! # Event Handling
//!
//! The owning container decides which widget an event belongs to and calls
//! the matching handler. Handlers that can change what the application sees
//! (a new selection, a pressed button) return a [`WidgetEvent`], which the
//! container queues as a callback.
//!
//! # Rendering
//!
//! `draw` pushes the widget's own transform and clip onto the surface and
//! pops them again before returning, so widgets can be drawn in any order.

use std::any::Any;
use std::fmt;

use crate::event::{Event, Key, MouseButton};
use crate::font::FontHandle;
use crate::loader::WidgetNode;
use crate::primitives::{PixelSize, Point, Rect, Scale, Size};
use crate::property::RendererProperties;
use crate::surface::DrawSurface;

/// Result of handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventResult<M> {
    /// Event was ignored, propagate to parent.
    Ignored,

    /// Event was captured, don't propagate.
    Captured,

    /// Event produced a message for the application.
    Message(M),
}

impl<M> EventResult<M> {
    /// Check if the event was handled (captured or produced a message).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }

    /// Convert to an Option<M>, discarding Ignored and Captured.
    pub fn into_message(self) -> Option<M> {
        match self {
            EventResult::Message(m) => Some(m),
            _ => None,
        }
    }
}

impl<M> From<Option<M>> for EventResult<M> {
    fn from(opt: Option<M>) -> Self {
        match opt {
            Some(m) => EventResult::Message(m),
            None => EventResult::Captured,
        }
    }
}

/// Tagged callback payload raised to the owning container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The selected item changed. `id` is 0 and `text` empty when the
    /// selection was cleared.
    ItemSelected { id: usize, text: String },

    /// A message box button was clicked.
    ButtonPressed { caption: String },
}

/// A retained-mode widget.
///
/// Pointer positions are in window coordinates; each widget maps them into
/// its own local space using its position and scale.
pub trait Widget: RendererProperties + fmt::Debug {
    /// Lower-case type name, as used in widget files.
    fn widget_type(&self) -> &'static str;

    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    fn scale(&self) -> Scale;
    fn set_scale(&mut self, scale: Scale);

    /// Unscaled size in pixels.
    fn size(&self) -> PixelSize;

    /// Size after applying the scale.
    fn scaled_size(&self) -> Size {
        let size = self.size();
        let scale = self.scale();
        Size::new(size.width as f32 * scale.x, size.height as f32 * scale.y)
    }

    /// Screen-space bounding box.
    fn bounds(&self) -> Rect {
        let p = self.position();
        let s = self.scaled_size();
        Rect::new(p.x, p.y, s.width, s.height)
    }

    /// False after a failed load; an unloaded widget ignores input.
    fn is_loaded(&self) -> bool;

    /// Hit-test. May update hover bookkeeping, hence `&mut`.
    fn mouse_on_widget(&mut self, position: Point) -> bool;

    fn left_mouse_pressed(&mut self, position: Point) -> Option<WidgetEvent>;
    fn left_mouse_released(&mut self, position: Point) -> Option<WidgetEvent>;
    fn mouse_moved(&mut self, position: Point);

    /// Wheel moved by `notches` (positive scrolls towards the start).
    fn mouse_wheel_moved(&mut self, _notches: i32, _position: Point) {}

    fn key_pressed(&mut self, _key: &Key) -> EventResult<WidgetEvent> {
        EventResult::Ignored
    }

    /// The pointer left the widget.
    fn mouse_not_on_widget(&mut self);

    /// Abandon any press or drag in progress.
    fn mouse_no_longer_down(&mut self);

    fn set_font(&mut self, font: FontHandle);

    fn draw(&self, surface: &mut dyn DrawSurface);

    /// Deep copy as a new owned widget.
    fn clone_widget(&self) -> Box<dyn Widget>;

    /// Write the widget-specific fields of a widget file node.
    fn save(&self, node: &mut WidgetNode);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Dispatch a raw event to the matching handler.
    ///
    /// The caller has already decided the event targets this widget.
    fn event(&mut self, event: &Event) -> EventResult<WidgetEvent> {
        match event {
            Event::MousePressed {
                button: MouseButton::Left,
                position,
            } => self.left_mouse_pressed(*position).into(),
            Event::MouseReleased {
                button: MouseButton::Left,
                position,
            } => self.left_mouse_released(*position).into(),
            Event::MouseMoved { position } => {
                self.mouse_moved(*position);
                EventResult::Captured
            }
            Event::WheelScrolled { delta, position } => {
                self.mouse_wheel_moved(delta.notches(crate::font::LINE_HEIGHT), *position);
                EventResult::Captured
            }
            Event::KeyPressed(key) => self.key_pressed(key),
            Event::FocusLost => {
                self.mouse_no_longer_down();
                EventResult::Captured
            }
            Event::MousePressed { .. } | Event::MouseReleased { .. } => EventResult::Ignored,
        }
    }
}

/// A boxed widget for dynamic dispatch.
pub type BoxedWidget = Box<dyn Widget>;

/// Extension trait for convenient widget operations.
pub trait WidgetExt: Widget {
    /// Box this widget for dynamic dispatch.
    fn boxed(self) -> BoxedWidget
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<W: Widget> WidgetExt for W {}

impl Clone for Box<dyn Widget> {
    fn clone(&self) -> Self {
        self.clone_widget()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_result_from_option() {
        let r: EventResult<u32> = Some(5).into();
        assert_eq!(r, EventResult::Message(5));
        let r: EventResult<u32> = None.into();
        assert_eq!(r, EventResult::Captured);
        assert!(r.is_handled());
        assert!(!EventResult::<u32>::Ignored.is_handled());
    }

    #[test]
    fn into_message_discards_captured() {
        assert_eq!(EventResult::Message("x").into_message(), Some("x"));
        assert_eq!(EventResult::<&str>::Captured.into_message(), None);
    }
}
