//! Scrollbar
//!
//! A scroll position in `[0, maximum - low_value]` with arrow buttons, a
//! track and a draggable thumb. The scrollbar has no position of its own:
//! the owning widget computes its screen-space bounds every time it forwards
//! an event or draws it.
//!
//! `low_value` is the visible extent and `maximum` the total extent. While
//! `low_value >= maximum` everything fits, the scrollbar is inert and hidden,
//! and hit-tests pass straight through it.

use crate::assets::{AssetCache, Texture};
use crate::error::LoadError;
use crate::primitives::{Point, Rect};
use crate::surface::DrawSurface;

/// Smallest thumb length in screen pixels.
const MIN_THUMB_LENGTH: f32 = 8.0;

/// One of the two stepper arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// Towards the start (value decreases).
    Start,
    /// Towards the end (value increases).
    End,
}

/// Track geometry along the scroll axis, recomputed from the bounds on
/// every call.
#[derive(Debug, Clone, Copy)]
struct Track {
    /// Start of the track (after the first arrow).
    start: f32,
    /// Length of the track (between the arrows).
    length: f32,
    thumb_length: f32,
    /// Largest scroll value.
    max_scroll: f32,
}

impl Track {
    /// Convert a pointer coordinate to a scroll value, keeping the point
    /// where the thumb was grabbed under the pointer.
    fn value_from(&self, pointer: f32, grab_offset: f32) -> f32 {
        let available = self.length - self.thumb_length;
        if available <= 0.0 {
            return 0.0;
        }
        let thumb_start = pointer - grab_offset;
        let relative = (thumb_start - self.start).clamp(0.0, available);
        (relative / available) * self.max_scroll
    }

    /// Thumb start coordinate for a scroll value.
    fn thumb_start(&self, value: f32) -> f32 {
        let available = self.length - self.thumb_length;
        if available <= 0.0 || self.max_scroll <= 0.0 {
            return self.start;
        }
        self.start + (value / self.max_scroll) * available
    }
}

#[derive(Debug, Clone)]
struct ScrollbarSkin {
    arrow: Texture,
    track: Texture,
    thumb: Texture,
}

/// A skinned scrollbar.
#[derive(Debug, Clone)]
pub struct Scrollbar {
    value: u32,
    maximum: u32,
    low_value: u32,
    vertical: bool,

    mouse_down: bool,
    mouse_down_on_thumb: bool,
    mouse_down_on_arrow: Option<Arrow>,
    grab_offset: f32,

    loaded_skin: String,
    skin: Option<ScrollbarSkin>,
}

impl Default for Scrollbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollbar {
    pub fn new() -> Self {
        Self {
            value: 0,
            maximum: 0,
            low_value: 0,
            vertical: true,
            mouse_down: false,
            mouse_down_on_thumb: false,
            mouse_down_on_arrow: None,
            grab_offset: 0.0,
            loaded_skin: String::new(),
            skin: None,
        }
    }

    /// Load `Arrow.png`, `Track.png` and `Thumb.png` from the skin directory.
    pub fn load(&mut self, assets: &AssetCache, skin: &str) -> Result<(), LoadError> {
        self.skin = None;
        self.loaded_skin.clear();

        let dir = skin.trim_end_matches('/');
        if dir.is_empty() {
            return Err(LoadError::EmptyPath);
        }

        let arrow = assets.texture(&format!("{dir}/Arrow.png"))?;
        let track = assets.texture(&format!("{dir}/Track.png"))?;
        let thumb = assets.texture(&format!("{dir}/Thumb.png"))?;

        self.skin = Some(ScrollbarSkin { arrow, track, thumb });
        self.loaded_skin = skin.to_string();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.skin.is_some()
    }

    pub fn loaded_skin(&self) -> &str {
        &self.loaded_skin
    }

    // =====================================================================
    // Range
    // =====================================================================

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn low_value(&self) -> u32 {
        self.low_value
    }

    /// Largest reachable value.
    pub fn max_value(&self) -> u32 {
        self.maximum.saturating_sub(self.low_value)
    }

    /// Set the value, clamped to `[0, maximum - low_value]`.
    pub fn set_value(&mut self, value: u32) {
        self.value = value.min(self.max_value());
    }

    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.set_value(self.value);
    }

    pub fn set_low_value(&mut self, low_value: u32) {
        self.low_value = low_value;
        self.set_value(self.value);
    }

    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub fn set_vertical(&mut self, vertical: bool) {
        self.vertical = vertical;
    }

    /// True when the content does not fit and the scrollbar can move.
    pub fn is_interactive(&self) -> bool {
        self.low_value < self.maximum
    }

    /// Hidden while everything fits.
    pub fn is_visible(&self) -> bool {
        self.is_loaded() && self.is_interactive()
    }

    /// Thickness across the scroll axis, taken from the arrow image.
    pub fn width(&self) -> u32 {
        self.skin.as_ref().map_or(0, |skin| {
            let size = skin.arrow.size();
            if self.vertical { size.width as u32 } else { size.height as u32 }
        })
    }

    // =====================================================================
    // Pointer state queried by the owning widget
    // =====================================================================

    pub(crate) fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub(crate) fn is_dragging_thumb(&self) -> bool {
        self.mouse_down && self.mouse_down_on_thumb
    }

    // =====================================================================
    // Geometry
    // =====================================================================

    /// (start, length) of `bounds` along the scroll axis.
    fn axis(&self, bounds: Rect) -> (f32, f32) {
        if self.vertical {
            (bounds.y, bounds.height)
        } else {
            (bounds.x, bounds.width)
        }
    }

    fn along(&self, position: Point) -> f32 {
        if self.vertical { position.y } else { position.x }
    }

    /// Length of one arrow along the scroll axis, keeping the image aspect.
    fn arrow_length(&self, bounds: Rect) -> f32 {
        let Some(skin) = &self.skin else {
            return 0.0;
        };
        let size = skin.arrow.size();
        let (thickness, image_across, image_along) = if self.vertical {
            (bounds.width, size.width, size.height)
        } else {
            (bounds.height, size.height, size.width)
        };
        let length = if image_across > 0.0 {
            image_along * thickness / image_across
        } else {
            0.0
        };
        let (_, total) = self.axis(bounds);
        length.min(total / 2.0)
    }

    fn track(&self, bounds: Rect) -> Track {
        let (start, total) = self.axis(bounds);
        let arrow = self.arrow_length(bounds);
        let length = (total - 2.0 * arrow).max(0.0);
        let thumb_length = if self.maximum > 0 {
            (length * self.low_value as f32 / self.maximum as f32)
                .max(MIN_THUMB_LENGTH)
                .min(length)
        } else {
            length
        };
        Track {
            start: start + arrow,
            length,
            thumb_length,
            max_scroll: self.max_value() as f32,
        }
    }

    /// Screen rectangle spanning `from..from + length` along the axis.
    fn span(&self, bounds: Rect, from: f32, length: f32) -> Rect {
        if self.vertical {
            Rect::new(bounds.x, from, bounds.width, length)
        } else {
            Rect::new(from, bounds.y, length, bounds.height)
        }
    }

    pub(crate) fn thumb_rect(&self, bounds: Rect) -> Rect {
        let track = self.track(bounds);
        let start = track.thumb_start(self.value as f32);
        self.span(bounds, start, track.thumb_length)
    }

    fn arrow_at(&self, bounds: Rect, position: Point) -> Option<Arrow> {
        let (start, total) = self.axis(bounds);
        let arrow = self.arrow_length(bounds);
        let p = self.along(position);
        if p < start + arrow {
            Some(Arrow::Start)
        } else if p >= start + total - arrow {
            Some(Arrow::End)
        } else {
            None
        }
    }

    // =====================================================================
    // Pointer handlers
    // =====================================================================

    /// Hit-test against `bounds`. An inert scrollbar never claims the pointer.
    pub fn mouse_on_widget(&self, bounds: Rect, position: Point) -> bool {
        self.is_loaded() && self.is_interactive() && bounds.contains(position)
    }

    pub fn left_mouse_pressed(&mut self, bounds: Rect, position: Point) {
        self.mouse_down = true;
        self.mouse_down_on_thumb = false;
        self.mouse_down_on_arrow = None;

        if let Some(arrow) = self.arrow_at(bounds, position) {
            self.mouse_down_on_arrow = Some(arrow);
            return;
        }

        let track = self.track(bounds);
        let pointer = self.along(position);
        let thumb_start = track.thumb_start(self.value as f32);

        if pointer >= thumb_start && pointer <= thumb_start + track.thumb_length {
            // Clicked on the thumb: preserve grab offset so it doesn't jump.
            self.grab_offset = pointer - thumb_start;
        } else {
            // Clicked on the track: jump thumb center to click point.
            self.grab_offset = track.thumb_length / 2.0;
            self.set_value(track.value_from(pointer, self.grab_offset).round() as u32);
        }
        self.mouse_down_on_thumb = true;
    }

    /// Releasing over the arrow that was pressed steps the value by one.
    pub fn left_mouse_released(&mut self, bounds: Rect, position: Point) {
        if self.mouse_down {
            if let Some(pressed) = self.mouse_down_on_arrow {
                if bounds.contains(position) && self.arrow_at(bounds, position) == Some(pressed) {
                    match pressed {
                        Arrow::Start => self.set_value(self.value.saturating_sub(1)),
                        Arrow::End => self.set_value(self.value + 1),
                    }
                }
            }
        }
        self.mouse_no_longer_down();
    }

    pub fn mouse_moved(&mut self, bounds: Rect, position: Point) {
        if self.is_dragging_thumb() {
            let track = self.track(bounds);
            let value = track.value_from(self.along(position), self.grab_offset);
            self.set_value(value.round() as u32);
        }
    }

    pub fn mouse_no_longer_down(&mut self) {
        self.mouse_down = false;
        self.mouse_down_on_thumb = false;
        self.mouse_down_on_arrow = None;
        self.grab_offset = 0.0;
    }

    /// Draw into screen-space `bounds`. Nothing is drawn while hidden.
    pub fn draw(&self, surface: &mut dyn DrawSurface, bounds: Rect) {
        let Some(skin) = &self.skin else {
            return;
        };
        if !self.is_visible() {
            return;
        }

        let (start, total) = self.axis(bounds);
        let arrow = self.arrow_length(bounds);

        surface.draw_texture(bounds, &skin.track, false);
        surface.draw_texture(self.span(bounds, start, arrow), &skin.arrow, false);
        surface.draw_texture(self.span(bounds, start + total - arrow, arrow), &skin.arrow, true);
        surface.draw_texture(self.thumb_rect(bounds), &skin.thumb, false);
    }
}
