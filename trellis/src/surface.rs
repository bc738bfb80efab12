//! Draw surface.
//!
//! Widgets render through the [`DrawSurface`] trait: filled rectangles, text
//! runs and textured quads, drawn under an affine transform stack and a
//! screen-space clip stack. The host backend implements the trait; the crate
//! ships [`DrawList`], which records every primitive in screen space together
//! with the clip rectangle that was active when it was added.

use crate::assets::Texture;
use crate::primitives::{Color, Point, Rect, Transform};

/// Primitive draw calls plus the transform and clip stacks.
///
/// Geometry passed to `fill_rect`, `draw_text` and `draw_texture` is in the
/// local space of the current transform. Clip rectangles are always in screen
/// space; the effective clip is the intersection of every pushed rectangle.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a single line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, color: Color, size: u32);

    fn draw_texture(&mut self, rect: Rect, texture: &Texture, flip_vertical: bool);

    fn push_clip(&mut self, rect: Rect);
    fn pop_clip(&mut self);

    /// Effective clip rectangle, `None` when nothing is clipped.
    fn current_clip(&self) -> Option<Rect>;

    /// Push a transform applied before the current one.
    fn push_transform(&mut self, transform: Transform);
    fn pop_transform(&mut self);
    fn current_transform(&self) -> Transform;
}

/// A filled rectangle in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidRect {
    pub rect: Rect,
    pub color: Color,
    pub clip_rect: Option<Rect>,
}

/// A text run in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub position: Point,
    pub color: Color,
    /// Character size after the vertical scale of the transform.
    pub font_size: f32,
    pub clip_rect: Option<Rect>,
}

/// A textured quad in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturedQuad {
    pub rect: Rect,
    pub texture_id: String,
    pub flip_vertical: bool,
    pub clip_rect: Option<Rect>,
}

/// One recorded draw call, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(SolidRect),
    Text(TextRun),
    Texture(TexturedQuad),
}

impl Primitive {
    pub fn clip_rect(&self) -> Option<Rect> {
        match self {
            Primitive::Rect(r) => r.clip_rect,
            Primitive::Text(t) => t.clip_rect,
            Primitive::Texture(q) => q.clip_rect,
        }
    }
}

/// A recording draw surface.
#[derive(Debug, Default)]
pub struct DrawList {
    primitives: Vec<Primitive>,
    /// Clip stack for nested widget clipping.
    clip_stack: Vec<Rect>,
    transform_stack: Vec<Transform>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all primitives and both stacks for a new frame.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.clip_stack.clear();
        self.transform_stack.clear();
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn solid_rects(&self) -> impl Iterator<Item = &SolidRect> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn textured_quads(&self) -> impl Iterator<Item = &TexturedQuad> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Texture(q) => Some(q),
            _ => None,
        })
    }

    /// Intersection of every clip on the stack.
    fn effective_clip(&self) -> Option<Rect> {
        let (first, rest) = self.clip_stack.split_first()?;
        let mut clip = *first;
        for r in rest {
            match clip.intersection(r) {
                Some(c) => clip = c,
                // Empty intersection: clip everything.
                None => return Some(Rect::ZERO),
            }
        }
        if clip.is_empty() {
            return Some(Rect::ZERO);
        }
        Some(clip)
    }
}

impl DrawSurface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.current_transform().transform_rect(rect);
        let clip_rect = self.effective_clip();
        self.primitives.push(Primitive::Rect(SolidRect { rect, color, clip_rect }));
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color, size: u32) {
        let transform = self.current_transform();
        let unit = transform.transform_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        let clip_rect = self.effective_clip();
        self.primitives.push(Primitive::Text(TextRun {
            text: text.to_string(),
            position: transform.transform_point(position),
            color,
            font_size: size as f32 * unit.height,
            clip_rect,
        }));
    }

    fn draw_texture(&mut self, rect: Rect, texture: &Texture, flip_vertical: bool) {
        let rect = self.current_transform().transform_rect(rect);
        let clip_rect = self.effective_clip();
        self.primitives.push(Primitive::Texture(TexturedQuad {
            rect,
            texture_id: texture.id().to_string(),
            flip_vertical,
            clip_rect,
        }));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_stack.push(rect);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    fn current_clip(&self) -> Option<Rect> {
        self.effective_clip()
    }

    fn push_transform(&mut self, transform: Transform) {
        let combined = self.current_transform() * transform;
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_screen_space() {
        let mut list = DrawList::new();
        list.push_transform(Transform::translation(10.0, 20.0));
        list.push_transform(Transform::scaling(2.0, 2.0));
        list.fill_rect(Rect::new(1.0, 1.0, 5.0, 5.0), Color::RED);
        list.pop_transform();
        list.fill_rect(Rect::new(1.0, 1.0, 5.0, 5.0), Color::BLUE);
        list.pop_transform();

        let rects: Vec<_> = list.solid_rects().collect();
        assert_eq!(rects[0].rect, Rect::new(12.0, 22.0, 10.0, 10.0));
        assert_eq!(rects[1].rect, Rect::new(11.0, 21.0, 5.0, 5.0));
        assert_eq!(list.current_transform(), Transform::IDENTITY);
    }

    #[test]
    fn text_size_follows_vertical_scale() {
        let mut list = DrawList::new();
        list.push_transform(Transform::scaling(1.0, 1.5));
        list.draw_text("hi", Point::new(0.0, 10.0), Color::BLACK, 20);
        let run = list.text_runs().next().unwrap();
        assert_eq!(run.font_size, 30.0);
        assert_eq!(run.position, Point::new(0.0, 15.0));
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        assert_eq!(list.current_clip(), None);

        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        assert_eq!(
            list.primitives()[0].clip_rect(),
            Some(Rect::new(50.0, 50.0, 50.0, 50.0))
        );

        list.pop_clip();
        assert_eq!(list.current_clip(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn disjoint_clips_clip_everything() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_clip(Rect::new(20.0, 20.0, 10.0, 10.0));
        assert_eq!(list.current_clip(), Some(Rect::ZERO));
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.push_transform(Transform::translation(5.0, 5.0));
        list.fill_rect(Rect::ZERO, Color::WHITE);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.current_clip(), None);
        assert_eq!(list.current_transform(), Transform::IDENTITY);
    }
}
