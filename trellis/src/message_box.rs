//! MessageBox
//!
//! A small window with a title bar, a text [`Label`] and a row of
//! [`Button`]s. The window sizes itself around its contents whenever the
//! text, text size, font or buttons change.

use std::any::Any;
use std::rc::Rc;

use crate::error::PropertyError;
use crate::font::{FontHandle, default_font};
use crate::loader::WidgetNode;
use crate::primitives::{Borders, Color, PixelSize, Point, Rect, Scale, Size, Transform};
use crate::property::{PropertyTable, PropertyValue, RendererProperties, ValueKind};
use crate::surface::DrawSurface;
use crate::widget::{Widget, WidgetEvent};

pub const DEFAULT_TEXT_SIZE: u32 = 16;
pub const TITLE_BAR_HEIGHT: u32 = 20;

const PROPERTIES: PropertyTable = &[
    ("TextColor", ValueKind::Color),
    ("TitleBarColor", ValueKind::Color),
    ("TitleColor", ValueKind::Color),
    ("BackgroundColor", ValueKind::Color),
    ("BorderColor", ValueKind::Color),
    ("Borders", ValueKind::Borders),
    ("ButtonColor", ValueKind::Color),
    ("Font", ValueKind::Font),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageBoxColors {
    pub text: Color,
    pub title_bar: Color,
    pub title: Color,
    pub background: Color,
    pub border: Color,
    pub button: Color,
}

impl Default for MessageBoxColors {
    fn default() -> Self {
        Self {
            text: Color::BLACK,
            title_bar: Color::rgb(60, 60, 60),
            title: Color::WHITE,
            background: Color::rgb(230, 230, 230),
            border: Color::BLACK,
            button: Color::rgb(200, 200, 200),
        }
    }
}

/// Static, possibly multi-line text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    text: String,
    position: Point,
    size: Size,
}

impl Label {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn measure(&mut self, font: &FontHandle, text_size: u32) {
        let width = self
            .text
            .lines()
            .map(|line| font.text_width(line, text_size))
            .fold(0.0, f32::max);
        let lines = self.text.lines().count().max(1);
        self.size = Size::new(width, lines as f32 * font.line_height(text_size));
    }

    fn draw(&self, surface: &mut dyn DrawSurface, font: &FontHandle, text_size: u32, color: Color) {
        let line_height = font.line_height(text_size);
        for (i, line) in self.text.lines().enumerate() {
            let y = self.position.y + i as f32 * line_height;
            surface.draw_text(line, Point::new(self.position.x, y), color, text_size);
        }
    }
}

/// A captioned push button.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    caption: String,
    position: Point,
    size: Size,
    hover: bool,
}

impl Button {
    fn new(caption: String) -> Self {
        Self {
            caption,
            position: Point::ORIGIN,
            size: Size::ZERO,
            hover: false,
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Position relative to the message box client area.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.width, self.size.height)
    }
}

/// A titled window with a message and one button per possible answer.
#[derive(Debug, Clone)]
pub struct MessageBox {
    position: Point,
    scale: Scale,
    borders: Borders,
    client_size: Size,

    title: String,
    label: Label,
    buttons: Vec<Button>,
    text_size: u32,

    colors: MessageBoxColors,
    font: FontHandle,

    /// Index of the button the pointer went down on.
    pressed: Option<usize>,
}

impl Default for MessageBox {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBox {
    pub fn new() -> Self {
        let mut message_box = Self {
            position: Point::ORIGIN,
            scale: Scale::IDENTITY,
            borders: Borders::uniform(1),
            client_size: Size::ZERO,
            title: String::new(),
            label: Label::default(),
            buttons: Vec::new(),
            text_size: DEFAULT_TEXT_SIZE,
            colors: MessageBoxColors::default(),
            font: default_font(),
            pressed: None,
        };
        message_box.rearrange();
        message_box
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.text = text.into();
        self.rearrange();
    }

    pub fn text(&self) -> &str {
        self.label.text()
    }

    /// Character size of the text and the button captions.
    pub fn set_text_size(&mut self, text_size: u32) {
        self.text_size = text_size;
        self.rearrange();
    }

    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    pub fn add_button(&mut self, caption: impl Into<String>) {
        self.buttons.push(Button::new(caption.into()));
        self.rearrange();
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn change_colors(&mut self, colors: MessageBoxColors) {
        self.colors = colors;
    }

    pub fn colors(&self) -> MessageBoxColors {
        self.colors
    }

    pub fn set_borders(&mut self, borders: Borders) {
        self.borders = borders;
    }

    pub fn borders(&self) -> Borders {
        self.borders
    }

    /// Size of the area below the title bar, inside the borders.
    pub fn client_size(&self) -> Size {
        self.client_size
    }

    /// Lay out label and buttons and resize the window around them.
    fn rearrange(&mut self) {
        let text_size = self.text_size as f32;
        let widest = self
            .buttons
            .iter()
            .map(|b| self.font.text_width(&b.caption, self.text_size))
            .fold(0.0, f32::max);

        let button_width = (5.0 * text_size).max(widest * 10.0 / 9.0);
        let button_height = text_size * 10.0 / 8.0;
        let spacing = button_height * 2.0 / 3.0;

        self.label.measure(&self.font, self.text_size);
        let label = self.label.size;

        let count = self.buttons.len() as f32;
        let buttons_width = spacing + count * (button_width + spacing);
        self.client_size = Size::new(
            (2.0 * spacing + label.width).max(buttons_width),
            3.0 * spacing + label.height + button_height,
        );
        self.label.position = Point::new(spacing, spacing);

        // Spread the buttons evenly over the width.
        let gap = (self.client_size.width - buttons_width) / (count + 1.0);
        let y = 2.0 * spacing + label.height;
        let mut x = spacing + gap;
        for button in &mut self.buttons {
            button.position = Point::new(x, y);
            button.size = Size::new(button_width, button_height);
            x += button_width + spacing + gap;
        }
    }

    /// Screen position of the client area's origin.
    fn client_origin(&self) -> Point {
        Point::new(
            self.position.x + self.borders.left as f32 * self.scale.x,
            self.position.y + (self.borders.top + TITLE_BAR_HEIGHT) as f32 * self.scale.y,
        )
    }

    fn button_at(&self, position: Point) -> Option<usize> {
        let origin = self.client_origin();
        let local = Point::new(
            (position.x - origin.x) / self.scale.x,
            (position.y - origin.y) / self.scale.y,
        );
        self.buttons.iter().position(|b| b.rect().contains(local))
    }
}

impl Widget for MessageBox {
    fn widget_type(&self) -> &'static str {
        "messagebox"
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn scale(&self) -> Scale {
        self.scale
    }

    fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    fn size(&self) -> PixelSize {
        PixelSize::new(
            self.client_size.width.ceil() as u32 + self.borders.horizontal(),
            self.client_size.height.ceil() as u32 + TITLE_BAR_HEIGHT + self.borders.vertical(),
        )
    }

    fn is_loaded(&self) -> bool {
        true
    }

    fn mouse_on_widget(&mut self, position: Point) -> bool {
        self.bounds().contains(position)
    }

    fn left_mouse_pressed(&mut self, position: Point) -> Option<WidgetEvent> {
        self.pressed = self.button_at(position);
        None
    }

    fn left_mouse_released(&mut self, position: Point) -> Option<WidgetEvent> {
        let pressed = self.pressed.take()?;
        if self.button_at(position) != Some(pressed) {
            return None;
        }
        let caption = self.buttons[pressed].caption.clone();
        tracing::debug!(%caption, "message box button pressed");
        Some(WidgetEvent::ButtonPressed { caption })
    }

    fn mouse_moved(&mut self, position: Point) {
        let hovered = self.button_at(position);
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.hover = hovered == Some(i);
        }
    }

    fn mouse_not_on_widget(&mut self) {
        for button in &mut self.buttons {
            button.hover = false;
        }
    }

    fn mouse_no_longer_down(&mut self) {
        self.pressed = None;
    }

    fn set_font(&mut self, font: FontHandle) {
        self.font = font;
        self.rearrange();
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        let size = self.size();
        let left = self.borders.left as f32;
        let top = self.borders.top as f32;
        let inner_width = (size.width - self.borders.horizontal()) as f32;
        let title_bar = TITLE_BAR_HEIGHT as f32;

        surface.push_transform(Transform::from_position_scale(self.position, self.scale));

        surface.fill_rect(
            Rect::new(0.0, 0.0, size.width as f32, size.height as f32),
            self.colors.border,
        );
        surface.fill_rect(Rect::new(left, top, inner_width, title_bar), self.colors.title_bar);
        if !self.title.is_empty() {
            let title_size = (title_bar * 0.8) as u32;
            let y = top + (title_bar - title_size as f32) / 2.0;
            surface.draw_text(&self.title, Point::new(left + 2.0, y), self.colors.title, title_size);
        }
        surface.fill_rect(
            Rect::new(left, top + title_bar, inner_width, self.client_size.height.ceil()),
            self.colors.background,
        );

        // Label and buttons are laid out in client coordinates.
        surface.push_transform(Transform::translation(left, top + title_bar));
        self.label.draw(surface, &self.font, self.text_size, self.colors.text);
        for button in &self.buttons {
            let fill = if button.hover {
                self.colors.button.with_alpha(200)
            } else {
                self.colors.button
            };
            surface.fill_rect(button.rect(), fill);
            let width = self.font.text_width(&button.caption, self.text_size);
            let height = self.font.line_height(self.text_size);
            let at = Point::new(
                button.position.x + (button.size.width - width) / 2.0,
                button.position.y + (button.size.height - height) / 2.0,
            );
            surface.draw_text(&button.caption, at, self.colors.text, self.text_size);
        }
        surface.pop_transform();

        surface.pop_transform();
    }

    fn clone_widget(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn save(&self, node: &mut WidgetNode) {
        if !self.title.is_empty() {
            node.title = Some(self.title.clone());
        }
        node.text = Some(self.label.text.clone());
        node.text_size = Some(self.text_size);
        node.buttons = self.buttons.iter().map(|b| b.caption.clone()).collect();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RendererProperties for MessageBox {
    fn property_table(&self) -> PropertyTable {
        PROPERTIES
    }

    fn write_property(&mut self, name: &'static str, value: PropertyValue) -> Result<(), PropertyError> {
        match (name, value) {
            ("TextColor", PropertyValue::Color(c)) => self.colors.text = c,
            ("TitleBarColor", PropertyValue::Color(c)) => self.colors.title_bar = c,
            ("TitleColor", PropertyValue::Color(c)) => self.colors.title = c,
            ("BackgroundColor", PropertyValue::Color(c)) => self.colors.background = c,
            ("BorderColor", PropertyValue::Color(c)) => self.colors.border = c,
            ("ButtonColor", PropertyValue::Color(c)) => self.colors.button = c,
            ("Borders", PropertyValue::Borders(b)) => self.borders = b,
            ("Font", PropertyValue::Font(f)) => self.set_font(f),
            (name, value) => {
                return Err(PropertyError::WrongType {
                    property: name.to_string(),
                    expected: ValueKind::None,
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    fn read_property(&self, name: &'static str) -> PropertyValue {
        match name {
            "TextColor" => self.colors.text.into(),
            "TitleBarColor" => self.colors.title_bar.into(),
            "TitleColor" => self.colors.title.into(),
            "BackgroundColor" => self.colors.background.into(),
            "BorderColor" => self.colors.border.into(),
            "ButtonColor" => self.colors.button.into(),
            "Borders" => self.borders.into(),
            "Font" => PropertyValue::Font(Rc::clone(&self.font)),
            _ => PropertyValue::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontMetrics;
    use crate::surface::DrawList;

    /// Half the character size per character, one character size per line.
    #[derive(Debug)]
    struct HalfWidth;

    impl FontMetrics for HalfWidth {
        fn text_width(&self, text: &str, size: u32) -> f32 {
            text.chars().count() as f32 * size as f32 / 2.0
        }

        fn line_height(&self, size: u32) -> f32 {
            size as f32
        }
    }

    /// Text size 24: buttons 120x30, spacing 20, "Hello" 60x24.
    fn message_box(buttons: &[&str]) -> MessageBox {
        let mut mb = MessageBox::new();
        mb.set_font(Rc::new(HalfWidth));
        mb.set_text_size(24);
        mb.set_text("Hello");
        for caption in buttons {
            mb.add_button(*caption);
        }
        mb.set_position(Point::new(100.0, 50.0));
        mb
    }

    #[test]
    fn layout_single_button() {
        let mb = message_box(&["OK"]);
        assert_eq!(mb.client_size(), Size::new(160.0, 114.0));
        assert_eq!(mb.label().position(), Point::new(20.0, 20.0));
        let ok = &mb.buttons()[0];
        assert_eq!(ok.position(), Point::new(20.0, 64.0));
        assert_eq!(ok.size(), Size::new(120.0, 30.0));
        assert_eq!(mb.size(), PixelSize::new(162, 114 + TITLE_BAR_HEIGHT + 2));
    }

    #[test]
    fn wide_label_spreads_buttons() {
        let mut mb = message_box(&["Yes", "No", "Maybe"]);
        mb.set_text("x".repeat(60));
        // Label 720 wide, buttons need 440: 320 spare over four gaps.
        assert_eq!(mb.client_size().width, 760.0);
        let xs: Vec<_> = mb.buttons().iter().map(|b| b.position().x).collect();
        assert_eq!(xs, [100.0, 320.0, 540.0]);
    }

    #[test]
    fn long_caption_widens_buttons() {
        let mb = message_box(&["A very long caption"]);
        let widest = 19.0 * 12.0;
        assert_eq!(mb.buttons()[0].size().width, widest * 10.0 / 9.0);
    }

    #[test]
    fn multi_line_text() {
        let mut mb = message_box(&[]);
        mb.set_text("one\nthree");
        assert_eq!(mb.label().size(), Size::new(60.0, 48.0));
    }

    #[test]
    fn click_on_button_reports_caption() {
        let mut mb = message_box(&["OK", "Cancel"]);
        // Client origin is (101, 71); Cancel starts at x = 20 + 120 + 20.
        let cancel = Point::new(101.0 + 165.0, 71.0 + 70.0);
        assert!(mb.mouse_on_widget(cancel));
        assert_eq!(mb.left_mouse_pressed(cancel), None);
        assert_eq!(
            mb.left_mouse_released(cancel),
            Some(WidgetEvent::ButtonPressed { caption: "Cancel".into() })
        );
    }

    #[test]
    fn release_elsewhere_is_not_a_click() {
        let mut mb = message_box(&["OK", "Cancel"]);
        let ok = Point::new(101.0 + 25.0, 71.0 + 70.0);
        let cancel = Point::new(101.0 + 165.0, 71.0 + 70.0);
        mb.left_mouse_pressed(ok);
        assert_eq!(mb.left_mouse_released(cancel), None);

        mb.left_mouse_pressed(ok);
        mb.mouse_no_longer_down();
        assert_eq!(mb.left_mouse_released(ok), None);
    }

    #[test]
    fn hover_tracks_pointer() {
        let mut mb = message_box(&["OK"]);
        mb.mouse_moved(Point::new(101.0 + 25.0, 71.0 + 70.0));
        assert!(mb.buttons()[0].hover);
        mb.mouse_not_on_widget();
        assert!(!mb.buttons()[0].hover);
    }

    #[test]
    fn draws_window_label_and_buttons() {
        let mut mb = message_box(&["OK"]);
        mb.set_title("Note");

        let mut surface = DrawList::new();
        mb.draw(&mut surface);

        let rects: Vec<_> = surface.solid_rects().collect();
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0].rect, Rect::new(100.0, 50.0, 162.0, 136.0));
        assert_eq!(rects[3].rect, Rect::new(121.0, 135.0, 120.0, 30.0));

        let texts: Vec<_> = surface.text_runs().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Note", "Hello", "OK"]);
        assert_eq!(surface.text_runs().nth(1).unwrap().position, Point::new(121.0, 91.0));
    }

    #[test]
    fn properties() {
        let mut mb = MessageBox::new();
        mb.set_property_str("TitleBarColor", "rgb(1, 2, 3)").unwrap();
        assert_eq!(mb.colors().title_bar, Color::rgb(1, 2, 3));
        mb.set_property_str("borders", "(2, 2, 2, 2)").unwrap();
        assert_eq!(mb.borders(), Borders::uniform(2));
        let keys: Vec<_> = mb.property_value_pairs().keys().cloned().collect();
        assert_eq!(keys.len(), PROPERTIES.len());
    }
}
