//! ComboBox
//!
//! A one-line header showing the selected item plus an arrow button. Clicking
//! the header drops down an embedded [`ListBox`] directly below it; choosing
//! an item closes the list again.
//!
//! The header height is the arrow image height plus the top and bottom
//! borders. The list reuses that height for its rows, has no top border, and
//! grows one row per added item until `items_to_display` rows are visible.

use std::any::Any;
use std::rc::Rc;

use crate::assets::{AssetCache, Texture};
use crate::error::{LoadError, PropertyError};
use crate::event::Key;
use crate::font::FontHandle;
use crate::list_box::{ListBox, ListBoxColors, MIN_CONTENT_WIDTH};
use crate::loader::WidgetNode;
use crate::primitives::{Borders, PixelSize, Point, Rect, Scale, Transform};
use crate::property::{PropertyTable, PropertyValue, RendererProperties, ValueKind};
use crate::scrollbar::Scrollbar;
use crate::surface::DrawSurface;
use crate::widget::{EventResult, Widget, WidgetEvent};

const TEXT_PADDING: f32 = 2.0;

const PROPERTIES: PropertyTable = &[
    ("BackgroundColor", ValueKind::Color),
    ("TextColor", ValueKind::Color),
    ("SelectedBackgroundColor", ValueKind::Color),
    ("SelectedTextColor", ValueKind::Color),
    ("BorderColor", ValueKind::Color),
    ("Borders", ValueKind::Borders),
    ("Font", ValueKind::Font),
    ("Arrow", ValueKind::Texture),
    ("ArrowHover", ValueKind::Texture),
];

/// A drop-down selector backed by a [`ListBox`].
#[derive(Debug, Clone)]
pub struct ComboBox {
    position: Point,
    scale: Scale,
    borders: Borders,

    list: ListBox,
    items_to_display: u32,
    show_list: bool,
    mouse_on_list: bool,
    mouse_hover: bool,
    mouse_down: bool,

    arrow: Option<Texture>,
    arrow_hover: Option<Texture>,
    loaded_skin: String,
    assets: Rc<AssetCache>,
    loaded: bool,
}

impl ComboBox {
    pub fn new(assets: Rc<AssetCache>) -> Self {
        Self {
            position: Point::ORIGIN,
            scale: Scale::IDENTITY,
            borders: Borders::default(),
            list: ListBox::new(Rc::clone(&assets)),
            items_to_display: 1,
            show_list: false,
            mouse_on_list: false,
            mouse_hover: false,
            mouse_down: false,
            arrow: None,
            arrow_hover: None,
            loaded_skin: String::new(),
            assets,
            loaded: false,
        }
    }

    /// Load the arrow images from `skin` (`Normal.png`, optional
    /// `Hover.png`) and set up the drop-down list. Existing items are
    /// removed.
    pub fn load(
        &mut self,
        skin: &str,
        width: u32,
        items_to_display: u32,
        scrollbar_skin: &str,
    ) -> Result<(), LoadError> {
        self.loaded = false;
        self.show_list = false;

        let dir = skin.trim_end_matches('/');
        if dir.is_empty() {
            return Err(LoadError::EmptyPath);
        }

        self.arrow = Some(self.assets.texture(&format!("{dir}/Normal.png"))?);
        self.arrow_hover = self.assets.texture(&format!("{dir}/Hover.png")).ok();
        self.loaded_skin = dir.to_string();
        self.items_to_display = items_to_display.max(1);

        self.list.remove_all_items();
        self.list.set_borders(self.list_borders());
        let width = width.max(self.min_width());
        let header = self.header_height();
        self.list.load(width, header + self.borders.bottom, scrollbar_skin, header)?;

        self.loaded = true;
        self.sync_list();
        tracing::debug!(skin = dir, width, header, "combo box loaded");
        Ok(())
    }

    pub fn loaded_skin(&self) -> &str {
        &self.loaded_skin
    }

    fn arrow_size(&self) -> (u32, u32) {
        self.arrow.as_ref().map_or((0, 0), |t| {
            let size = t.size();
            (size.width as u32, size.height as u32)
        })
    }

    /// Unscaled height of the header, which is also the list row height.
    fn header_height(&self) -> u32 {
        self.arrow_size().1 + self.borders.vertical()
    }

    fn min_width(&self) -> u32 {
        MIN_CONTENT_WIDTH + self.borders.horizontal() + self.arrow_size().0
    }

    fn list_borders(&self) -> Borders {
        Borders::new(self.borders.left, 0, self.borders.right, self.borders.bottom)
    }

    /// Place the list directly below the header, at the same scale.
    fn sync_list(&mut self) {
        let header = self.header_height() as f32 * self.scale.y;
        self.list.set_position(Point::new(self.position.x, self.position.y + header));
        self.list.set_scale(self.scale);
    }

    /// Resize the list to show `rows` rows.
    fn resize_list(&mut self, rows: usize) {
        let height = self.header_height() * rows.max(1) as u32 + self.borders.bottom;
        let width = self.list.size().width as f32;
        self.list.set_size(width, height as f32);
    }

    pub fn is_list_open(&self) -> bool {
        self.show_list
    }

    pub fn list(&self) -> &ListBox {
        &self.list
    }

    // =====================================================================
    // Items
    // =====================================================================

    /// Append an item; returns its id or 0 when rejected.
    pub fn add_item(&mut self, text: impl Into<String>) -> usize {
        if !self.loaded {
            return 0;
        }
        self.list.set_item_height(self.header_height());

        let len = self.list.items().len();
        if self.items_to_display as usize > len {
            self.resize_list(len + 1);
        }
        self.list.add_item(text)
    }

    pub fn set_selected_item(&mut self, text: &str) -> bool {
        self.list.set_selected_item(text)
    }

    pub fn set_selected_item_id(&mut self, id: usize) -> bool {
        self.list.set_selected_item_id(id)
    }

    pub fn deselect_item(&mut self) {
        self.list.deselect_item();
    }

    pub fn remove_item(&mut self, id: usize) -> bool {
        self.list.remove_item(id)
    }

    pub fn remove_item_by_text(&mut self, text: &str) -> usize {
        self.list.remove_item_by_text(text)
    }

    pub fn remove_all_items(&mut self) {
        self.list.remove_all_items();
    }

    pub fn get_item(&self, id: usize) -> &str {
        self.list.get_item(id)
    }

    pub fn item_id(&self, text: &str) -> usize {
        self.list.item_id(text)
    }

    pub fn find_item(&self, text: &str) -> Option<usize> {
        self.list.find_item(text)
    }

    pub fn items(&self) -> &[String] {
        self.list.items()
    }

    pub fn selected_item(&self) -> &str {
        self.list.selected_item()
    }

    pub fn selected_item_id(&self) -> usize {
        self.list.selected_item_id()
    }

    pub fn set_maximum_items(&mut self, maximum_items: usize) {
        self.list.set_maximum_items(maximum_items);
    }

    pub fn maximum_items(&self) -> usize {
        self.list.maximum_items()
    }

    // =====================================================================
    // Configuration
    // =====================================================================

    pub fn set_scrollbar(&mut self, skin: &str) -> Result<(), LoadError> {
        self.list.set_scrollbar(skin)
    }

    pub fn remove_scrollbar(&mut self) {
        self.list.remove_scrollbar();
    }

    pub fn scrollbar(&self) -> Option<&Scrollbar> {
        self.list.scrollbar()
    }

    /// Rows visible when the list is open; at least 1.
    pub fn set_items_to_display(&mut self, items_to_display: u32) {
        self.items_to_display = items_to_display.max(1);
        let len = self.list.items().len();
        if (self.items_to_display as usize) < len {
            self.resize_list(self.items_to_display as usize);
        }
    }

    pub fn items_to_display(&self) -> u32 {
        self.items_to_display
    }

    /// Unscaled width of header and list.
    pub fn set_width(&mut self, width: u32) {
        let height = self.list.size().height as f32;
        self.list.set_size(width.max(self.min_width()) as f32, height);
    }

    /// Fit the header into `width` x `height` by changing the scale.
    pub fn set_size(&mut self, width: f32, height: f32) {
        if !self.loaded {
            return;
        }
        let list_width = self.list.size().width.max(1) as f32;
        let header = self.header_height().max(1) as f32;
        self.scale = Scale::new(width.abs() / list_width, height.abs() / header);
        self.sync_list();
    }

    pub fn set_borders(&mut self, borders: Borders) {
        self.borders = borders;
        self.list.set_borders(self.list_borders());
        if self.loaded {
            self.list.set_item_height(self.header_height());
            let rows = self.list.items().len().min(self.items_to_display as usize);
            self.resize_list(rows);
            self.set_width(self.list.size().width);
        }
        self.sync_list();
    }

    pub fn borders(&self) -> Borders {
        self.borders
    }

    pub fn change_colors(&mut self, colors: ListBoxColors) {
        self.list.change_colors(colors);
    }

    pub fn colors(&self) -> ListBoxColors {
        self.list.colors()
    }

    pub fn font(&self) -> &FontHandle {
        self.list.font()
    }

    /// The selected text cut from the end until it fits `available` pixels.
    fn header_text(&self, text_size: u32, available: f32) -> &str {
        let mut text = self.list.selected_item();
        let font = self.list.font();
        while !text.is_empty() && font.text_width(text, text_size) > available {
            let mut chars = text.chars();
            chars.next_back();
            text = chars.as_str();
        }
        text
    }
}

impl Widget for ComboBox {
    fn widget_type(&self) -> &'static str {
        "combobox"
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
        self.sync_list();
    }

    fn scale(&self) -> Scale {
        self.scale
    }

    fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
        self.sync_list();
    }

    /// The header only; the open list extends below it.
    fn size(&self) -> PixelSize {
        PixelSize::new(self.list.size().width, self.header_height())
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn mouse_on_widget(&mut self, position: Point) -> bool {
        if !self.loaded {
            return false;
        }

        let right = self.position.x + self.list.size().width as f32 * self.scale.x;
        if position.x > self.position.x && position.x < right && position.y > self.position.y {
            let header_bottom = self.position.y + self.header_height() as f32 * self.scale.y;
            if position.y < header_bottom {
                self.mouse_on_list = false;
                return true;
            }
            if self.show_list && self.list.mouse_on_widget(position) {
                self.mouse_on_list = true;
                return true;
            }
        }

        if self.mouse_hover {
            self.list.mouse_not_on_widget();
        }
        self.mouse_hover = false;
        false
    }

    fn left_mouse_pressed(&mut self, position: Point) -> Option<WidgetEvent> {
        if !self.loaded {
            return None;
        }
        self.mouse_down = true;

        if self.show_list && self.mouse_on_list {
            return self.list.left_mouse_pressed(position);
        }
        None
    }

    fn left_mouse_released(&mut self, position: Point) -> Option<WidgetEvent> {
        if self.mouse_down {
            if self.show_list {
                if self.mouse_on_list {
                    if self.list.is_mouse_down() {
                        // Scrolling keeps the list open; picking an item closes it.
                        if !self.list.scrollbar_mouse_down() {
                            self.show_list = false;
                        }
                        self.list.left_mouse_released(position);
                    }
                } else {
                    self.show_list = false;
                }
            } else {
                self.sync_list();
                self.list.reset_scroll();
                self.show_list = true;
            }
        }
        self.mouse_down = false;
        None
    }

    fn mouse_moved(&mut self, position: Point) {
        self.mouse_hover = true;
        if self.show_list && self.mouse_on_list {
            self.list.mouse_moved(position);
        } else {
            self.list.mouse_not_on_widget();
        }
    }

    fn key_pressed(&mut self, key: &Key) -> EventResult<WidgetEvent> {
        if !self.loaded {
            return EventResult::Ignored;
        }
        match key {
            Key::Up | Key::Down => self.list.key_pressed(key),
            Key::Enter | Key::Escape if self.show_list => {
                self.show_list = false;
                EventResult::Captured
            }
            Key::Enter => {
                self.sync_list();
                self.list.reset_scroll();
                self.show_list = true;
                EventResult::Captured
            }
            Key::Escape => EventResult::Ignored,
        }
    }

    fn mouse_wheel_moved(&mut self, notches: i32, position: Point) {
        if self.show_list && self.mouse_on_list {
            self.list.mouse_wheel_moved(notches, position);
        }
    }

    fn mouse_not_on_widget(&mut self) {
        self.mouse_hover = false;
        self.list.mouse_not_on_widget();
    }

    fn mouse_no_longer_down(&mut self) {
        self.mouse_down = false;
        self.show_list = false;
        self.list.mouse_no_longer_down();
    }

    fn set_font(&mut self, font: FontHandle) {
        self.list.set_font(font);
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        if !self.loaded {
            return;
        }

        let colors = self.list.colors();
        let width = self.list.size().width as f32;
        let header = self.header_height() as f32;
        let (arrow_width, arrow_height) = self.arrow_size();
        let left = self.borders.left as f32;
        let top = self.borders.top as f32;

        surface.push_transform(Transform::from_position_scale(self.position, self.scale));

        surface.fill_rect(Rect::new(0.0, 0.0, width, header), colors.border);
        surface.fill_rect(
            Rect::new(
                left,
                top,
                width - self.borders.horizontal() as f32,
                arrow_height as f32,
            ),
            colors.background,
        );

        let text_size = (arrow_height as f32 * 0.8) as u32;
        let available = width - self.borders.horizontal() as f32 - arrow_width as f32;
        let text = self.header_text(text_size, available);
        if !text.is_empty() {
            let y = top + (arrow_height.saturating_sub(text_size)) as f32 / 2.0;
            surface.draw_text(text, Point::new(left + TEXT_PADDING, y), colors.text, text_size);
        }

        let arrow_rect = Rect::new(
            width - self.borders.right as f32 - arrow_width as f32,
            top,
            arrow_width as f32,
            arrow_height as f32,
        );
        if let Some(arrow) = &self.arrow {
            surface.draw_texture(arrow_rect, arrow, self.show_list);
        }
        if self.mouse_hover && !self.mouse_on_list {
            if let Some(hover) = &self.arrow_hover {
                surface.draw_texture(arrow_rect, hover, self.show_list);
            }
        }

        surface.pop_transform();

        if self.show_list {
            self.list.draw(surface);
        }
    }

    fn clone_widget(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn save(&self, node: &mut WidgetNode) {
        node.skin = Some(self.loaded_skin.clone());
        node.size = Some([self.list.size().width as f32, self.header_height() as f32]);
        node.items_to_display = Some(self.items_to_display);
        let skin = self.list.loaded_scrollbar_skin();
        if !skin.is_empty() {
            node.scrollbar = Some(skin.to_string());
        }
        if self.list.maximum_items() > 0 {
            node.maximum_items = Some(self.list.maximum_items());
        }
        node.items = self.list.items().to_vec();
        if self.list.selected_item_id() > 0 {
            node.selected = Some(self.list.selected_item_id());
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RendererProperties for ComboBox {
    fn property_table(&self) -> PropertyTable {
        PROPERTIES
    }

    fn write_property(&mut self, name: &'static str, value: PropertyValue) -> Result<(), PropertyError> {
        match (name, value) {
            ("Borders", PropertyValue::Borders(b)) => self.set_borders(b),
            ("Font", PropertyValue::Font(f)) => self.list.set_font(f),
            ("Arrow", PropertyValue::Texture(t)) => {
                self.arrow = Some(t);
                // Header height follows the arrow image.
                let borders = self.borders;
                self.set_borders(borders);
            }
            ("ArrowHover", PropertyValue::Texture(t)) => self.arrow_hover = Some(t),
            (name, value) => return self.list.write_property(name, value),
        }
        Ok(())
    }

    fn read_property(&self, name: &'static str) -> PropertyValue {
        match name {
            "Borders" => self.borders.into(),
            "Arrow" => self.arrow.clone().map_or(PropertyValue::None, PropertyValue::Texture),
            "ArrowHover" => self
                .arrow_hover
                .clone()
                .map_or(PropertyValue::None, PropertyValue::Texture),
            name => self.list.read_property(name),
        }
    }

    fn texture_source(&self) -> Option<&AssetCache> {
        Some(&self.assets)
    }
}
