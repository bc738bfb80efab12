//! ListBox
//!
//! An ordered collection of text items with a single selection, a fixed row
//! height and an optional vertical [`Scrollbar`].
//!
//! Item ids are 1-based; id 0 means "no selection" or "not found". The
//! height is always snapped to a whole number of rows plus the vertical
//! borders, so no row is ever cut off at the bottom. Without a scrollbar the
//! list never holds more items than fit in its content rectangle.

use std::any::Any;
use std::rc::Rc;

use crate::assets::AssetCache;
use crate::error::{LoadError, PropertyError};
use crate::event::Key;
use crate::font::{FontHandle, default_font};
use crate::loader::WidgetNode;
use crate::primitives::{Borders, Color, PixelSize, Point, Rect, Scale, Transform};
use crate::property::{PropertyTable, PropertyValue, RendererProperties, ValueKind};
use crate::scrollbar::Scrollbar;
use crate::surface::DrawSurface;
use crate::widget::{EventResult, Widget, WidgetEvent};

/// Smallest content width, excluding borders and scrollbar.
pub const MIN_CONTENT_WIDTH: u32 = 50;

/// Smallest row height.
pub const MIN_ITEM_HEIGHT: u32 = 10;

/// Text size used with [`MIN_ITEM_HEIGHT`].
const MIN_TEXT_SIZE: u32 = 8;

/// Rows targeted when `load` is not given an item height.
const DEFAULT_ROWS: u32 = 10;

/// Smallest content height when `load` derives the item height.
const DEFAULT_MIN_CONTENT_HEIGHT: u32 = 100;

/// Horizontal text inset from the left border.
const TEXT_PADDING: f32 = 2.0;

const PROPERTIES: PropertyTable = &[
    ("BackgroundColor", ValueKind::Color),
    ("TextColor", ValueKind::Color),
    ("SelectedBackgroundColor", ValueKind::Color),
    ("SelectedTextColor", ValueKind::Color),
    ("BorderColor", ValueKind::Color),
    ("Borders", ValueKind::Borders),
    ("Font", ValueKind::Font),
    ("Scrollbar", ValueKind::String),
];

/// The five colors a list box draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBoxColors {
    pub background: Color,
    pub text: Color,
    pub selected_background: Color,
    pub selected_text: Color,
    pub border: Color,
}

impl Default for ListBoxColors {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::BLACK,
            selected_background: Color::SELECTION,
            selected_text: Color::WHITE,
            border: Color::BLACK,
        }
    }
}

/// Text size for a row height: 80% of it, truncated.
fn text_size_for(item_height: u32) -> u32 {
    (item_height as f32 * 0.8) as u32
}

/// Snap `height` so the content (height minus `vertical_borders`) is a whole
/// number of rows, at least one. The closer multiple wins; a tie goes to the
/// larger one.
pub(crate) fn snap_height(height: u32, item_height: u32, vertical_borders: u32) -> u32 {
    let item_height = item_height.max(1);
    if height < item_height.saturating_add(vertical_borders) {
        return item_height.saturating_add(vertical_borders);
    }
    let content = height - vertical_borders;
    let lower = content / item_height * item_height;
    // Near u32::MAX there is no room for another row.
    let Some(upper) = lower
        .checked_add(item_height)
        .filter(|upper| upper.checked_add(vertical_borders).is_some())
    else {
        return lower + vertical_borders;
    };
    if content - lower < upper - content {
        lower + vertical_borders
    } else {
        upper + vertical_borders
    }
}

/// A scrollable, single-selection list of text items.
#[derive(Debug, Clone)]
pub struct ListBox {
    position: Point,
    scale: Scale,
    size: PixelSize,
    borders: Borders,

    item_height: u32,
    text_size: u32,
    items: Vec<String>,
    /// 1-based, 0 = none.
    selected: usize,
    /// 0 = unlimited.
    maximum_items: usize,

    scrollbar: Option<Scrollbar>,
    scrollbar_skin: String,

    colors: ListBoxColors,
    font: FontHandle,
    assets: Rc<AssetCache>,

    loaded: bool,
    mouse_down: bool,
}

impl ListBox {
    pub fn new(assets: Rc<AssetCache>) -> Self {
        Self {
            position: Point::ORIGIN,
            scale: Scale::IDENTITY,
            size: PixelSize::new(50, 100),
            borders: Borders::default(),
            item_height: 24,
            text_size: 20,
            items: Vec::new(),
            selected: 0,
            maximum_items: 0,
            scrollbar: None,
            scrollbar_skin: String::new(),
            colors: ListBoxColors::default(),
            font: default_font(),
            assets,
            loaded: true,
            mouse_down: false,
        }
    }

    /// Size the list box and optionally attach a scrollbar.
    ///
    /// With `item_height == 0` the row height is derived so that ten rows
    /// fill the content. A failing scrollbar leaves the list box unloaded.
    pub fn load(
        &mut self,
        width: u32,
        height: u32,
        scrollbar_skin: &str,
        item_height: u32,
    ) -> Result<(), LoadError> {
        self.scrollbar = None;
        self.scrollbar_skin.clear();

        let vertical = self.borders.vertical();
        let width = width.max(MIN_CONTENT_WIDTH + self.borders.horizontal());

        let (item_height, text_size, height) = if item_height > 0 {
            let (item_height, text_size) = if item_height < MIN_ITEM_HEIGHT {
                (MIN_ITEM_HEIGHT, MIN_TEXT_SIZE)
            } else {
                (item_height, text_size_for(item_height))
            };
            (item_height, text_size, snap_height(height, item_height, vertical))
        } else {
            let height = height.max(DEFAULT_MIN_CONTENT_HEIGHT + vertical);
            let item_height = ((height - vertical) / DEFAULT_ROWS).max(MIN_ITEM_HEIGHT);
            (item_height, text_size_for(item_height), item_height * DEFAULT_ROWS + vertical)
        };

        self.size = PixelSize::new(width, height);
        self.item_height = item_height;
        self.text_size = text_size;
        self.loaded = true;

        if scrollbar_skin.is_empty() {
            self.clip_to_capacity();
            return Ok(());
        }

        if let Err(e) = self.attach_scrollbar(scrollbar_skin) {
            self.loaded = false;
            return Err(e);
        }
        Ok(())
    }

    fn attach_scrollbar(&mut self, skin: &str) -> Result<(), LoadError> {
        let mut bar = Scrollbar::new();
        bar.load(&self.assets, skin)?;
        bar.set_vertical(true);
        bar.set_low_value(self.content_height());
        bar.set_maximum(self.content_extent());
        self.scrollbar = Some(bar);
        self.scrollbar_skin = skin.to_string();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    // =====================================================================
    // Items
    // =====================================================================

    /// Append an item and return its id, or 0 when it was rejected.
    pub fn add_item(&mut self, text: impl Into<String>) -> usize {
        if !self.loaded {
            return 0;
        }
        if self.maximum_items > 0 && self.items.len() >= self.maximum_items {
            tracing::debug!(limit = self.maximum_items, "item rejected: maximum reached");
            return 0;
        }
        if self.scrollbar.is_none() && self.items.len() >= self.capacity() {
            tracing::debug!(capacity = self.capacity(), "item rejected: list box full");
            return 0;
        }

        self.items.push(text.into());
        self.sync_scrollbar();
        self.items.len()
    }

    /// Select the first item whose text matches exactly. Clears the
    /// selection and returns false when there is none.
    pub fn set_selected_item(&mut self, text: &str) -> bool {
        match self.find_item(text) {
            Some(id) => {
                self.selected = id;
                true
            }
            None => {
                self.selected = 0;
                false
            }
        }
    }

    /// Select by id; 0 deselects. Out-of-range ids clear the selection and
    /// return false.
    pub fn set_selected_item_id(&mut self, id: usize) -> bool {
        if id <= self.items.len() {
            self.selected = id;
            true
        } else {
            self.selected = 0;
            false
        }
    }

    pub fn deselect_item(&mut self) {
        self.selected = 0;
    }

    /// Remove the item with the given id. Returns false for an invalid id.
    pub fn remove_item(&mut self, id: usize) -> bool {
        if id == 0 || id > self.items.len() {
            return false;
        }
        self.remove_at(id - 1);
        self.sync_scrollbar();
        true
    }

    /// Remove every item whose text matches exactly; returns how many.
    pub fn remove_item_by_text(&mut self, text: &str) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.items.len() {
            if self.items[i] == text {
                self.remove_at(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        if removed > 0 {
            self.sync_scrollbar();
        }
        removed
    }

    /// Remove the item at `index` and keep the selection on the same item.
    fn remove_at(&mut self, index: usize) {
        self.items.remove(index);
        let id = index + 1;
        if self.selected == id {
            self.selected = 0;
        } else if self.selected > id {
            self.selected -= 1;
        }
    }

    pub fn remove_all_items(&mut self) {
        self.items.clear();
        self.selected = 0;
        self.sync_scrollbar();
    }

    /// Text of item `id`, empty when the id is invalid.
    pub fn get_item(&self, id: usize) -> &str {
        id.checked_sub(1)
            .and_then(|i| self.items.get(i))
            .map_or("", String::as_str)
    }

    /// Id of the first item with this text, 0 when there is none.
    pub fn item_id(&self, text: &str) -> usize {
        self.find_item(text).unwrap_or(0)
    }

    /// Id of the first item with this text.
    pub fn find_item(&self, text: &str) -> Option<usize> {
        self.items.iter().position(|item| item == text).map(|i| i + 1)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Selected text, empty when nothing is selected.
    pub fn selected_item(&self) -> &str {
        self.get_item(self.selected)
    }

    pub fn selected_item_id(&self) -> usize {
        self.selected
    }

    // =====================================================================
    // Scrollbar
    // =====================================================================

    /// Replace the scrollbar. An empty skin removes it.
    pub fn set_scrollbar(&mut self, skin: &str) -> Result<(), LoadError> {
        self.scrollbar = None;
        self.scrollbar_skin.clear();

        if skin.is_empty() {
            self.clip_to_capacity();
            return Ok(());
        }

        let result = self.attach_scrollbar(skin);
        if result.is_err() {
            self.clip_to_capacity();
        }
        result
    }

    /// Drop the scrollbar; items that no longer fit are removed from the tail.
    pub fn remove_scrollbar(&mut self) {
        self.scrollbar = None;
        self.scrollbar_skin.clear();
        self.clip_to_capacity();
    }

    pub fn scrollbar(&self) -> Option<&Scrollbar> {
        self.scrollbar.as_ref()
    }

    pub fn loaded_scrollbar_skin(&self) -> &str {
        &self.scrollbar_skin
    }

    /// The scrollbar, when present and the content does not fit.
    fn active_scrollbar(&self) -> Option<&Scrollbar> {
        self.scrollbar.as_ref().filter(|bar| bar.is_interactive())
    }

    /// Screen-space rectangle of the scrollbar: inside the right border,
    /// spanning the content height, unscaled in width.
    fn scrollbar_bounds(&self) -> Option<Rect> {
        let bar = self.scrollbar.as_ref()?;
        let width = bar.width() as f32;
        Some(Rect::new(
            self.position.x + (self.size.width - self.borders.right) as f32 * self.scale.x - width,
            self.position.y + self.borders.top as f32 * self.scale.y,
            width,
            self.content_height() as f32 * self.scale.y,
        ))
    }

    /// Scroll just far enough that row `id` is fully visible.
    fn scroll_to(&mut self, id: usize) {
        if id == 0 {
            return;
        }
        let item_height = self.item_height;
        if let Some(bar) = self.scrollbar.as_mut().filter(|bar| bar.is_interactive()) {
            let top = (id as u32 - 1).saturating_mul(item_height);
            let bottom = top.saturating_add(item_height);
            if top < bar.value() {
                bar.set_value(top);
            } else if bottom > bar.value().saturating_add(bar.low_value()) {
                bar.set_value(bottom - bar.low_value());
            }
        }
    }

    pub(crate) fn reset_scroll(&mut self) {
        if let Some(bar) = &mut self.scrollbar {
            bar.set_value(0);
        }
    }

    pub(crate) fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub(crate) fn scrollbar_mouse_down(&self) -> bool {
        self.scrollbar.as_ref().is_some_and(Scrollbar::is_mouse_down)
    }

    fn sync_scrollbar(&mut self) {
        let content_height = self.content_height();
        let extent = self.content_extent();
        if let Some(bar) = &mut self.scrollbar {
            bar.set_low_value(content_height);
            bar.set_maximum(extent);
        }
    }

    // =====================================================================
    // Geometry
    // =====================================================================

    fn content_height(&self) -> u32 {
        self.size.height.saturating_sub(self.borders.vertical())
    }

    fn content_width(&self) -> u32 {
        self.size.width.saturating_sub(self.borders.horizontal())
    }

    /// Total height of all items.
    fn content_extent(&self) -> u32 {
        (self.items.len() as u32).saturating_mul(self.item_height)
    }

    /// Rows that fit in the content rectangle.
    fn capacity(&self) -> usize {
        (self.content_height() / self.item_height.max(1)) as usize
    }

    fn min_width(&self) -> u32 {
        let scrollbar = self.scrollbar.as_ref().map_or(0, Scrollbar::width);
        MIN_CONTENT_WIDTH + self.borders.horizontal() + scrollbar
    }

    /// Without a scrollbar, drop the items that no longer fit.
    fn clip_to_capacity(&mut self) {
        if self.scrollbar.is_some() {
            return;
        }
        let capacity = self.capacity();
        if self.items.len() > capacity {
            tracing::debug!(removed = self.items.len() - capacity, capacity, "clipping items to fit");
            self.items.truncate(capacity);
            if self.selected > capacity {
                self.selected = 0;
            }
        }
    }

    /// Row height; at least [`MIN_ITEM_HEIGHT`]. Re-snaps the height.
    pub fn set_item_height(&mut self, item_height: u32) {
        let item_height = item_height.max(MIN_ITEM_HEIGHT);
        self.item_height = item_height;
        self.text_size = text_size_for(item_height);
        self.size.height = snap_height(self.size.height, item_height, self.borders.vertical());
        self.sync_scrollbar();
        self.clip_to_capacity();
    }

    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    /// Limit the number of items (0 = unlimited); excess items are removed
    /// from the tail.
    pub fn set_maximum_items(&mut self, maximum_items: usize) {
        self.maximum_items = maximum_items;
        if maximum_items > 0 && self.items.len() > maximum_items {
            self.items.truncate(maximum_items);
            if self.selected > maximum_items {
                self.selected = 0;
            }
            self.sync_scrollbar();
        }
    }

    pub fn maximum_items(&self) -> usize {
        self.maximum_items
    }

    pub fn set_borders(&mut self, borders: Borders) {
        self.borders = borders;
        self.size.width = self.size.width.max(self.min_width());
        self.size.height = snap_height(self.size.height, self.item_height, borders.vertical());
        self.sync_scrollbar();
        self.clip_to_capacity();
    }

    pub fn borders(&self) -> Borders {
        self.borders
    }

    /// Resize; negative values are taken by absolute value and the height
    /// is snapped to whole rows.
    pub fn set_size(&mut self, width: f32, height: f32) {
        let width = (width.abs() as u32).max(self.min_width());
        let height = snap_height(height.abs() as u32, self.item_height, self.borders.vertical());
        self.size = PixelSize::new(width, height);
        self.sync_scrollbar();
        self.clip_to_capacity();
    }

    // =====================================================================
    // Appearance
    // =====================================================================

    pub fn change_colors(&mut self, colors: ListBoxColors) {
        self.colors = colors;
    }

    pub fn colors(&self) -> ListBoxColors {
        self.colors
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.colors.background = color;
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.colors.text = color;
    }

    pub fn set_selected_background_color(&mut self, color: Color) {
        self.colors.selected_background = color;
    }

    pub fn set_selected_text_color(&mut self, color: Color) {
        self.colors.selected_text = color;
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.colors.border = color;
    }

    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    /// Row under a pointer at local content offset `local_y` (unscaled,
    /// relative to the top border). 0 when past the last item.
    fn row_at(&self, local_y: f32) -> usize {
        let item_height = self.item_height as f32;
        let row = match self.active_scrollbar() {
            Some(bar) => {
                let value = bar.value();
                let first = (value / self.item_height) as usize;
                let remainder = value % self.item_height;
                // The first visible row may be cut off at the top.
                let first_part = (self.item_height - remainder) as f32;
                if local_y <= first_part {
                    first + 1
                } else if remainder == 0 {
                    (local_y / item_height) as usize + first + 1
                } else {
                    ((local_y - first_part) / item_height) as usize + first + 2
                }
            }
            None => (local_y / item_height) as usize + 1,
        };
        if row > self.items.len() { 0 } else { row }
    }
}

impl Widget for ListBox {
    fn widget_type(&self) -> &'static str {
        "listbox"
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
        self.size
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn mouse_on_widget(&mut self, position: Point) -> bool {
        if !self.loaded {
            return false;
        }

        let content = Rect::new(
            self.position.x + self.borders.left as f32 * self.scale.x,
            self.position.y + self.borders.top as f32 * self.scale.y,
            self.content_width() as f32 * self.scale.x,
            self.content_height() as f32 * self.scale.y,
        );
        content.contains(position)
    }

    fn left_mouse_pressed(&mut self, position: Point) -> Option<WidgetEvent> {
        if !self.loaded {
            return None;
        }
        self.mouse_down = true;

        if let Some(bounds) = self.scrollbar_bounds() {
            if let Some(bar) = &mut self.scrollbar {
                if bar.mouse_on_widget(bounds, position) {
                    bar.left_mouse_pressed(bounds, position);
                    return None;
                }
            }
        }

        let previous = self.selected;
        let local_y = ((position.y - self.position.y) / self.scale.y - self.borders.top as f32).max(0.0);
        self.selected = self.row_at(local_y);

        if self.selected == previous {
            return None;
        }
        tracing::debug!(id = self.selected, "list box selection changed");
        Some(WidgetEvent::ItemSelected {
            id: self.selected,
            text: self.selected_item().to_string(),
        })
    }

    fn left_mouse_released(&mut self, position: Point) -> Option<WidgetEvent> {
        let item_height = self.item_height;
        if let Some(bounds) = self.scrollbar_bounds() {
            if let Some(bar) = &mut self.scrollbar {
                let old = bar.value();
                bar.left_mouse_released(bounds, position);
                let new = bar.value();

                // Arrow clicks move one pixel; turn that into one whole row.
                if new == old + 1 {
                    bar.set_value(old + item_height - old % item_height);
                } else if old > 0 && new == old - 1 {
                    if old % item_height > 0 {
                        bar.set_value(old - old % item_height);
                    } else {
                        bar.set_value(old.saturating_sub(item_height));
                    }
                }
            }
        }
        self.mouse_down = false;
        None
    }

    fn mouse_moved(&mut self, position: Point) {
        if let Some(bounds) = self.scrollbar_bounds() {
            if let Some(bar) = &mut self.scrollbar {
                // Keep dragging even when the pointer leaves the scrollbar.
                if bar.is_dragging_thumb() || bar.mouse_on_widget(bounds, position) {
                    bar.mouse_moved(bounds, position);
                }
            }
        }
    }

    /// Up and Down move the selection one row and keep it in view.
    fn key_pressed(&mut self, key: &Key) -> EventResult<WidgetEvent> {
        if !self.loaded || self.items.is_empty() {
            return EventResult::Ignored;
        }
        let target = match key {
            Key::Up => self.selected.saturating_sub(1).max(1),
            Key::Down => (self.selected + 1).min(self.items.len()),
            _ => return EventResult::Ignored,
        };
        if target == self.selected {
            return EventResult::Captured;
        }
        self.selected = target;
        self.scroll_to(target);
        tracing::debug!(id = target, "list box selection moved by key");
        EventResult::Message(WidgetEvent::ItemSelected {
            id: target,
            text: self.selected_item().to_string(),
        })
    }

    fn mouse_wheel_moved(&mut self, notches: i32, _position: Point) {
        let step = self.item_height.saturating_mul(notches.unsigned_abs());
        if let Some(bar) = self.scrollbar.as_mut().filter(|bar| bar.is_interactive()) {
            if notches > 0 {
                bar.set_value(bar.value().saturating_sub(step));
            } else {
                bar.set_value(bar.value().saturating_add(step));
            }
        }
    }

    fn mouse_not_on_widget(&mut self) {}

    fn mouse_no_longer_down(&mut self) {
        self.mouse_down = false;
        if let Some(bar) = &mut self.scrollbar {
            bar.mouse_no_longer_down();
        }
    }

    fn set_font(&mut self, font: FontHandle) {
        self.font = font;
    }

    fn draw(&self, surface: &mut dyn DrawSurface) {
        if !self.loaded {
            return;
        }

        let active = self.active_scrollbar();
        let scrollbar_width = active.map_or(0.0, |bar| bar.width() as f32);

        // Items are clipped to the content rectangle left of the scrollbar,
        // within whatever the caller already clips to.
        let content = Rect::new(
            self.position.x + self.borders.left as f32 * self.scale.x,
            self.position.y + self.borders.top as f32 * self.scale.y,
            (self.content_width() as f32 * self.scale.x - scrollbar_width).max(0.0),
            self.content_height() as f32 * self.scale.y,
        );
        let clip = match surface.current_clip() {
            Some(outer) => outer.intersection(&content).unwrap_or(Rect::ZERO),
            None => content,
        };

        surface.push_transform(Transform::from_position_scale(self.position, self.scale));

        let left = self.borders.left as f32;
        let top = self.borders.top as f32;
        let content_width = self.content_width() as f32;
        surface.fill_rect(
            Rect::new(0.0, 0.0, self.size.width as f32, self.size.height as f32),
            self.colors.border,
        );
        surface.fill_rect(
            Rect::new(left, top, content_width, self.content_height() as f32),
            self.colors.background,
        );

        surface.push_clip(clip);

        let (first, last, offset) = match active {
            Some(bar) => {
                let value = bar.value();
                let first = (value / self.item_height) as usize;
                let last = (value + bar.low_value()).div_ceil(self.item_height) as usize;
                (first, last.min(self.items.len()), value as f32)
            }
            None => (0, self.items.len(), 0.0),
        };

        let item_height = self.item_height as f32;
        let text_offset = (self.item_height.saturating_sub(self.text_size)) as f32 / 2.0;
        for (i, item) in self.items.iter().enumerate().take(last).skip(first) {
            let y = top + i as f32 * item_height - offset;
            let color = if self.selected == i + 1 {
                surface.fill_rect(
                    Rect::new(left, y, content_width, item_height),
                    self.colors.selected_background,
                );
                self.colors.selected_text
            } else {
                self.colors.text
            };
            surface.draw_text(
                item,
                Point::new(left + TEXT_PADDING, y + text_offset),
                color,
                self.text_size,
            );
        }

        surface.pop_clip();
        surface.pop_transform();

        if let (Some(bar), Some(bounds)) = (&self.scrollbar, self.scrollbar_bounds()) {
            bar.draw(surface, bounds);
        }
    }

    fn clone_widget(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn save(&self, node: &mut WidgetNode) {
        node.size = Some([self.size.width as f32, self.size.height as f32]);
        node.item_height = Some(self.item_height);
        if !self.scrollbar_skin.is_empty() {
            node.scrollbar = Some(self.scrollbar_skin.clone());
        }
        if self.maximum_items > 0 {
            node.maximum_items = Some(self.maximum_items);
        }
        node.items = self.items.clone();
        if self.selected > 0 {
            node.selected = Some(self.selected);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RendererProperties for ListBox {
    fn property_table(&self) -> PropertyTable {
        PROPERTIES
    }

    fn write_property(&mut self, name: &'static str, value: PropertyValue) -> Result<(), PropertyError> {
        match (name, value) {
            ("BackgroundColor", PropertyValue::Color(c)) => self.colors.background = c,
            ("TextColor", PropertyValue::Color(c)) => self.colors.text = c,
            ("SelectedBackgroundColor", PropertyValue::Color(c)) => self.colors.selected_background = c,
            ("SelectedTextColor", PropertyValue::Color(c)) => self.colors.selected_text = c,
            ("BorderColor", PropertyValue::Color(c)) => self.colors.border = c,
            ("Borders", PropertyValue::Borders(b)) => self.set_borders(b),
            ("Font", PropertyValue::Font(f)) => self.font = f,
            ("Scrollbar", PropertyValue::String(skin)) => {
                self.set_scrollbar(&skin).map_err(|e| PropertyError::Load {
                    property: name.to_string(),
                    source: Box::new(e),
                })?;
            }
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
            "BackgroundColor" => self.colors.background.into(),
            "TextColor" => self.colors.text.into(),
            "SelectedBackgroundColor" => self.colors.selected_background.into(),
            "SelectedTextColor" => self.colors.selected_text.into(),
            "BorderColor" => self.colors.border.into(),
            "Borders" => self.borders.into(),
            "Font" => PropertyValue::Font(Rc::clone(&self.font)),
            "Scrollbar" => self.scrollbar_skin.as_str().into(),
            _ => PropertyValue::None,
        }
    }

    fn texture_source(&self) -> Option<&AssetCache> {
        Some(&self.assets)
    }
}
