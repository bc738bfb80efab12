//! Gui container.
//!
//! [`Gui`] owns a flat, named collection of widgets. It decides which widget
//! a host event belongs to, calls the matching handler and queues whatever
//! the widget reports as a [`Callback`]. Widgets added later are on top.
//!
//! While the left button is down the pressed widget holds the pointer
//! capture: moves go to it even when the pointer leaves its bounds, so
//! scrollbar drags keep working.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::assets::{AssetCache, FileTextureProvider};
use crate::config::ToolkitConfig;
use crate::event::{Event, MouseButton};
use crate::font::{FontHandle, default_font};
use crate::primitives::Point;
use crate::surface::DrawSurface;
use crate::widget::{BoxedWidget, EventResult, Widget, WidgetEvent};

/// A widget event tagged with the name of the widget that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback {
    pub widget: String,
    pub event: WidgetEvent,
}

#[derive(Debug)]
struct Entry {
    name: String,
    widget: BoxedWidget,
}

#[derive(Debug)]
pub struct Gui {
    widgets: Vec<Entry>,
    assets: Rc<AssetCache>,
    font: FontHandle,
    text_size: u32,

    hovered: Option<usize>,
    focused: Option<usize>,
    /// Pointer capture while the left button is held.
    captured: Option<usize>,

    callbacks: VecDeque<Callback>,
}

impl Gui {
    pub fn new(assets: Rc<AssetCache>) -> Self {
        Self {
            widgets: Vec::new(),
            assets,
            font: default_font(),
            text_size: ToolkitConfig::default().font_size,
            hovered: None,
            focused: None,
            captured: None,
            callbacks: VecDeque::new(),
        }
    }

    /// A Gui loading skins from `config.asset_root`.
    pub fn with_config(config: &ToolkitConfig) -> Self {
        let provider = FileTextureProvider::new(&config.asset_root);
        let assets = AssetCache::with_capacity(provider, config.texture_cache_capacity);
        let mut gui = Self::new(Rc::new(assets));
        gui.text_size = config.font_size;
        gui
    }

    /// The cache widgets created for this Gui should load from.
    pub fn assets(&self) -> &Rc<AssetCache> {
        &self.assets
    }

    /// Default text size for widgets that do not set one.
    pub fn text_size(&self) -> u32 {
        self.text_size
    }

    // =====================================================================
    // Widget collection
    // =====================================================================

    /// Add a widget on top of the others. A widget with the same name is
    /// replaced in place.
    pub fn add(&mut self, name: impl Into<String>, widget: impl Widget + 'static) {
        self.add_boxed(name, Box::new(widget));
    }

    pub fn add_boxed(&mut self, name: impl Into<String>, mut widget: BoxedWidget) {
        let name = name.into();
        widget.set_font(Rc::clone(&self.font));
        match self.index_of(&name) {
            Some(i) => {
                tracing::debug!(%name, "replacing widget");
                self.widgets[i].widget = widget;
            }
            None => self.widgets.push(Entry { name, widget }),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<BoxedWidget> {
        let index = self.index_of(name)?;
        self.hovered = None;
        self.focused = None;
        self.captured = None;
        Some(self.widgets.remove(index).widget)
    }

    pub fn remove_all(&mut self) {
        self.widgets.clear();
        self.hovered = None;
        self.focused = None;
        self.captured = None;
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.widgets.iter().position(|e| e.name == name)
    }

    pub fn widget(&self, name: &str) -> Option<&dyn Widget> {
        self.index_of(name).map(|i| self.widgets[i].widget.as_ref())
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut dyn Widget> {
        let i = self.index_of(name)?;
        Some(self.widgets[i].widget.as_mut())
    }

    /// The widget called `name`, if it is a `W`.
    pub fn get<W: Widget + 'static>(&self, name: &str) -> Option<&W> {
        self.widget(name)?.as_any().downcast_ref()
    }

    pub fn get_mut<W: Widget + 'static>(&mut self, name: &str) -> Option<&mut W> {
        self.widget_mut(name)?.as_any_mut().downcast_mut()
    }

    /// Names in drawing order, bottom first.
    pub fn widget_names(&self) -> Vec<&str> {
        self.widgets.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn widgets(&self) -> impl Iterator<Item = (&str, &dyn Widget)> {
        self.widgets.iter().map(|e| (e.name.as_str(), e.widget.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Give every widget, present and future, this font.
    pub fn set_global_font(&mut self, font: FontHandle) {
        for entry in &mut self.widgets {
            entry.widget.set_font(Rc::clone(&font));
        }
        self.font = font;
    }

    pub fn global_font(&self) -> &FontHandle {
        &self.font
    }

    // =====================================================================
    // Events
    // =====================================================================

    /// Topmost widget whose hit-test accepts `position`.
    fn widget_at(&mut self, position: Point) -> Option<usize> {
        let widgets = &mut self.widgets;
        (0..widgets.len())
            .rev()
            .find(|&i| widgets[i].widget.mouse_on_widget(position))
    }

    fn dispatch(&mut self, index: usize, event: &Event) -> bool {
        let entry = &mut self.widgets[index];
        let result = entry.widget.event(event);
        tracing::trace!(widget = %entry.name, ?event, handled = result.is_handled(), "routed event");
        if let EventResult::Message(event) = result {
            tracing::debug!(widget = %entry.name, ?event, "callback");
            self.callbacks.push_back(Callback {
                widget: entry.name.clone(),
                event,
            });
        }
        true
    }

    /// Route a host event. Returns true when some widget received it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::MouseMoved { position } => {
                if let Some(captured) = self.captured {
                    return self.dispatch(captured, event);
                }
                let target = self.widget_at(*position);
                if let Some(previous) = self.hovered {
                    if Some(previous) != target {
                        self.widgets[previous].widget.mouse_not_on_widget();
                    }
                }
                self.hovered = target;
                match target {
                    Some(i) => self.dispatch(i, event),
                    None => false,
                }
            }
            Event::MousePressed {
                button: MouseButton::Left,
                position,
            } => {
                let target = self.widget_at(*position);
                self.focused = target;
                self.captured = target;
                match target {
                    Some(i) => self.dispatch(i, event),
                    None => false,
                }
            }
            Event::MouseReleased {
                button: MouseButton::Left,
                position,
            } => {
                let target = self.widget_at(*position);
                self.captured = None;
                for (i, entry) in self.widgets.iter_mut().enumerate() {
                    if Some(i) != target {
                        entry.widget.mouse_no_longer_down();
                    }
                }
                match target {
                    Some(i) => self.dispatch(i, event),
                    None => false,
                }
            }
            Event::WheelScrolled { position, .. } => match self.widget_at(*position) {
                Some(i) => self.dispatch(i, event),
                None => false,
            },
            Event::KeyPressed(_) => match self.focused {
                Some(i) => self.dispatch(i, event),
                None => false,
            },
            Event::FocusLost => {
                self.captured = None;
                for i in 0..self.widgets.len() {
                    self.dispatch(i, event);
                }
                !self.widgets.is_empty()
            }
            Event::MousePressed { .. } | Event::MouseReleased { .. } => false,
        }
    }

    /// Next queued callback, oldest first.
    pub fn poll_callback(&mut self) -> Option<Callback> {
        self.callbacks.pop_front()
    }

    pub fn pending_callbacks(&self) -> usize {
        self.callbacks.len()
    }

    // =====================================================================
    // Drawing
    // =====================================================================

    /// Draw every widget, bottom first.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        for entry in &self.widgets {
            entry.widget.draw(surface);
        }
    }
}
