//! Widget files.
//!
//! A widget file is a JSON document listing widgets by type and name, with
//! their geometry, contents and serialized renderer properties:
//!
//! ```json
//! { "widgets": [
//!     { "type": "listbox", "name": "files", "position": [10, 10],
//!       "size": [200, 240], "item_height": 24, "scrollbar": "skins/bar",
//!       "items": ["a.txt", "b.txt"], "selected": 1,
//!       "renderer": { "BackgroundColor": "rgb(240, 240, 240)" } }
//! ] }
//! ```
//!
//! [`WidgetLoader`] maps type names to load functions, so hosts can register
//! their own widget types next to the built-in ones.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combo_box::ComboBox;
use crate::container::Gui;
use crate::error::{LoadError, PropertyError};
use crate::list_box::ListBox;
use crate::message_box::MessageBox;
use crate::primitives::Point;
use crate::property::ValueKind;
use crate::serializer::Serializer;
use crate::widget::{BoxedWidget, Widget, WidgetExt};

/// One widget in a widget file. Fields a widget type does not use are
/// left out when saving and ignored when loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetNode {
    #[serde(rename = "type")]
    pub widget_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrollbar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_to_display: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_items: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_size: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<String>,
    /// Renderer property name to serialized value, in table order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub renderer: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetFile {
    #[serde(default)]
    pub widgets: Vec<WidgetNode>,
}

/// Builds a widget from its node. The Gui supplies shared resources such as
/// the asset cache.
pub type LoadFn = fn(&WidgetNode, &Gui) -> Result<BoxedWidget, LoadError>;

#[derive(Debug, Clone)]
pub struct WidgetLoader {
    functions: HashMap<String, LoadFn>,
    serializer: Serializer,
}

impl Default for WidgetLoader {
    fn default() -> Self {
        let mut loader = Self {
            functions: HashMap::new(),
            serializer: Serializer::default(),
        };
        loader.set_load_function("listbox", load_list_box);
        loader.set_load_function("combobox", load_combo_box);
        loader.set_load_function("messagebox", load_message_box);
        loader
    }
}

impl WidgetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` for `widget_type` (case-insensitive).
    pub fn set_load_function(&mut self, widget_type: &str, function: LoadFn) {
        self.functions.insert(widget_type.to_ascii_lowercase(), function);
    }

    pub fn load_function(&self, widget_type: &str) -> Option<LoadFn> {
        self.functions.get(&widget_type.to_ascii_lowercase()).copied()
    }

    /// The serializer used for renderer properties when saving.
    pub fn serializer_mut(&mut self) -> &mut Serializer {
        &mut self.serializer
    }

    /// Build one widget from its node.
    pub fn load_node(&self, node: &WidgetNode, gui: &Gui) -> Result<BoxedWidget, LoadError> {
        let function = self
            .load_function(&node.widget_type)
            .ok_or_else(|| LoadError::UnknownWidgetType(node.widget_type.clone()))?;
        let mut widget = function(node, gui)?;
        if let Some([x, y]) = node.position {
            widget.set_position(Point::new(x, y));
        }
        Ok(widget)
    }

    /// Add every widget described by `json` to `gui`.
    ///
    /// All widgets are built before any is added, so a failing widget leaves
    /// `gui` untouched.
    pub fn load_str(&self, gui: &mut Gui, json: &str) -> Result<(), LoadError> {
        let file: WidgetFile = serde_json::from_str(json)?;
        let mut loaded = Vec::with_capacity(file.widgets.len());
        for node in &file.widgets {
            match self.load_node(node, gui) {
                Ok(widget) => loaded.push((node.name.clone(), widget)),
                Err(e) => {
                    tracing::warn!(name = %node.name, widget_type = %node.widget_type, error = %e, "widget failed to load");
                    return Err(e);
                }
            }
        }
        for (name, widget) in loaded {
            gui.add_boxed(name, widget);
        }
        Ok(())
    }

    pub fn load_file(&self, gui: &mut Gui, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        self.load_str(gui, &json)?;
        tracing::debug!(path = %path.display(), widgets = gui.len(), "loaded widget file");
        Ok(())
    }

    /// Describe `gui` as a widget file.
    pub fn save_nodes(&self, gui: &Gui) -> WidgetFile {
        let widgets = gui
            .widgets()
            .map(|(name, widget)| self.save_node(name, widget))
            .collect();
        WidgetFile { widgets }
    }

    fn save_node(&self, name: &str, widget: &dyn Widget) -> WidgetNode {
        let position = widget.position();
        let mut node = WidgetNode {
            widget_type: widget.widget_type().to_string(),
            name: name.to_string(),
            position: Some([position.x, position.y]),
            ..WidgetNode::default()
        };
        widget.save(&mut node);

        for (property, value) in widget.property_value_pairs() {
            match self.serializer.serialize(&value) {
                Ok(text) => {
                    node.renderer.insert(property, text);
                }
                // Unset values have nothing to persist.
                Err(PropertyError::NoSerializer(_)) => {}
                Err(e) => tracing::warn!(%name, %property, error = %e, "property not saved"),
            }
        }
        node
    }

    pub fn save(&self, gui: &Gui) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(&self.save_nodes(gui))?)
    }

    pub fn save_file(&self, gui: &Gui, path: impl AsRef<Path>) -> Result<(), LoadError> {
        std::fs::write(path, self.save(gui)?)?;
        Ok(())
    }
}

/// Apply a node's serialized renderer properties. Fonts have no textual
/// form and are skipped.
pub fn apply_renderer(widget: &mut dyn Widget, node: &WidgetNode) -> Result<(), LoadError> {
    for (name, value) in &node.renderer {
        match widget.set_property_str(name, value) {
            Ok(()) => {}
            Err(PropertyError::Unsupported(ValueKind::Font)) => {
                tracing::debug!(widget = %node.name, %name, "font property skipped");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn load_list_box(node: &WidgetNode, gui: &Gui) -> Result<BoxedWidget, LoadError> {
    let mut list = ListBox::new(Rc::clone(gui.assets()));
    // Borders first: they take part in snapping the height.
    apply_renderer(&mut list, node)?;

    let [width, height] = node.size.unwrap_or_else(|| {
        let size = list.size();
        [size.width as f32, size.height as f32]
    });
    list.load(
        width as u32,
        height as u32,
        node.scrollbar.as_deref().unwrap_or(""),
        node.item_height.unwrap_or(0),
    )?;

    if let Some(maximum) = node.maximum_items {
        list.set_maximum_items(maximum);
    }
    for item in &node.items {
        if list.add_item(item.as_str()) == 0 {
            tracing::warn!(widget = %node.name, %item, "item did not fit");
        }
    }
    if let Some(id) = node.selected {
        list.set_selected_item_id(id);
    }
    Ok(list.boxed())
}

fn load_combo_box(node: &WidgetNode, gui: &Gui) -> Result<BoxedWidget, LoadError> {
    let mut combo = ComboBox::new(Rc::clone(gui.assets()));
    apply_renderer(&mut combo, node)?;

    let skin = node.skin.as_deref().ok_or(LoadError::EmptyPath)?;
    let width = node.size.map_or(0, |[w, _]| w as u32);
    combo.load(
        skin,
        width,
        node.items_to_display.unwrap_or(1),
        node.scrollbar.as_deref().unwrap_or(""),
    )?;

    if let Some(maximum) = node.maximum_items {
        combo.set_maximum_items(maximum);
    }
    for item in &node.items {
        if combo.add_item(item.as_str()) == 0 {
            tracing::warn!(widget = %node.name, %item, "item did not fit");
        }
    }
    if let Some(id) = node.selected {
        combo.set_selected_item_id(id);
    }
    Ok(combo.boxed())
}

fn load_message_box(node: &WidgetNode, gui: &Gui) -> Result<BoxedWidget, LoadError> {
    let mut message_box = MessageBox::new();
    apply_renderer(&mut message_box, node)?;

    message_box.set_text_size(node.text_size.unwrap_or(gui.text_size()));
    if let Some(title) = &node.title {
        message_box.set_title(title.as_str());
    }
    if let Some(text) = &node.text {
        message_box.set_text(text.as_str());
    }
    for caption in &node.buttons {
        message_box.add_button(caption.as_str());
    }
    Ok(message_box.boxed())
}
