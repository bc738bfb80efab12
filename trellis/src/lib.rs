//! Trellis: a retained-mode widget toolkit
//!
//! Trellis keeps a tree of skinned widgets (list boxes, combo boxes, message
//! boxes, scrollbars) that a host application feeds with pointer and keyboard
//! events and asks to draw once per frame.
//!
//! # Architecture
//!
//! Widgets implement [`Widget`] and live in a [`Gui`] container, which routes
//! events, tracks pointer capture and queues [`Callback`]s. Drawing goes
//! through the [`DrawSurface`] trait; [`DrawList`] records primitives so the
//! host can hand them to whatever backend it uses.
//!
//! Every widget exposes its renderer properties through
//! [`RendererProperties`]. The [`Serializer`] and [`Deserializer`] turn those
//! values into text, which [`WidgetLoader`] uses to save and restore widget
//! files.
//!
//! ```ignore
//! use std::rc::Rc;
//! use trellis::{AssetCache, FileTextureProvider, Gui, WidgetLoader};
//!
//! let assets = AssetCache::new(FileTextureProvider::new("skins"));
//! let mut gui = Gui::new(Rc::new(assets));
//! WidgetLoader::default().load_file(&mut gui, "form.json")?;
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod event;

// Rendering
pub mod surface;
pub mod font;
pub mod assets;

// Widget system
pub mod widget;
pub mod property;
pub mod container;

// Widgets
pub mod scrollbar;
pub mod list_box;
pub mod combo_box;
pub mod message_box;

// Persistence
pub mod serializer;
pub mod deserializer;
pub mod loader;
pub mod config;

pub use assets::{AssetCache, FileTextureProvider, MemoryTextureProvider, Texture, TextureData, TextureProvider};
pub use combo_box::ComboBox;
pub use config::ToolkitConfig;
pub use container::{Callback, Gui};
pub use deserializer::Deserializer;
pub use error::{AssetError, LoadError, PropertyError};
pub use event::{Event, Key, MouseButton, ScrollDelta};
pub use font::{FontHandle, FontMetrics, MonospaceFont, default_font};
pub use list_box::{ListBox, ListBoxColors};
pub use loader::{WidgetFile, WidgetLoader, WidgetNode};
pub use message_box::{MessageBox, MessageBoxColors};
pub use primitives::{Borders, Color, IntRect, PixelSize, Point, Rect, Scale, Size, Transform};
pub use property::{PropertyValue, RendererProperties, ValueKind};
pub use scrollbar::Scrollbar;
pub use serializer::Serializer;
pub use surface::{DrawList, DrawSurface, Primitive};
pub use widget::{BoxedWidget, EventResult, Widget, WidgetEvent, WidgetExt};
