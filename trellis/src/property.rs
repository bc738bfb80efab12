//! Renderer properties.
//!
//! Every widget exposes its visual settings through a string-keyed property
//! surface: typed [`PropertyValue`]s in and out, or serialized strings in.
//! Names are matched case-insensitively against a per-widget table; unknown
//! names and values of the wrong kind are errors, never silent defaults.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::assets::{AssetCache, Texture};
use crate::deserializer::Deserializer;
use crate::error::PropertyError;
use crate::font::FontHandle;
use crate::primitives::{Borders, Color};

/// The kind of a [`PropertyValue`], used as the serializer dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    None,
    Color,
    Borders,
    Texture,
    Font,
    String,
    Number,
}

/// A typed property value.
#[derive(Clone)]
pub enum PropertyValue {
    None,
    Color(Color),
    Borders(Borders),
    Texture(Texture),
    Font(FontHandle),
    String(String),
    Number(f32),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::None => ValueKind::None,
            PropertyValue::Color(_) => ValueKind::Color,
            PropertyValue::Borders(_) => ValueKind::Borders,
            PropertyValue::Texture(_) => ValueKind::Texture,
            PropertyValue::Font(_) => ValueKind::Font,
            PropertyValue::String(_) => ValueKind::String,
            PropertyValue::Number(_) => ValueKind::Number,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropertyValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_borders(&self) -> Option<Borders> {
        match self {
            PropertyValue::Borders(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::None => f.write_str("None"),
            PropertyValue::Color(c) => f.debug_tuple("Color").field(c).finish(),
            PropertyValue::Borders(b) => f.debug_tuple("Borders").field(b).finish(),
            PropertyValue::Texture(t) => f.debug_tuple("Texture").field(&t.id()).finish(),
            PropertyValue::Font(_) => f.write_str("Font(..)"),
            PropertyValue::String(s) => f.debug_tuple("String").field(s).finish(),
            PropertyValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::None, PropertyValue::None) => true,
            (PropertyValue::Color(a), PropertyValue::Color(b)) => a == b,
            (PropertyValue::Borders(a), PropertyValue::Borders(b)) => a == b,
            (PropertyValue::Texture(a), PropertyValue::Texture(b)) => a == b,
            (PropertyValue::Font(a), PropertyValue::Font(b)) => Rc::ptr_eq(a, b),
            (PropertyValue::String(a), PropertyValue::String(b)) => a == b,
            (PropertyValue::Number(a), PropertyValue::Number(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Color> for PropertyValue {
    fn from(c: Color) -> Self {
        PropertyValue::Color(c)
    }
}

impl From<Borders> for PropertyValue {
    fn from(b: Borders) -> Self {
        PropertyValue::Borders(b)
    }
}

impl From<Texture> for PropertyValue {
    fn from(t: Texture) -> Self {
        PropertyValue::Texture(t)
    }
}

impl From<FontHandle> for PropertyValue {
    fn from(f: FontHandle) -> Self {
        PropertyValue::Font(f)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

/// A widget's property table: canonical names and the kind each accepts.
pub type PropertyTable = &'static [(&'static str, ValueKind)];

/// Resolve `name` case-insensitively to its canonical table entry.
pub fn lookup(table: PropertyTable, name: &str) -> Result<(&'static str, ValueKind), PropertyError> {
    table
        .iter()
        .find(|(canonical, _)| canonical.eq_ignore_ascii_case(name))
        .copied()
        .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))
}

/// The property get/set surface of a widget.
///
/// Implementors provide the table plus typed read/write of canonical
/// names; name resolution, kind checking and string parsing are shared.
pub trait RendererProperties {
    fn property_table(&self) -> PropertyTable;

    /// Store a value whose name and kind were already validated.
    fn write_property(&mut self, name: &'static str, value: PropertyValue) -> Result<(), PropertyError>;

    /// Read a property by canonical name.
    fn read_property(&self, name: &'static str) -> PropertyValue;

    /// Asset cache used to resolve textures given as strings.
    fn texture_source(&self) -> Option<&AssetCache> {
        None
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), PropertyError> {
        let (canonical, kind) = lookup(self.property_table(), name)?;
        if value.kind() != kind {
            return Err(PropertyError::WrongType {
                property: canonical.to_string(),
                expected: kind,
                found: value.kind(),
            });
        }
        self.write_property(canonical, value)
    }

    /// Parse `value` according to the property's kind, then set it.
    fn set_property_str(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let (canonical, kind) = lookup(self.property_table(), name)?;
        let parsed = Deserializer::default().deserialize(kind, value, self.texture_source())?;
        self.write_property(canonical, parsed)
    }

    fn property(&self, name: &str) -> Result<PropertyValue, PropertyError> {
        let (canonical, _) = lookup(self.property_table(), name)?;
        Ok(self.read_property(canonical))
    }

    /// Snapshot of every property, in table order.
    fn property_value_pairs(&self) -> IndexMap<String, PropertyValue> {
        self.property_table()
            .iter()
            .map(|&(name, _)| (name.to_string(), self.read_property(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::default_font;

    const TABLE: PropertyTable = &[
        ("BackgroundColor", ValueKind::Color),
        ("Borders", ValueKind::Borders),
    ];

    #[derive(Default)]
    struct Swatch {
        background: Color,
        borders: Borders,
    }

    impl RendererProperties for Swatch {
        fn property_table(&self) -> PropertyTable {
            TABLE
        }

        fn write_property(&mut self, name: &'static str, value: PropertyValue) -> Result<(), PropertyError> {
            match (name, value) {
                ("BackgroundColor", PropertyValue::Color(c)) => self.background = c,
                ("Borders", PropertyValue::Borders(b)) => self.borders = b,
                (name, _) => return Err(PropertyError::UnknownProperty(name.to_string())),
            }
            Ok(())
        }

        fn read_property(&self, name: &'static str) -> PropertyValue {
            match name {
                "BackgroundColor" => self.background.into(),
                "Borders" => self.borders.into(),
                _ => PropertyValue::None,
            }
        }
    }

    #[test]
    fn names_are_case_insensitive() {
        let mut s = Swatch::default();
        s.set_property("backgroundcolor", Color::RED.into()).unwrap();
        assert_eq!(s.property("BACKGROUNDCOLOR").unwrap(), PropertyValue::Color(Color::RED));
    }

    #[test]
    fn unknown_name_is_an_error() {
        let mut s = Swatch::default();
        assert!(matches!(
            s.set_property("Nope", Color::RED.into()),
            Err(PropertyError::UnknownProperty(_))
        ));
        assert!(matches!(s.property("Nope"), Err(PropertyError::UnknownProperty(_))));
    }

    #[test]
    fn wrong_kind_is_an_error() {
        let mut s = Swatch::default();
        let err = s.set_property("Borders", Color::RED.into()).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::WrongType {
                expected: ValueKind::Borders,
                found: ValueKind::Color,
                ..
            }
        ));
    }

    #[test]
    fn string_values_are_parsed() {
        let mut s = Swatch::default();
        s.set_property_str("Borders", "(1, 2, 3, 4)").unwrap();
        assert_eq!(s.borders, Borders::new(1, 2, 3, 4));
        assert!(s.set_property_str("BackgroundColor", "purple-ish").is_err());
    }

    #[test]
    fn snapshot_keeps_table_order() {
        let s = Swatch::default();
        let keys: Vec<_> = s.property_value_pairs().keys().cloned().collect();
        assert_eq!(keys, ["BackgroundColor", "Borders"]);
    }

    #[test]
    fn fonts_compare_by_identity() {
        let a = default_font();
        let b = default_font();
        assert_eq!(PropertyValue::Font(a.clone()), PropertyValue::Font(a));
        assert_ne!(PropertyValue::Font(b), PropertyValue::Font(default_font()));
    }
}
