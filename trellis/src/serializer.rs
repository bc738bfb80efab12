//! Property serializer.
//!
//! Converts [`PropertyValue`]s to the textual forms used by widget files and
//! themes. Each [`ValueKind`] maps to a plain function that can be replaced
//! with [`Serializer::set_function`].

use std::collections::HashMap;

use crate::error::PropertyError;
use crate::primitives::IntRect;
use crate::property::{PropertyValue, ValueKind};

/// Formats one value of a known kind.
pub type SerializeFn = fn(&PropertyValue) -> Result<String, PropertyError>;

/// Fonts have no textual form yet.
pub const FONT_PLACEHOLDER: &str = "FONT_PLACEHOLDER";

#[derive(Debug, Clone)]
pub struct Serializer {
    functions: HashMap<ValueKind, SerializeFn>,
}

impl Default for Serializer {
    fn default() -> Self {
        let mut functions: HashMap<ValueKind, SerializeFn> = HashMap::new();
        functions.insert(ValueKind::Color, serialize_color);
        functions.insert(ValueKind::Borders, serialize_borders);
        functions.insert(ValueKind::Texture, serialize_texture);
        functions.insert(ValueKind::Font, serialize_font);
        functions.insert(ValueKind::String, serialize_string);
        functions.insert(ValueKind::Number, serialize_number);
        Self { functions }
    }
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(&self, value: &PropertyValue) -> Result<String, PropertyError> {
        let kind = value.kind();
        let function = self.functions.get(&kind).ok_or(PropertyError::NoSerializer(kind))?;
        function(value)
    }

    /// Replace the function used for `kind`.
    pub fn set_function(&mut self, kind: ValueKind, function: SerializeFn) {
        self.functions.insert(kind, function);
    }

    pub fn function(&self, kind: ValueKind) -> Option<SerializeFn> {
        self.functions.get(&kind).copied()
    }
}

fn mismatch(expected: ValueKind, value: &PropertyValue) -> PropertyError {
    PropertyError::WrongType {
        property: String::new(),
        expected,
        found: value.kind(),
    }
}

fn rect_args(rect: IntRect) -> String {
    format!("({}, {}, {}, {})", rect.left, rect.top, rect.width, rect.height)
}

pub fn serialize_color(value: &PropertyValue) -> Result<String, PropertyError> {
    let c = value.as_color().ok_or_else(|| mismatch(ValueKind::Color, value))?;
    if c.a < 255 {
        Ok(format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a))
    } else {
        Ok(format!("rgb({}, {}, {})", c.r, c.g, c.b))
    }
}

pub fn serialize_borders(value: &PropertyValue) -> Result<String, PropertyError> {
    let b = value.as_borders().ok_or_else(|| mismatch(ValueKind::Borders, value))?;
    Ok(format!("({}, {}, {}, {})", b.left, b.top, b.right, b.bottom))
}

/// `"id"[ Part(..)][ Middle(..)][Repeat]`
pub fn serialize_texture(value: &PropertyValue) -> Result<String, PropertyError> {
    let PropertyValue::Texture(texture) = value else {
        return Err(mismatch(ValueKind::Texture, value));
    };

    let mut out = format!("\"{}\"", texture.id());
    if !texture.part().is_zero() {
        out.push_str(" Part");
        out.push_str(&rect_args(texture.part()));
    }
    if texture.has_custom_middle() {
        out.push_str(" Middle");
        out.push_str(&rect_args(texture.middle()));
    }
    if texture.is_repeated() {
        out.push_str("Repeat");
    }
    Ok(out)
}

pub fn serialize_font(value: &PropertyValue) -> Result<String, PropertyError> {
    match value {
        PropertyValue::Font(_) => Ok(FONT_PLACEHOLDER.to_string()),
        other => Err(mismatch(ValueKind::Font, other)),
    }
}

pub fn serialize_string(value: &PropertyValue) -> Result<String, PropertyError> {
    let s = value.as_str().ok_or_else(|| mismatch(ValueKind::String, value))?;
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    Ok(out)
}

pub fn serialize_number(value: &PropertyValue) -> Result<String, PropertyError> {
    let n = value.as_number().ok_or_else(|| mismatch(ValueKind::Number, value))?;
    Ok(n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::assets::{Texture, TextureData};
    use crate::font::default_font;
    use crate::primitives::{Borders, Color};

    fn texture() -> Texture {
        Texture::new("skin/Arrow.png", Rc::new(TextureData::blank(16, 16)))
    }

    #[test]
    fn colors_omit_opaque_alpha() {
        let s = Serializer::new();
        assert_eq!(s.serialize(&Color::rgba(255, 0, 0, 255).into()).unwrap(), "rgb(255, 0, 0)");
        assert_eq!(
            s.serialize(&Color::rgba(255, 0, 0, 128).into()).unwrap(),
            "rgba(255, 0, 0, 128)"
        );
    }

    #[test]
    fn borders() {
        let s = Serializer::new();
        assert_eq!(s.serialize(&Borders::new(1, 2, 3, 4).into()).unwrap(), "(1, 2, 3, 4)");
    }

    #[test]
    fn texture_suffixes_only_when_set() {
        let s = Serializer::new();
        assert_eq!(s.serialize(&texture().into()).unwrap(), "\"skin/Arrow.png\"");

        let full = texture().with_middle(IntRect::new(0, 0, 16, 16));
        assert_eq!(s.serialize(&full.into()).unwrap(), "\"skin/Arrow.png\"");

        let custom = texture()
            .with_part(IntRect::new(0, 0, 8, 8))
            .with_middle(IntRect::new(2, 2, 4, 4))
            .with_repeated(true);
        assert_eq!(
            s.serialize(&custom.into()).unwrap(),
            "\"skin/Arrow.png\" Part(0, 0, 8, 8) Middle(2, 2, 4, 4)Repeat"
        );
    }

    #[test]
    fn font_is_a_placeholder() {
        let s = Serializer::new();
        assert_eq!(s.serialize(&default_font().into()).unwrap(), FONT_PLACEHOLDER);
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        let s = Serializer::new();
        assert_eq!(s.serialize(&"a \"b\"\n".into()).unwrap(), r#""a \"b\"\n""#);
    }

    #[test]
    fn numbers_use_shortest_form() {
        let s = Serializer::new();
        assert_eq!(s.serialize(&PropertyValue::Number(3.0)).unwrap(), "3");
        assert_eq!(s.serialize(&PropertyValue::Number(0.5)).unwrap(), "0.5");
    }

    #[test]
    fn none_has_no_serializer() {
        let s = Serializer::new();
        assert!(matches!(
            s.serialize(&PropertyValue::None),
            Err(PropertyError::NoSerializer(ValueKind::None))
        ));
    }

    #[test]
    fn functions_can_be_replaced() {
        fn hex(value: &PropertyValue) -> Result<String, PropertyError> {
            let c = value.as_color().unwrap_or_default();
            Ok(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
        }

        let mut s = Serializer::new();
        s.set_function(ValueKind::Color, hex);
        assert_eq!(s.serialize(&Color::RED.into()).unwrap(), "#ff0000");
        assert!(s.function(ValueKind::None).is_none());
    }
}
