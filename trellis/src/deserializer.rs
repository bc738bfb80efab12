//! Property deserializer.
//!
//! The inverse of [`Serializer`](crate::serializer::Serializer): parses the
//! textual property forms back into [`PropertyValue`]s. Textures are resolved
//! through an [`AssetCache`], so a texture can only be parsed when one is
//! available. Fonts cannot be parsed at all.

use std::collections::HashMap;
use std::str::FromStr;

use crate::assets::AssetCache;
use crate::error::PropertyError;
use crate::primitives::{Borders, Color, IntRect};
use crate::property::{PropertyValue, ValueKind};

/// Parses one value of a known kind.
pub type DeserializeFn = fn(&str, Option<&AssetCache>) -> Result<PropertyValue, PropertyError>;

#[derive(Debug, Clone)]
pub struct Deserializer {
    functions: HashMap<ValueKind, DeserializeFn>,
}

impl Default for Deserializer {
    fn default() -> Self {
        let mut functions: HashMap<ValueKind, DeserializeFn> = HashMap::new();
        functions.insert(ValueKind::Color, deserialize_color);
        functions.insert(ValueKind::Borders, deserialize_borders);
        functions.insert(ValueKind::Texture, deserialize_texture);
        functions.insert(ValueKind::String, deserialize_string);
        functions.insert(ValueKind::Number, deserialize_number);
        Self { functions }
    }
}

impl Deserializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deserialize(
        &self,
        kind: ValueKind,
        value: &str,
        assets: Option<&AssetCache>,
    ) -> Result<PropertyValue, PropertyError> {
        let function = self.functions.get(&kind).ok_or(PropertyError::Unsupported(kind))?;
        function(value.trim(), assets)
    }

    /// Replace the function used for `kind`.
    pub fn set_function(&mut self, kind: ValueKind, function: DeserializeFn) {
        self.functions.insert(kind, function);
    }
}

fn parse_error(kind: ValueKind, value: &str) -> PropertyError {
    PropertyError::Parse {
        kind,
        value: value.to_string(),
    }
}

/// Comma-separated list of values.
fn parse_list<T: FromStr>(s: &str) -> Option<Vec<T>> {
    s.split(',').map(|part| part.trim().parse().ok()).collect()
}

/// Strip `prefix(` and the closing `)`.
fn call_args<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix)?.trim_start().strip_prefix('(')?.strip_suffix(')')
}

pub fn deserialize_color(value: &str, _: Option<&AssetCache>) -> Result<PropertyValue, PropertyError> {
    let err = || parse_error(ValueKind::Color, value);
    let lower = value.to_ascii_lowercase();

    let color = if let Some(args) = call_args(&lower, "rgba") {
        match parse_list::<u8>(args).as_deref() {
            Some(&[r, g, b, a]) => Color::rgba(r, g, b, a),
            _ => return Err(err()),
        }
    } else if let Some(args) = call_args(&lower, "rgb") {
        match parse_list::<u8>(args).as_deref() {
            Some(&[r, g, b]) => Color::rgb(r, g, b),
            _ => return Err(err()),
        }
    } else if let Some(hex) = lower.strip_prefix('#') {
        parse_hex(hex).ok_or_else(err)?
    } else {
        match lower.as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "blue" => Color::BLUE,
            "transparent" => Color::TRANSPARENT,
            _ => return Err(err()),
        }
    };
    Ok(color.into())
}

/// `RRGGBB` or `RRGGBBAA`.
fn parse_hex(hex: &str) -> Option<Color> {
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let a = if hex.len() == 8 { byte(6)? } else { 255 };
    Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
}

/// `(l, t, r, b)`, or a single number for all four edges.
pub fn deserialize_borders(value: &str, _: Option<&AssetCache>) -> Result<PropertyValue, PropertyError> {
    let inner = value
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(value);
    match parse_list::<u32>(inner).as_deref() {
        Some(&[all]) => Ok(Borders::uniform(all).into()),
        Some(&[left, top, right, bottom]) => Ok(Borders::new(left, top, right, bottom).into()),
        _ => Err(parse_error(ValueKind::Borders, value)),
    }
}

/// A quoted string with escapes, or the bare text.
pub fn deserialize_string(value: &str, _: Option<&AssetCache>) -> Result<PropertyValue, PropertyError> {
    match value.strip_prefix('"') {
        Some(rest) => {
            let (text, tail) = unquote(rest).ok_or_else(|| parse_error(ValueKind::String, value))?;
            if !tail.trim().is_empty() {
                return Err(parse_error(ValueKind::String, value));
            }
            Ok(PropertyValue::String(text))
        }
        None => Ok(PropertyValue::String(value.to_string())),
    }
}

/// Read up to the closing quote of a string whose opening quote was already
/// consumed. Returns the unescaped text and what follows the quote.
fn unquote(s: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((out, &s[i + 1..])),
            '\\' => match chars.next()?.1 {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                other => out.push(other),
            },
            c => out.push(c),
        }
    }
    None
}

pub fn deserialize_number(value: &str, _: Option<&AssetCache>) -> Result<PropertyValue, PropertyError> {
    value
        .parse::<f32>()
        .map(PropertyValue::Number)
        .map_err(|_| parse_error(ValueKind::Number, value))
}

/// `"id"[ Part(x, y, w, h)][ Middle(x, y, w, h)][ Repeat]`
pub fn deserialize_texture(value: &str, assets: Option<&AssetCache>) -> Result<PropertyValue, PropertyError> {
    let assets = assets.ok_or(PropertyError::Unsupported(ValueKind::Texture))?;
    let err = || parse_error(ValueKind::Texture, value);

    let (id, mut rest) = value.strip_prefix('"').and_then(unquote).ok_or_else(err)?;
    if id.is_empty() {
        return Err(err());
    }

    let mut part = IntRect::default();
    let mut middle = IntRect::default();
    let mut repeated = false;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if let Some(tail) = rest.strip_prefix("Repeat") {
            repeated = true;
            rest = tail;
            continue;
        }
        let (keyword, target) = if rest.starts_with("Part") {
            ("Part", &mut part)
        } else if rest.starts_with("Middle") {
            ("Middle", &mut middle)
        } else {
            return Err(err());
        };
        let close = rest.find(')').ok_or_else(err)?;
        let args = call_args(&rest[..=close], keyword).ok_or_else(err)?;
        match parse_list::<i32>(args).as_deref() {
            Some(&[left, top, width, height]) => *target = IntRect::new(left, top, width, height),
            _ => return Err(err()),
        }
        rest = &rest[close + 1..];
    }

    let texture = assets
        .texture(&id)?
        .with_part(part)
        .with_middle(middle)
        .with_repeated(repeated);
    Ok(texture.into())
}
