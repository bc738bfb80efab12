//! Toolkit error types.

use thiserror::Error;

use crate::property::ValueKind;

/// Failure to fetch or decode a texture.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to decode {path}: {message}")]
    Decode { path: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a load-style operation (widget skins, widget files, config).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("empty skin path")]
    EmptyPath,

    #[error("widget is not loaded")]
    NotLoaded,

    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown widget type: {0}")]
    UnknownWidgetType(String),

    #[error("property error: {0}")]
    Property(#[from] PropertyError),
}

/// Failure on the renderer property surface.
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("property {property} expects {expected:?}, got {found:?}")]
    WrongType {
        property: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("cannot parse {value:?} as {kind:?}")]
    Parse { kind: ValueKind, value: String },

    #[error("no serializer registered for {0:?}")]
    NoSerializer(ValueKind),

    #[error("{0:?} values cannot be deserialized")]
    Unsupported(ValueKind),

    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("cannot apply {property}: {source}")]
    Load {
        property: String,
        #[source]
        source: Box<LoadError>,
    },
}
