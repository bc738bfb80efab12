//! Texture assets.
//!
//! Widgets receive an [`AssetCache`] at construction and resolve skin images
//! through it. The cache is backed by a [`TextureProvider`] (files on disk or
//! an in-memory registry) and keeps decoded pixel data in an LRU so that
//! cloned widgets and widgets sharing a skin reuse the same buffers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lru::LruCache;

use crate::error::AssetError;
use crate::primitives::{IntRect, Size};

/// Default number of decoded images kept alive by the cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Decoded RGBA8 image.
#[derive(Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// A fully transparent image of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }
}

impl fmt::Debug for TextureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// A texture reference as used by widgets and the property surface.
///
/// `part` selects a sub-rectangle of the image (all zero = whole image),
/// `middle` is the stretchable centre for nine-slice drawing (all zero =
/// whole part).
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    id: String,
    data: Rc<TextureData>,
    part: IntRect,
    middle: IntRect,
    repeated: bool,
}

impl Texture {
    pub fn new(id: impl Into<String>, data: Rc<TextureData>) -> Self {
        Self {
            id: id.into(),
            data,
            part: IntRect::default(),
            middle: IntRect::default(),
            repeated: false,
        }
    }

    pub fn with_part(mut self, part: IntRect) -> Self {
        self.part = part;
        self
    }

    pub fn with_middle(mut self, middle: IntRect) -> Self {
        self.middle = middle;
        self
    }

    pub fn with_repeated(mut self, repeated: bool) -> Self {
        self.repeated = repeated;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &Rc<TextureData> {
        &self.data
    }

    pub fn part(&self) -> IntRect {
        self.part
    }

    pub fn middle(&self) -> IntRect {
        self.middle
    }

    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// Drawn size: the part rectangle when set, the whole image otherwise.
    pub fn size(&self) -> Size {
        if self.part.is_zero() {
            Size::new(self.data.width as f32, self.data.height as f32)
        } else {
            Size::new(self.part.width as f32, self.part.height as f32)
        }
    }

    /// True when `middle` covers something other than the whole image.
    pub fn has_custom_middle(&self) -> bool {
        let full = IntRect::new(0, 0, self.data.width as i32, self.data.height as i32);
        !self.middle.is_zero() && self.middle != full
    }
}

/// Source of decoded images.
pub trait TextureProvider {
    fn load(&self, path: &str) -> Result<TextureData, AssetError>;
}

/// Decodes image files below a root directory.
#[derive(Debug, Clone)]
pub struct FileTextureProvider {
    root: PathBuf,
}

impl FileTextureProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TextureProvider for FileTextureProvider {
    fn load(&self, path: &str) -> Result<TextureData, AssetError> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(AssetError::NotFound(full.display().to_string()));
        }
        let img = image::open(&full).map_err(|e| AssetError::Decode {
            path: full.display().to_string(),
            message: e.to_string(),
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(TextureData {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

/// In-memory image registry, for headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryTextureProvider {
    images: HashMap<String, TextureData>,
}

impl MemoryTextureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blank image of the given size under `path`.
    pub fn register(&mut self, path: impl Into<String>, width: u32, height: u32) {
        self.images.insert(path.into(), TextureData::blank(width, height));
    }

    pub fn insert(&mut self, path: impl Into<String>, data: TextureData) {
        self.images.insert(path.into(), data);
    }

    pub fn with_texture(mut self, path: impl Into<String>, width: u32, height: u32) -> Self {
        self.register(path, width, height);
        self
    }
}

impl TextureProvider for MemoryTextureProvider {
    fn load(&self, path: &str) -> Result<TextureData, AssetError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

/// LRU cache of decoded textures in front of a provider.
pub struct AssetCache {
    provider: Box<dyn TextureProvider>,
    cache: RefCell<LruCache<String, Rc<TextureData>>>,
}

impl AssetCache {
    pub fn new(provider: impl TextureProvider + 'static) -> Self {
        Self::with_capacity(provider, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(provider: impl TextureProvider + 'static, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            provider: Box::new(provider),
            cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// Resolve `path` to a texture, decoding it on a cache miss.
    pub fn texture(&self, path: &str) -> Result<Texture, AssetError> {
        if let Some(data) = self.cache.borrow_mut().get(path) {
            return Ok(Texture::new(path, Rc::clone(data)));
        }

        let data = match self.provider.load(path) {
            Ok(data) => Rc::new(data),
            Err(e) => {
                tracing::warn!(path, error = %e, "texture load failed");
                return Err(e);
            }
        };
        tracing::debug!(path, width = data.width, height = data.height, "texture loaded");
        self.cache.borrow_mut().put(path.to_string(), Rc::clone(&data));
        Ok(Texture::new(path, data))
    }

    /// Number of decoded images currently cached.
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}

impl fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetCache")
            .field("cached", &self.cached())
            .field("capacity", &self.cache.borrow().cap())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_cache() -> AssetCache {
        let provider = MemoryTextureProvider::new()
            .with_texture("skin/Arrow.png", 16, 16)
            .with_texture("skin/Track.png", 16, 32);
        AssetCache::with_capacity(provider, 1)
    }

    // =========================================================================
    // Cache
    // =========================================================================

    #[test]
    fn hit_shares_pixel_data() {
        let cache = memory_cache();
        let a = cache.texture("skin/Arrow.png").unwrap();
        let b = cache.texture("skin/Arrow.png").unwrap();
        assert!(Rc::ptr_eq(a.data(), b.data()));
        assert_eq!(cache.cached(), 1);
    }

    #[test]
    fn capacity_evicts_least_recent() {
        let cache = memory_cache();
        let a = cache.texture("skin/Arrow.png").unwrap();
        cache.texture("skin/Track.png").unwrap();
        assert_eq!(cache.cached(), 1);
        let again = cache.texture("skin/Arrow.png").unwrap();
        assert!(!Rc::ptr_eq(a.data(), again.data()));
    }

    #[test]
    fn missing_texture_is_not_found() {
        let cache = memory_cache();
        let err = cache.texture("nope.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert_eq!(cache.cached(), 0);
    }

    // =========================================================================
    // Texture
    // =========================================================================

    #[test]
    fn size_prefers_part() {
        let cache = memory_cache();
        let t = cache.texture("skin/Track.png").unwrap();
        assert_eq!(t.size(), Size::new(16.0, 32.0));
        let t = t.with_part(IntRect::new(0, 0, 8, 8));
        assert_eq!(t.size(), Size::new(8.0, 8.0));
    }

    #[test]
    fn custom_middle_detection() {
        let cache = memory_cache();
        let t = cache.texture("skin/Arrow.png").unwrap();
        assert!(!t.has_custom_middle());
        assert!(!t.clone().with_middle(IntRect::new(0, 0, 16, 16)).has_custom_middle());
        assert!(t.with_middle(IntRect::new(2, 2, 12, 12)).has_custom_middle());
    }

    // =========================================================================
    // File provider
    // =========================================================================

    #[test]
    fn file_provider_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(3, 5)
            .save(dir.path().join("thumb.png"))
            .unwrap();

        let provider = FileTextureProvider::new(dir.path());
        let data = provider.load("thumb.png").unwrap();
        assert_eq!((data.width, data.height), (3, 5));
        assert_eq!(data.pixels.len(), 3 * 5 * 4);
    }

    #[test]
    fn file_provider_reports_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"not a png").unwrap();

        let provider = FileTextureProvider::new(dir.path());
        assert!(matches!(provider.load("missing.png"), Err(AssetError::NotFound(_))));
        assert!(matches!(provider.load("bad.png"), Err(AssetError::Decode { .. })));
    }
}
