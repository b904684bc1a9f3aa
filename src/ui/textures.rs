//! Symbol textures
//!
//! Symbol images are decoded once at startup into premultiplied tiny-skia
//! pixmaps. Loading stops at the first file that cannot be read; the window
//! reports the error and falls back to a placeholder atlas.

use std::path::{Path, PathBuf};

use tiny_skia::{ColorU8, Pixmap};

/// Texture loading errors
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("Failed to load symbol texture {}: {}", path.display(), source)]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Symbol texture {} has no pixels", path.display())]
    EmptyImage { path: PathBuf },
}

/// One texture slot per symbol index
#[derive(Debug, Clone)]
pub struct SymbolAtlas {
    textures: Vec<Option<Pixmap>>,
}

impl SymbolAtlas {
    /// Loads every symbol image in order, aborting on the first failure
    pub fn load(paths: &[PathBuf]) -> Result<Self, TextureError> {
        let mut textures = Vec::with_capacity(paths.len());
        for path in paths {
            let pixmap = decode_symbol(path)?;
            tracing::debug!(path = %path.display(), width = pixmap.width(), height = pixmap.height(), "loaded symbol texture");
            textures.push(Some(pixmap));
        }

        Ok(Self { textures })
    }

    /// Atlas without any textures; every symbol renders as a placeholder
    pub fn placeholder(symbol_count: usize) -> Self {
        Self {
            textures: vec![None; symbol_count],
        }
    }

    /// Texture for a symbol, `None` when it has to be drawn as a placeholder
    pub fn texture(&self, symbol: usize) -> Option<&Pixmap> {
        self.textures.get(symbol).and_then(Option::as_ref)
    }

    pub fn symbol_count(&self) -> usize {
        self.textures.len()
    }

    /// True if any symbol lacks a texture
    pub fn is_degraded(&self) -> bool {
        self.textures.iter().any(Option::is_none)
    }
}

/// Decodes an image file into a premultiplied RGBA pixmap
pub fn decode_symbol(path: &Path) -> Result<Pixmap, TextureError> {
    let image = image::open(path).map_err(|source| TextureError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = image.to_rgba8();

    let mut pixmap = Pixmap::new(rgba.width(), rgba.height()).ok_or_else(|| TextureError::EmptyImage {
        path: path.to_path_buf(),
    })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Ok(pixmap)
}
