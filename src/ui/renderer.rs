//! Reel rendering
//!
//! Implements reel drawing with tiny-skia. Layout calculation is separated
//! from rasterization so the geometry of a frame can be tested without
//! touching pixels.

use tiny_skia::{Color, FilterQuality, Paint, Pixmap, PixmapPaint, Rect as SkiaRect, Transform};

use crate::app::controller::FrameSnapshot;
use crate::domain::core::Rect;
use crate::domain::reels::REEL_COUNT;
use crate::ui::textures::SymbolAtlas;

/// Fraction of a reel cell covered by its symbol
const SYMBOL_SCALE: f32 = 0.7;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidCanvasDimensions { width: i32, height: i32 },
}

/// A single symbol drawn as a square textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolQuad {
    pub reel: usize,
    pub symbol: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Vertical displacement in symbol heights, in `[-1, 1)`
    pub offset_factor: f32,
}

/// Pre-calculated geometry for one frame
#[derive(Debug, Clone)]
pub struct ReelLayout {
    pub quads: Vec<SymbolQuad>,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl ReelLayout {
    /// Lays out the reels of `frame` on a canvas of the given size
    ///
    /// A settled reel shows one symbol. While cycles remain each reel shows
    /// the current symbol sliding down and the next one entering from above.
    pub fn from_frame(frame: &FrameSnapshot, canvas: Rect) -> Self {
        let mut layout = Self {
            quads: Vec::new(),
            canvas_width: canvas.w.max(0) as f32,
            canvas_height: canvas.h.max(0) as f32,
        };

        if canvas.is_empty() || frame.symbol_count == 0 {
            return layout;
        }

        let slot_width = layout.canvas_width / REEL_COUNT as f32;
        let slot_height = layout.canvas_height;
        let symbol_size = slot_width.min(slot_height) * SYMBOL_SCALE;
        let x_padding = (slot_width - symbol_size) / 2.0;
        let y_center = slot_height / 2.0;

        for (reel, &symbol) in frame.symbols.iter().enumerate() {
            let x = reel as f32 * slot_width + x_padding;
            let mut push = |symbol: usize, offset_factor: f32| {
                layout.quads.push(SymbolQuad {
                    reel,
                    symbol,
                    x,
                    y: y_center - symbol_size / 2.0 + offset_factor * symbol_size,
                    size: symbol_size,
                    offset_factor,
                });
            };

            if frame.remaining_cycles > 0 {
                let animated = symbol as f32 + frame.rotation_offset;
                let base = animated.floor();
                let fraction = animated - base;
                push(base as usize % frame.symbol_count, fraction);
                push(animated.ceil() as usize % frame.symbol_count, fraction - 1.0);
            } else {
                push(symbol, 0.0);
            }
        }

        layout
    }
}

/// Software reel renderer using tiny-skia
#[derive(Debug)]
pub struct ReelRenderer {
    background: Color,
    placeholder_palette: Vec<Color>,
}

impl ReelRenderer {
    pub fn new() -> Self {
        Self {
            background: Color::from_rgba(0.15, 0.15, 0.15, 1.0).unwrap_or(Color::BLACK),
            placeholder_palette: vec![
                Color::from_rgba8(214, 69, 65, 255),
                Color::from_rgba8(241, 196, 15, 255),
                Color::from_rgba8(46, 204, 113, 255),
                Color::from_rgba8(52, 152, 219, 255),
            ],
        }
    }

    /// Render a reel layout to a pixmap
    pub fn render_layout(&self, layout: &ReelLayout, atlas: &SymbolAtlas) -> Result<Pixmap, RendererError> {
        let width = layout.canvas_width as u32;
        let height = layout.canvas_height as u32;
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidCanvasDimensions {
                width: width as i32,
                height: height as i32,
            });
        }

        let mut pixmap = Pixmap::new(width, height).ok_or(RendererError::PixmapCreationFailed)?;
        pixmap.fill(self.background);

        for quad in &layout.quads {
            match atlas.texture(quad.symbol) {
                Some(texture) => self.draw_texture(&mut pixmap, quad, texture),
                None => self.draw_placeholder(&mut pixmap, quad),
            }
        }

        Ok(pixmap)
    }

    fn draw_texture(&self, pixmap: &mut Pixmap, quad: &SymbolQuad, texture: &Pixmap) {
        let scale_x = quad.size / texture.width() as f32;
        let scale_y = quad.size / texture.height() as f32;
        let transform = Transform::from_scale(scale_x, scale_y).post_translate(quad.x, quad.y);

        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };

        pixmap.draw_pixmap(0, 0, texture.as_ref(), &paint, transform, None);
    }

    fn draw_placeholder(&self, pixmap: &mut Pixmap, quad: &SymbolQuad) {
        let Some(rect) = SkiaRect::from_xywh(quad.x, quad.y, quad.size, quad.size) else {
            return;
        };

        let mut paint = Paint::default();
        let color = self.placeholder_palette[quad.symbol % self.placeholder_palette.len()];
        paint.set_color(color);

        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Converts a rendered pixmap to the BGRA byte order GDI expects
    pub fn pixmap_to_bgra(&self, pixmap: &Pixmap) -> Vec<u8> {
        let mut data = pixmap.data().to_vec();
        for pixel in data.chunks_exact_mut(4) {
            pixel.swap(0, 2);
        }
        data
    }
}

impl Default for ReelRenderer {
    fn default() -> Self {
        Self::new()
    }
}
