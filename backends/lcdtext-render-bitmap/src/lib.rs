//! Bitmap renderer: packed glyph rows straight onto the panel
//!
//! Bitmap glyphs are already pixels, so rendering is decoding. Every row of
//! a glyph becomes a handful of same-colored runs: opaque runs go to the
//! framebuffer as single `fill_area` calls, translucent ones are blended
//! pixel by pixel against what the panel already shows.
//!
//! ```ignore
//! let renderer = BitmapRenderer::new();
//! let glyph = font.resolve('H')?;
//! let advance = renderer.render_glyph(&glyph, &mut canvas, Point::new(0, 0), &style)?;
//! ```

pub mod rasterizer;

use lcdtext_core::{
    error::{LcdTextError, Result},
    font::{Glyph, GlyphBits, GlyphData},
    render_config,
    traits::{Framebuffer, GlyphRenderer},
    Point, Rgb565, TextStyle,
};

pub use rasterizer::{rasterize_into, row_runs, Run};

/// Renders [`GlyphData::Bitmap`] glyphs
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapRenderer {
    /// Overrides the global coalescing switch when set
    coalesce: Option<bool>,
}

impl BitmapRenderer {
    pub fn new() -> Self {
        Self { coalesce: None }
    }

    /// Force run coalescing on or off for this renderer
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce = Some(enabled);
        self
    }

    fn coalescing(&self) -> bool {
        self.coalesce
            .unwrap_or_else(render_config::is_coalescing_enabled)
    }

    /// Draw decoded bits with their top-left corner at `origin`
    pub fn draw_bits(
        &self,
        bits: &GlyphBits<'_>,
        target: &mut dyn Framebuffer,
        origin: Point,
        style: &TextStyle,
    ) {
        let coalesce = self.coalescing();

        for y in 0..bits.height {
            let py = origin.y + y as i32;
            for run in row_runs(*bits, y, *style) {
                let Some(color) = run.color else {
                    continue;
                };
                let px = origin.x + run.x as i32;

                if style.opacity < 255 {
                    for dx in 0..run.len as i32 {
                        blend_pixel(target, px + dx, py, color, style.opacity);
                    }
                } else if coalesce && run.len > 1 {
                    target.fill_area(px, py, run.len as u32, 1, color);
                } else {
                    for dx in 0..run.len as i32 {
                        target.set_pixel(px + dx, py, color);
                    }
                }
            }
        }
    }
}

/// Blend `color` over the pixel already at (`x`, `y`)
///
/// Pixels the framebuffer cannot read back are off-screen and skipped.
fn blend_pixel(target: &mut dyn Framebuffer, x: i32, y: i32, color: Rgb565, opacity: u8) {
    if let Some(existing) = target.get_pixel(x, y) {
        target.set_pixel(x, y, Rgb565::blend(color, existing, opacity));
    }
}

impl GlyphRenderer for BitmapRenderer {
    fn name(&self) -> &'static str {
        "bitmap"
    }

    fn render_glyph(
        &self,
        glyph: &Glyph<'_>,
        target: &mut dyn Framebuffer,
        origin: Point,
        style: &TextStyle,
    ) -> Result<u32> {
        let GlyphData::Bitmap(bits) = &glyph.data else {
            return Err(LcdTextError::UnsupportedGlyph {
                renderer: self.name(),
                kind: "stroke",
            });
        };

        log::trace!(
            "BitmapRenderer: U+{:04X} {}x{} at {},{}",
            glyph.codepoint as u32,
            bits.width,
            bits.height,
            origin.x,
            origin.y
        );

        self.draw_bits(bits, target, origin, style);
        Ok(glyph.width as u32)
    }
}
