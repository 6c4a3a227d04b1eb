//! Text layout: measure, wrap, emit
//!
//! [`LayoutEngine`] turns a string into glyph renders on a [`Framebuffer`].
//! A full [`render`](LayoutEngine::render) call walks three phases:
//!
//! 1. **Measuring** - total advance of the string
//! 2. **Wrapping** - break it into [`Line`]s no wider than the page
//! 3. **Emitting** - resolve and rasterize each glyph at a running cursor
//!
//! Glyphs the font cannot resolve never abort a call. They are logged,
//! skipped, and advance the cursor by [`LayoutConfig::fallback_advance`].
//! When the page runs out of rows, emission stops and reports where to
//! resume; whether to clear and restart or wait is the caller's decision.
//!
//! The engine never calls [`Framebuffer::present`].
//!
//! ```
//! use lcdtext_core::{font::BitmapFont, Canvas565, Font, Point, TextStyle};
//! use lcdtext_layout::{EmitStatus, LayoutEngine};
//!
//! let font = Font::Monospace(BitmapFont::monospace(32, 126, 8, 8, vec![0xFF; 95 * 8])?);
//! let mut canvas = Canvas565::new(64, 16);
//!
//! let report = LayoutEngine::default()
//!     .render(&font, "Hello", &mut canvas, Point::new(0, 0), &TextStyle::default())?;
//! assert_eq!(report.status, EmitStatus::Complete);
//! assert_eq!(report.glyphs_drawn, 5);
//! # Ok::<(), lcdtext_core::LcdTextError>(())
//! ```

mod config;
mod cursor;
pub mod wrap;

pub use config::{LayoutConfig, WrapMode};
pub use cursor::{LayoutCursor, LayoutPhase};
pub use wrap::Line;

use lcdtext_core::{
    error::Result,
    traits::{FontTable, Framebuffer, GlyphRenderer},
    Font, Point, TextStyle,
};
use lcdtext_render_bitmap::BitmapRenderer;
use lcdtext_render_stroke::StrokeRenderer;

/// How an emit call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// Every line was emitted
    Complete,
    /// The next row would pass the page height
    PageFull {
        /// Byte offset into the source text of the first glyph not emitted
        resume_at: usize,
    },
}

/// Outcome of one emit call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitReport {
    pub status: EmitStatus,
    pub glyphs_drawn: usize,
    /// Glyphs the font could not resolve
    pub glyphs_skipped: usize,
    /// Cursor after the last glyph
    pub cursor: LayoutCursor,
}

/// Measures, wraps and emits text with one configuration
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    config: LayoutConfig,
    bitmap: BitmapRenderer,
    stroke: StrokeRenderer,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            bitmap: BitmapRenderer::new(),
            stroke: StrokeRenderer::new().with_size(config.size),
        }
    }

    /// Force run coalescing on or off for both rasterizers
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.bitmap = self.bitmap.with_coalescing(enabled);
        self.stroke = self.stroke.with_coalescing(enabled);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Pixel advance of `ch`, or the fallback when the font lacks it
    pub fn advance(&self, font: &Font, ch: char) -> u32 {
        match font.resolve(ch) {
            Ok(glyph) => font.advance(&glyph, self.config.size),
            Err(e) => {
                log::debug!("Skipping glyph: {}", e);
                self.config.fallback_advance
            },
        }
    }

    /// Row pitch: font height plus line spacing
    pub fn line_height(&self, font: &Font) -> u32 {
        font.line_height(self.config.size)
            .saturating_add(self.config.line_spacing)
    }

    /// Total advance of `text`
    pub fn measure(&self, font: &Font, text: &str) -> u32 {
        wrap::measure_with(text, |ch| self.advance(font, ch))
    }

    /// Break `text` into lines no wider than `max_width`
    ///
    /// A single glyph (or in [`WrapMode::Word`], a single word) wider than
    /// `max_width` overflows its own line.
    pub fn wrap<'a>(&self, font: &Font, text: &'a str, max_width: u32) -> Vec<Line<'a>> {
        let advance = |ch| self.advance(font, ch);
        match self.config.wrap_mode {
            WrapMode::Glyph => wrap::wrap_glyphs(text, max_width, advance),
            WrapMode::Word => wrap::wrap_words(text, max_width, advance),
        }
    }

    /// Page size for a render at `origin`
    pub fn bounds(&self, target: &dyn Framebuffer, origin: Point) -> (u32, u32) {
        let width = self
            .config
            .max_width
            .unwrap_or_else(|| target.width().saturating_sub(origin.x.max(0) as u32));
        let height = self
            .config
            .max_height
            .unwrap_or_else(|| target.height().saturating_sub(origin.y.max(0) as u32));
        (width, height)
    }

    /// Rasterize already-wrapped lines, one row each
    ///
    /// In [`WrapMode::Glyph`] a line that is still too wide continues on the
    /// next row.
    pub fn emit(
        &self,
        font: &Font,
        lines: &[Line<'_>],
        target: &mut dyn Framebuffer,
        origin: Point,
        style: &TextStyle,
    ) -> Result<EmitReport> {
        let (max_width, max_height) = self.bounds(target, origin);
        let glyph_height = font.line_height(self.config.size);
        let renderer = self.renderer_for(font);
        // Stroke coordinates are centred on their design origin
        let shift = match font {
            Font::Stroke(_) => (glyph_height / 2) as i32,
            Font::Monospace(_) | Font::Proportional(_) => 0,
        };

        let mut cursor = LayoutCursor::new(self.line_height(font), max_width, max_height);
        let mut drawn = 0;
        let mut skipped = 0;

        let page_full = |resume_at: usize,
                         cursor: LayoutCursor,
                         drawn: usize,
                         skipped: usize|
         -> Result<EmitReport> {
            log::debug!(
                "Page full after {} glyphs, resume at byte {}",
                drawn,
                resume_at
            );
            Ok(EmitReport {
                status: EmitStatus::PageFull { resume_at },
                glyphs_drawn: drawn,
                glyphs_skipped: skipped,
                cursor,
            })
        };

        for (n, line) in lines.iter().enumerate() {
            if n > 0 {
                cursor.new_line();
            }
            if !cursor.row_fits(glyph_height) {
                return page_full(line.start, cursor, drawn, skipped);
            }

            for (i, ch) in line.text.char_indices() {
                let glyph = match font.resolve(ch) {
                    Ok(glyph) => glyph,
                    Err(e) => {
                        log::debug!("Skipping glyph: {}", e);
                        skipped += 1;
                        cursor.advance(self.config.fallback_advance);
                        continue;
                    },
                };

                let advance = font.advance(&glyph, self.config.size);
                if self.config.wrap_mode == WrapMode::Glyph && !cursor.fits(advance) {
                    cursor.new_line();
                    if !cursor.row_fits(glyph_height) {
                        return page_full(line.start + i, cursor, drawn, skipped);
                    }
                }

                let mut at = cursor.position(origin);
                at.y += shift;
                renderer.render_glyph(&glyph, target, at, style)?;
                cursor.advance(advance);
                drawn += 1;
            }
        }

        Ok(EmitReport {
            status: EmitStatus::Complete,
            glyphs_drawn: drawn,
            glyphs_skipped: skipped,
            cursor,
        })
    }

    /// Measure, wrap and emit `text` with its top-left corner at `origin`
    pub fn render(
        &self,
        font: &Font,
        text: &str,
        target: &mut dyn Framebuffer,
        origin: Point,
        style: &TextStyle,
    ) -> Result<EmitReport> {
        log::debug!("{}: {} bytes with {} font", LayoutPhase::Measuring, text.len(), font.kind());
        let width = self.measure(font, text);

        let (max_width, _) = self.bounds(target, origin);
        log::debug!("{}: {}px into {}px lines", LayoutPhase::Wrapping, width, max_width);
        let fits = width <= max_width && !text.is_empty() && !text.contains('\n');
        let lines = if fits && self.config.wrap_mode == WrapMode::Glyph {
            vec![Line {
                start: 0,
                text,
                width,
            }]
        } else {
            self.wrap(font, text, max_width)
        };

        log::debug!("{}: {} lines", LayoutPhase::Emitting, lines.len());
        self.emit(font, &lines, target, origin, style)
    }

    fn renderer_for(&self, font: &Font) -> &dyn GlyphRenderer {
        match font {
            Font::Monospace(_) | Font::Proportional(_) => &self.bitmap,
            Font::Stroke(_) => &self.stroke,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcdtext_core::font::{BitmapFont, BitmapFontParts, CodepointMap, GlyphPacking};

    /// MAP="AB", WIDTHS=[5,7], one row tall
    fn ab_font() -> Font {
        let font = BitmapFont::from_parts(BitmapFontParts {
            map: CodepointMap::from_map_str("AB").unwrap(),
            widths: vec![5, 7],
            offsets: vec![0, 5, 12],
            bitmaps: vec![0xFF, 0xF0],
            bpp: 1,
            height: 1,
            max_width: 7,
            packing: GlyphPacking::BitStream,
        })
        .unwrap();
        Font::Proportional(font)
    }

    fn texts<'a>(lines: &[Line<'a>]) -> Vec<&'a str> {
        lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_measure_proportional() {
        let engine = LayoutEngine::default();
        let font = ab_font();
        assert_eq!(engine.measure(&font, ""), 0);
        assert_eq!(engine.measure(&font, "AB"), 12);
        assert_eq!(engine.measure(&font, "BBA"), 19);
    }

    #[test]
    fn test_wrap_proportional() {
        let engine = LayoutEngine::default();
        let font = ab_font();
        assert_eq!(texts(&engine.wrap(&font, "AB", 12)), vec!["AB"]);
        assert_eq!(texts(&engine.wrap(&font, "AB", 6)), vec!["A", "B"]);
    }

    #[test]
    fn test_unresolvable_glyph_uses_fallback() {
        let font = ab_font();
        assert_eq!(LayoutEngine::default().measure(&font, "AzB"), 12);

        let engine = LayoutEngine::new(LayoutConfig::default().with_fallback_advance(3));
        assert_eq!(engine.measure(&font, "AzB"), 15);
    }

    #[test]
    fn test_line_height_includes_spacing() {
        let font = ab_font();
        let engine = LayoutEngine::new(LayoutConfig::default().with_line_spacing(2));
        assert_eq!(engine.line_height(&font), 3);
    }

    #[test]
    fn test_bounds_default_to_framebuffer() {
        let canvas = lcdtext_core::Canvas565::new(100, 50);
        let engine = LayoutEngine::default();
        assert_eq!(engine.bounds(&canvas, Point::new(10, 20)), (90, 30));
        assert_eq!(engine.bounds(&canvas, Point::new(-5, 0)), (100, 50));

        let engine = LayoutEngine::new(LayoutConfig::default().with_max_width(40).with_max_height(8));
        assert_eq!(engine.bounds(&canvas, Point::new(10, 20)), (40, 8));
    }

    #[test]
    fn test_render_of_fitting_text_matches_wrapped_emit() {
        let font = ab_font();
        let style = TextStyle::default();
        for mode in [WrapMode::Glyph, WrapMode::Word] {
            let engine = LayoutEngine::new(LayoutConfig::default().with_wrap_mode(mode));
            for text in ["AB", " A B ", "A\nB", "AzB"] {
                let mut rendered = lcdtext_core::Canvas565::new(40, 3);
                let report = engine
                    .render(&font, text, &mut rendered, Point::new(0, 0), &style)
                    .unwrap();

                let mut emitted = lcdtext_core::Canvas565::new(40, 3);
                let lines = engine.wrap(&font, text, 40);
                let expected = engine
                    .emit(&font, &lines, &mut emitted, Point::new(0, 0), &style)
                    .unwrap();

                assert_eq!(report, expected, "{:?} {:?}", mode, text);
                assert_eq!(rendered.pixels(), emitted.pixels(), "{:?} {:?}", mode, text);
            }
        }
    }
}
