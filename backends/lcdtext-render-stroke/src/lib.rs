//! Stroke renderer: Hershey polylines scaled onto the panel
//!
//! A stroke glyph is a list of pen positions in design units. The renderer
//! scales each position by its size, shifts it so the glyph's left edge sits
//! at the origin, and joins consecutive positions with 1-pixel lines. A
//! pen-up marker ends one polyline; the next position starts a new one.
//!
//! Strokes only paint the foreground. The style's background is ignored.

pub mod line;

use lcdtext_core::{
    error::{LcdTextError, Result},
    font::{scale_round, Glyph, GlyphData, StrokeGlyph},
    render_config,
    traits::{Framebuffer, GlyphRenderer},
    Point, TextStyle,
};

pub use line::{draw_line, Pen};

/// Renders [`GlyphData::Strokes`] glyphs at a fixed scale
#[derive(Debug, Clone, Copy)]
pub struct StrokeRenderer {
    size: f32,
    coalesce: Option<bool>,
}

impl Default for StrokeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeRenderer {
    /// Renderer at design size (scale 1.0)
    pub fn new() -> Self {
        Self {
            size: 1.0,
            coalesce: None,
        }
    }

    /// Scale factor applied to every design coordinate
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Force span coalescing on or off for this renderer
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce = Some(enabled);
        self
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Pixel advance of a stroke glyph at this renderer's size
    pub fn advance(&self, glyph: &StrokeGlyph) -> u32 {
        scale_round(glyph.width as f32, self.size).max(0) as u32
    }

    /// Pixel-space segments of `glyph` with its left edge at `origin`
    pub fn segments<'g>(
        &self,
        glyph: &'g StrokeGlyph,
        origin: Point,
    ) -> impl Iterator<Item = (Point, Point)> + 'g {
        let size = self.size;
        let left = scale_round(glyph.left as f32, size);
        let place = move |(x, y): (i16, i16)| {
            Point::new(
                origin.x + scale_round(x as f32, size) - left,
                origin.y + scale_round(y as f32, size),
            )
        };
        glyph
            .segments()
            .map(move |(from, to)| (place(from), place(to)))
    }

    /// Draw a stroke glyph and return its advance
    pub fn draw_strokes(
        &self,
        glyph: &StrokeGlyph,
        target: &mut dyn Framebuffer,
        origin: Point,
        style: &TextStyle,
    ) -> u32 {
        let pen = Pen {
            color: style.foreground,
            opacity: style.opacity,
            coalesce: self
                .coalesce
                .unwrap_or_else(render_config::is_coalescing_enabled),
        };
        for (from, to) in self.segments(glyph, origin) {
            draw_line(target, from, to, &pen);
        }
        self.advance(glyph)
    }
}

impl GlyphRenderer for StrokeRenderer {
    fn name(&self) -> &'static str {
        "stroke"
    }

    fn render_glyph(
        &self,
        glyph: &Glyph<'_>,
        target: &mut dyn Framebuffer,
        origin: Point,
        style: &TextStyle,
    ) -> Result<u32> {
        let GlyphData::Strokes(strokes) = glyph.data else {
            return Err(LcdTextError::UnsupportedGlyph {
                renderer: self.name(),
                kind: "bitmap",
            });
        };

        log::trace!(
            "StrokeRenderer: U+{:04X} x{} at {},{}",
            glyph.codepoint as u32,
            self.size,
            origin.x,
            origin.y
        );

        Ok(self.draw_strokes(strokes, target, origin, style))
    }
}
