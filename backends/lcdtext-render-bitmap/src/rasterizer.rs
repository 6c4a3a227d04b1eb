//! Packed rows to colored runs
//!
//! Each glyph row is decoded into maximal runs of one outcome: paint a
//! color, or leave the pixel alone (transparent background). Runs are what
//! the renderer hands to the framebuffer.

use lcdtext_core::{
    error::{LcdTextError, Result},
    font::GlyphBits,
    Rgb565, TextStyle,
};

/// A horizontal stretch of one glyph row with a single outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Column inside the glyph
    pub x: u16,
    pub len: u16,
    /// `None` when the pixels are skipped
    pub color: Option<Rgb565>,
}

/// What one pixel becomes under `style`
#[inline]
pub fn pixel_color(set: bool, style: &TextStyle) -> Option<Rgb565> {
    if set {
        Some(style.foreground)
    } else {
        style.background
    }
}

/// Decode row `y` of a glyph into runs
pub fn row_runs(bits: GlyphBits<'_>, y: u16, style: TextStyle) -> impl Iterator<Item = Run> + '_ {
    let width = bits.width;
    let mut x = 0u16;
    std::iter::from_fn(move || {
        if x >= width {
            return None;
        }
        let start = x;
        let color = pixel_color(bits.is_set(x, y), &style);
        x += 1;
        while x < width && pixel_color(bits.is_set(x, y), &style) == color {
            x += 1;
        }
        Some(Run {
            x: start,
            len: x - start,
            color,
        })
    })
}

/// Rasterize one glyph into a caller-owned row-major buffer
///
/// `out` must hold at least `width * height` pixels. Skipped pixels keep
/// their value; blended pixels mix against it.
pub fn rasterize_into(bits: &GlyphBits<'_>, out: &mut [u16], style: &TextStyle) -> Result<()> {
    let width = bits.width as usize;
    let needed = width * bits.height as usize;
    if out.len() < needed {
        return Err(LcdTextError::BufferTooSmall {
            needed,
            actual: out.len(),
        });
    }

    for y in 0..bits.height {
        let row = &mut out[y as usize * width..(y as usize + 1) * width];
        for run in row_runs(*bits, y, *style) {
            let Some(color) = run.color else {
                continue;
            };
            for px in &mut row[run.x as usize..(run.x + run.len) as usize] {
                *px = Rgb565::blend(color, Rgb565(*px), style.opacity).raw();
            }
        }
    }
    Ok(())
}
