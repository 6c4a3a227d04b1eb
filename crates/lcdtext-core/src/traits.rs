//! The contracts between font tables, rasterizers and the display
//!
//! - [`Framebuffer`] - The display collaborator that receives pixels
//! - [`FontTable`] - Glyph lookup shared by every font variant
//! - [`GlyphRenderer`] - Turns one resolved glyph into framebuffer writes

use crate::{
    error::{GlyphError, Result},
    font::Glyph,
    color::Rgb565,
    Point, TextStyle,
};

/// Where rendered pixels end up
///
/// This is the display driver boundary. Coordinates are signed so that
/// glyphs partially off-screen can be clipped (or wrapped) by the
/// implementation rather than by every caller.
///
/// ```ignore
/// struct Panel {
///     pixels: Vec<u16>,
/// }
///
/// impl Framebuffer for Panel {
///     fn width(&self) -> u32 { 320 }
///     fn height(&self) -> u32 { 170 }
///     fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
///         // store into pixels, ignoring out-of-range writes
///     }
///     fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
///         // read back for alpha blending
///         None
///     }
/// }
/// ```
pub trait Framebuffer {
    /// Visible width in pixels
    fn width(&self) -> u32;

    /// Visible height in pixels
    fn height(&self) -> u32;

    /// Write one pixel; out-of-range coordinates are the implementation's call
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565);

    /// Fill a rectangle with one color
    ///
    /// Rasterizers batch same-colored runs through this call, so drivers with
    /// a fast rectangle path should override it.
    fn fill_area(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb565) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Read back one pixel, needed only for alpha blending
    fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb565>;

    /// Push staged pixels to the panel
    ///
    /// Rendering never calls this; callers batch several render calls and
    /// present once.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Glyph lookup that every font variant provides
pub trait FontTable: Send + Sync {
    /// Design height in pixels (bitmap) or font units (stroke)
    fn height(&self) -> u16;

    /// Number of glyphs in the table
    fn glyph_count(&self) -> usize;

    /// Map a codepoint to its glyph
    ///
    /// Fails with [`GlyphError::OutOfRange`] for contiguous tables and
    /// [`GlyphError::GlyphNotFound`] for sparse ones.
    fn resolve(&self, ch: char) -> std::result::Result<Glyph<'_>, GlyphError>;
}

/// Draws resolved glyphs
pub trait GlyphRenderer: Send + Sync {
    /// Used in logs and error messages
    fn name(&self) -> &'static str;

    /// Draw `glyph` positioned at `origin` and return its advance in pixels
    ///
    /// Bitmap glyphs treat `origin` as their top-left corner; stroke glyphs
    /// treat it as the pen origin of their design grid.
    fn render_glyph(
        &self,
        glyph: &Glyph<'_>,
        target: &mut dyn Framebuffer,
        origin: Point,
        style: &TextStyle,
    ) -> Result<u32>;
}
