//! lcdtext core: font tables, glyph lookup and the display contract
//!
//! Text reaches the panel in three steps:
//!
//! 1. **Resolve** - a codepoint becomes a [`font::Glyph`] through its table
//! 2. **Rasterize** - a [`GlyphRenderer`] turns the glyph into pixel runs
//! 3. **Write** - runs land in a [`Framebuffer`], which the caller presents
//!
//! This crate owns the data side of that story: the three font table
//! variants ([`Font`]), RGB565 colors, the [`Framebuffer`] trait that display
//! drivers implement, and an in-memory [`Canvas565`] to render into.
//!
//! ```
//! use lcdtext_core::{font::BitmapFont, traits::FontTable};
//!
//! // 8x8 cells for ' '..='~', all blank
//! let font = BitmapFont::monospace(32, 126, 8, 8, vec![0u8; 95 * 8])?;
//! let glyph = font.resolve('H')?;
//! assert_eq!(glyph.width, 8);
//! # Ok::<(), lcdtext_core::LcdTextError>(())
//! ```

pub mod canvas;
pub mod color;
pub mod error;
pub mod font;
pub mod render_config;
pub mod traits;

pub use canvas::{Canvas565, CanvasOptions};
pub use color::Rgb565;
pub use error::{LcdTextError, Result};
pub use font::Font;
pub use traits::{FontTable, Framebuffer, GlyphRenderer};

/// A pixel position; may lie off-screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// How glyphs should look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub foreground: Rgb565,
    /// `None` leaves unset pixels untouched
    pub background: Option<Rgb565>,
    /// 255 writes colors as-is; lower values blend with what is already there
    pub opacity: u8,
}

impl TextStyle {
    pub const fn new(foreground: Rgb565, background: Option<Rgb565>) -> Self {
        Self {
            foreground,
            background,
            opacity: 255,
        }
    }

    /// Foreground only, background left as-is
    pub const fn transparent(foreground: Rgb565) -> Self {
        Self::new(foreground, None)
    }

    pub const fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(Rgb565::WHITE, Some(Rgb565::BLACK))
    }
}
