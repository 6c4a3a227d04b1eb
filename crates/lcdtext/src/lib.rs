//! lcdtext - bitmap and stroke font text for RGB565 displays
//!
//! Draws strings from compact font tables onto any [`Framebuffer`]:
//!
//! - **Monospace** bitmap fonts: fixed cells over a codepoint range
//! - **Proportional** bitmap fonts: per-glyph widths, 1-8 bits per pixel
//! - **Stroke** fonts: scalable Hershey polylines
//!
//! Layout measures, wraps and emits glyphs at a running cursor; the
//! rasterizers batch same-colored runs into `fill_area` calls. Nothing here
//! presents a frame: render as much as you like, then call
//! [`Framebuffer::present`] yourself.
//!
//! # Example
//!
//! ```
//! use lcdtext::prelude::*;
//!
//! let font = Font::Monospace(BitmapFont::monospace(32, 126, 8, 8, vec![0x18; 95 * 8])?);
//! let mut canvas = Canvas565::new(128, 32);
//!
//! let report = lcdtext::render_text(&font, "Hi", &mut canvas, Point::new(0, 0), &TextStyle::default())?;
//! assert_eq!(report.glyphs_drawn, 2);
//! canvas.present()?;
//! # Ok::<(), LcdTextError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `export` (default): PPM and PNG snapshots of a framebuffer region

pub use lcdtext_core::{
    canvas, color, error, font, render_config, traits, Canvas565, CanvasOptions, Font,
    FontTable, Framebuffer, GlyphRenderer, LcdTextError, Point, Result, Rgb565, TextStyle,
};

pub use lcdtext_layout as layout;
pub use lcdtext_render_bitmap as render_bitmap;
pub use lcdtext_render_stroke as render_stroke;

#[cfg(feature = "export")]
pub use lcdtext_export as export;

use lcdtext_layout::{EmitReport, LayoutConfig, LayoutEngine};

/// Common imports for typical usage
pub mod prelude {
    pub use lcdtext_core::{
        error::{LcdTextError, Result},
        font::{BitmapFont, CodepointMap, ProportionalTable, StrokeFont},
        traits::{FontTable, Framebuffer, GlyphRenderer},
        Canvas565, CanvasOptions, Font, Point, Rgb565, TextStyle,
    };
    pub use lcdtext_layout::{EmitReport, EmitStatus, LayoutConfig, LayoutEngine, WrapMode};
    pub use lcdtext_render_bitmap::BitmapRenderer;
    pub use lcdtext_render_stroke::StrokeRenderer;

    #[cfg(feature = "export")]
    pub use lcdtext_export::{Exporter, PngExporter, PnmExporter, Region};
}

/// Measure, wrap and emit `text` with the default layout
pub fn render_text(
    font: &Font,
    text: &str,
    target: &mut dyn Framebuffer,
    origin: Point,
    style: &TextStyle,
) -> Result<EmitReport> {
    render_text_with(LayoutConfig::default(), font, text, target, origin, style)
}

/// Measure, wrap and emit `text` with a custom layout
pub fn render_text_with(
    config: LayoutConfig,
    font: &Font,
    text: &str,
    target: &mut dyn Framebuffer,
    origin: Point,
    style: &TextStyle,
) -> Result<EmitReport> {
    LayoutEngine::new(config).render(font, text, target, origin, style)
}
