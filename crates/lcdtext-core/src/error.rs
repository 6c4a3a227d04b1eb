//! Error types for lcdtext

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LcdTextError>;

/// Main error type for lcdtext
#[derive(Debug, Error)]
pub enum LcdTextError {
    #[error("Glyph lookup failed: {0}")]
    Glyph(#[from] GlyphError),

    #[error("Malformed font table: {0}")]
    MalformedFontTable(#[from] FontTableError),

    #[error("Buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("{renderer} renderer cannot draw {kind} glyphs")]
    UnsupportedGlyph {
        renderer: &'static str,
        kind: &'static str,
    },

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-glyph resolution errors
///
/// The layout engine recovers from these by skipping the glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlyphError {
    #[error("Codepoint U+{codepoint:04X} outside font range U+{first:04X}..=U+{last:04X}")]
    OutOfRange { codepoint: u32, first: u32, last: u32 },

    #[error("Codepoint U+{0:04X} not in font map")]
    GlyphNotFound(u32),
}

/// Structural problems found while loading a font table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontTableError {
    #[error("Offset table has {offsets} entries, expected {expected}")]
    OffsetCountMismatch { offsets: usize, expected: usize },

    #[error("Offsets decrease at glyph {index}")]
    NonMonotonicOffsets { index: usize },

    #[error("Glyph {index} ends at {end}, past the end of the bitmap data ({limit})")]
    OffsetOutOfBounds { index: usize, end: usize, limit: usize },

    #[error("Glyph {index} has {available} bits, needs {needed}")]
    GlyphSpanTooShort {
        index: usize,
        needed: usize,
        available: usize,
    },

    #[error("Glyph {index} is {width} pixels wide, font maximum is {max_width}")]
    WidthExceedsMax {
        index: usize,
        width: u16,
        max_width: u16,
    },

    #[error("Unsupported bits per pixel: {0}")]
    InvalidBpp(u8),

    #[error("Unsupported offset width: {0} bytes")]
    InvalidOffsetWidth(u8),

    #[error("Codepoint map has {map} entries but {widths} widths")]
    MapLengthMismatch { map: usize, widths: usize },

    #[error("Codepoint U+{0:04X} appears more than once")]
    DuplicateCodepoint(u32),

    #[error("Codepoint 0x{0:X} is not a Unicode scalar value")]
    InvalidCodepoint(u32),

    #[error("Codepoint map not sorted at U+{0:04X}")]
    UnsortedMap(u32),

    #[error("Empty codepoint range {first}..={last}")]
    EmptyRange { first: u32, last: u32 },

    #[error("Bitmap data is {actual} bytes, expected {expected}")]
    BlobLengthMismatch { expected: usize, actual: usize },

    #[error("Stroke data truncated in glyph {index}")]
    TruncatedStroke { index: usize },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Region {x},{y} {width}x{height} outside {canvas_width}x{canvas_height} canvas")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
