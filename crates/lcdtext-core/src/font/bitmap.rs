//! Packed 1..8 bit-per-pixel bitmap fonts

use super::{CodepointMap, Glyph, GlyphData};
use crate::error::{FontTableError, GlyphError};
use crate::traits::FontTable;

/// How offsets and rows address the bitmap blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphPacking {
    /// Byte offsets; every row starts on a byte boundary
    PaddedRows,
    /// Bit offsets into one continuous stream; rows are not padded
    BitStream,
}

/// Unvalidated parts of a bitmap font
#[derive(Debug, Clone)]
pub struct BitmapFontParts {
    pub map: CodepointMap,
    pub widths: Vec<u8>,
    pub offsets: Vec<u32>,
    pub bitmaps: Vec<u8>,
    pub bpp: u8,
    pub height: u16,
    pub max_width: u16,
    pub packing: GlyphPacking,
}

/// An immutable, validated bitmap font table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapFont {
    map: CodepointMap,
    widths: Vec<u8>,
    offsets: Vec<u32>,
    bitmaps: Vec<u8>,
    bpp: u8,
    height: u16,
    max_width: u16,
    packing: GlyphPacking,
}

impl BitmapFont {
    /// Fixed-cell font covering `first..=last`
    ///
    /// `blob` holds `(last - first + 1) * ceil(width / 8) * height` bytes,
    /// glyphs in codepoint order, rows MSB-first.
    pub fn monospace(
        first: u32,
        last: u32,
        width: u8,
        height: u16,
        blob: impl Into<Vec<u8>>,
    ) -> Result<Self, FontTableError> {
        let map = CodepointMap::range(first, last)?;
        let count = map.len();
        let stride = (width as usize).div_ceil(8) * height as usize;
        let bitmaps = blob.into();

        if bitmaps.len() != count * stride {
            return Err(FontTableError::BlobLengthMismatch {
                expected: count * stride,
                actual: bitmaps.len(),
            });
        }

        Self::from_parts(BitmapFontParts {
            map,
            widths: vec![width; count],
            offsets: (0..=count).map(|i| (i * stride) as u32).collect(),
            bitmaps,
            bpp: 1,
            height,
            max_width: width as u16,
            packing: GlyphPacking::PaddedRows,
        })
    }

    /// Validate parts into a font
    ///
    /// Every glyph span is checked to hold `height` rows of its width, so
    /// decoding never needs to look outside `[offsets[i], offsets[i + 1])`.
    pub fn from_parts(parts: BitmapFontParts) -> Result<Self, FontTableError> {
        let BitmapFontParts {
            map,
            widths,
            offsets,
            bitmaps,
            bpp,
            height,
            max_width,
            packing,
        } = parts;

        if !(1..=8).contains(&bpp) {
            return Err(FontTableError::InvalidBpp(bpp));
        }
        map.validate()?;
        if map.len() != widths.len() {
            return Err(FontTableError::MapLengthMismatch {
                map: map.len(),
                widths: widths.len(),
            });
        }
        if offsets.len() != widths.len() + 1 {
            return Err(FontTableError::OffsetCountMismatch {
                offsets: offsets.len(),
                expected: widths.len() + 1,
            });
        }

        let limit = match packing {
            GlyphPacking::PaddedRows => bitmaps.len(),
            GlyphPacking::BitStream => bitmaps.len() * 8,
        };

        for (index, &width) in widths.iter().enumerate() {
            if width as u16 > max_width {
                return Err(FontTableError::WidthExceedsMax {
                    index,
                    width: width as u16,
                    max_width,
                });
            }

            let (start, end) = (offsets[index] as usize, offsets[index + 1] as usize);
            if end < start {
                return Err(FontTableError::NonMonotonicOffsets { index: index + 1 });
            }
            if end > limit {
                return Err(FontTableError::OffsetOutOfBounds { index, end, limit });
            }

            let (needed, available) = match packing {
                GlyphPacking::PaddedRows => (
                    row_bytes(width, bpp) * height as usize * 8,
                    (end - start) * 8,
                ),
                GlyphPacking::BitStream => {
                    (width as usize * height as usize * bpp as usize, end - start)
                },
            };
            if available < needed {
                return Err(FontTableError::GlyphSpanTooShort {
                    index,
                    needed,
                    available,
                });
            }
        }

        log::debug!(
            "Loaded bitmap font: {} glyphs, {}px high, {} bpp, {:?}",
            widths.len(),
            height,
            bpp,
            packing
        );

        Ok(Self {
            map,
            widths,
            offsets,
            bitmaps,
            bpp,
            height,
            max_width,
            packing,
        })
    }

    pub fn map(&self) -> &CodepointMap {
        &self.map
    }

    pub fn widths(&self) -> &[u8] {
        &self.widths
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn bitmaps(&self) -> &[u8] {
        &self.bitmaps
    }

    pub fn bpp(&self) -> u8 {
        self.bpp
    }

    pub fn max_width(&self) -> u16 {
        self.max_width
    }

    pub fn packing(&self) -> GlyphPacking {
        self.packing
    }

    /// Pixel width of glyph `index`
    pub fn width_of(&self, index: usize) -> Option<u16> {
        self.widths.get(index).map(|&w| w as u16)
    }

    /// Packed data of glyph `index`
    ///
    /// Returns the bounded view the rasterizer decodes from.
    pub fn glyph_bits(&self, index: usize) -> Option<GlyphBits<'_>> {
        let width = self.width_of(index)?;
        let start = *self.offsets.get(index)? as usize;
        let end = *self.offsets.get(index + 1)? as usize;

        let (byte_start, byte_end, bit_start, bit_len) = match self.packing {
            GlyphPacking::PaddedRows => (start, end, 0, (end - start) * 8),
            GlyphPacking::BitStream => (start / 8, end.div_ceil(8), start % 8, end - start),
        };

        Some(GlyphBits {
            bytes: self.bitmaps.get(byte_start..byte_end)?,
            bit_start,
            bit_len,
            span_start: start as u32,
            span_end: end as u32,
            width,
            height: self.height,
            bpp: self.bpp,
            packing: self.packing,
        })
    }
}

impl FontTable for BitmapFont {
    fn height(&self) -> u16 {
        self.height
    }

    fn glyph_count(&self) -> usize {
        self.widths.len()
    }

    fn resolve(&self, ch: char) -> Result<Glyph<'_>, GlyphError> {
        let codepoint = u32::from(ch);
        let index = self.map.index_of(codepoint)?;
        let bits = self
            .glyph_bits(index)
            .ok_or(GlyphError::GlyphNotFound(codepoint))?;

        Ok(Glyph {
            index,
            codepoint: ch,
            width: bits.width,
            height: self.height,
            data: GlyphData::Bitmap(bits),
        })
    }
}

fn row_bytes(width: u8, bpp: u8) -> usize {
    (width as usize * bpp as usize).div_ceil(8)
}

/// Bounded view over one glyph's packed pixels
///
/// `bytes` is exactly the byte range covering `[offsets[i], offsets[i + 1])`;
/// reads past it return clear pixels instead of touching neighbours.
#[derive(Debug, Clone, Copy)]
pub struct GlyphBits<'f> {
    bytes: &'f [u8],
    bit_start: usize,
    bit_len: usize,
    span_start: u32,
    span_end: u32,
    pub width: u16,
    pub height: u16,
    pub bpp: u8,
    pub packing: GlyphPacking,
}

impl<'f> GlyphBits<'f> {
    /// The `[offsets[i], offsets[i + 1])` span in table units
    pub fn span(&self) -> std::ops::Range<u32> {
        self.span_start..self.span_end
    }

    /// Bytes this glyph may be decoded from
    pub fn bytes(&self) -> &'f [u8] {
        self.bytes
    }

    /// Pixel value at (`x`, `y`), `bpp` bits read MSB-first
    pub fn pixel(&self, x: u16, y: u16) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let bpp = self.bpp as usize;
        let pos = match self.packing {
            GlyphPacking::PaddedRows => {
                y as usize * row_bytes(self.width as u8, self.bpp) * 8 + x as usize * bpp
            },
            GlyphPacking::BitStream => (y as usize * self.width as usize + x as usize) * bpp,
        };

        (0..bpp).fold(0u8, |value, i| (value << 1) | self.bit(pos + i) as u8)
    }

    /// Whether (`x`, `y`) is foreground
    pub fn is_set(&self, x: u16, y: u16) -> bool {
        self.pixel(x, y) != 0
    }

    fn bit(&self, pos: usize) -> bool {
        if pos >= self.bit_len {
            return false;
        }
        let abs = self.bit_start + pos;
        self.bytes
            .get(abs / 8)
            .is_some_and(|byte| byte & (0x80 >> (abs % 8)) != 0)
    }
}
