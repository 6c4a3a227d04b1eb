//! The converted proportional font layout
//!
//! Converted font modules carry these constants:
//!
//! | name           | contents                                             |
//! |----------------|------------------------------------------------------|
//! | `MAP`          | UTF-8 string, one codepoint per glyph, glyph order    |
//! | `BPP`          | bits per pixel                                       |
//! | `HEIGHT`       | glyph height in pixels                               |
//! | `MAX_WIDTH`    | widest glyph                                         |
//! | `WIDTHS`       | one byte per glyph                                   |
//! | `OFFSET_WIDTH` | bytes per offset entry (1..=3)                       |
//! | `OFFSETS`      | big-endian bit offsets into `BITMAPS`, glyphs + 1     |
//! | `BITMAPS`      | continuous MSB-first bit stream, rows not padded     |

use super::{BitmapFont, BitmapFontParts, CodepointMap, GlyphPacking};
use crate::error::FontTableError;
use crate::traits::FontTable;

/// Raw constants of a converted proportional font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProportionalTable {
    pub map: String,
    pub bpp: u8,
    pub height: u16,
    pub max_width: u16,
    pub widths: Vec<u8>,
    pub offset_width: u8,
    pub offsets: Vec<u8>,
    pub bitmaps: Vec<u8>,
}

impl ProportionalTable {
    /// Decode and validate into a [`BitmapFont`]
    pub fn parse(&self) -> Result<BitmapFont, FontTableError> {
        let width = self.offset_width as usize;
        if !(1..=3).contains(&width) {
            return Err(FontTableError::InvalidOffsetWidth(self.offset_width));
        }
        if self.offsets.len() % width != 0 {
            return Err(FontTableError::OffsetCountMismatch {
                offsets: self.offsets.len() / width,
                expected: self.widths.len() + 1,
            });
        }

        let offsets = self
            .offsets
            .chunks_exact(width)
            .map(|entry| entry.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
            .collect();

        BitmapFont::from_parts(BitmapFontParts {
            map: CodepointMap::from_map_str(&self.map)?,
            widths: self.widths.clone(),
            offsets,
            bitmaps: self.bitmaps.clone(),
            bpp: self.bpp,
            height: self.height,
            max_width: self.max_width,
            packing: GlyphPacking::BitStream,
        })
    }
}

impl BitmapFont {
    /// Encode into the converted proportional layout
    ///
    /// Bit-stream fonts are copied through unchanged; padded-row fonts are
    /// repacked glyph by glyph. The smallest offset width that can hold the
    /// final offset is chosen.
    pub fn to_proportional_table(&self) -> Result<ProportionalTable, FontTableError> {
        let (offsets, bitmaps) = match self.packing() {
            GlyphPacking::BitStream => (self.offsets().to_vec(), self.bitmaps().to_vec()),
            GlyphPacking::PaddedRows => self.repack_as_stream(),
        };

        let last = offsets.last().copied().unwrap_or(0);
        let offset_width: u8 = match last {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            0x1_0000..=0xFF_FFFF => 3,
            _ => return Err(FontTableError::InvalidOffsetWidth(4)),
        };

        let offset_bytes = offsets
            .iter()
            .flat_map(|&o| {
                let be = o.to_be_bytes();
                be[4 - offset_width as usize..].to_vec()
            })
            .collect();

        let map = self
            .map()
            .codepoints()
            .into_iter()
            .map(|cp| char::from_u32(cp).ok_or(FontTableError::InvalidCodepoint(cp)))
            .collect::<Result<String, _>>()?;

        Ok(ProportionalTable {
            map,
            bpp: self.bpp(),
            height: self.height(),
            max_width: self.max_width(),
            widths: self.widths().to_vec(),
            offset_width,
            offsets: offset_bytes,
            bitmaps,
        })
    }

    fn repack_as_stream(&self) -> (Vec<u32>, Vec<u8>) {
        let mut writer = BitWriter::default();
        let mut offsets = Vec::with_capacity(self.glyph_count() + 1);

        for index in 0..self.glyph_count() {
            offsets.push(writer.len as u32);
            let Some(bits) = self.glyph_bits(index) else {
                continue;
            };
            for y in 0..bits.height {
                for x in 0..bits.width {
                    writer.push(bits.pixel(x, y), bits.bpp);
                }
            }
        }
        offsets.push(writer.len as u32);

        (offsets, writer.bytes)
    }
}

#[derive(Default)]
struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    fn push(&mut self, value: u8, bits: u8) {
        for i in (0..bits).rev() {
            if self.len % 8 == 0 {
                self.bytes.push(0);
            }
            if (value >> i) & 1 == 1 {
                if let Some(byte) = self.bytes.last_mut() {
                    *byte |= 0x80 >> (self.len % 8);
                }
            }
            self.len += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::GlyphData;

    /// Output of the font converter for a two glyph, 3px high font:
    ///
    /// ```text
    /// 'i' (1 wide)  'v' (3 wide)
    ///  #             # . #
    ///  .             # . #
    ///  #             . # .
    /// ```
    fn converted() -> ProportionalTable {
        ProportionalTable {
            map: "iv".into(),
            bpp: 1,
            height: 3,
            max_width: 3,
            widths: vec![1, 3],
            offset_width: 2,
            offsets: vec![0x00, 0x00, 0x00, 0x03, 0x00, 0x0C],
            // 101 | 101101010 -> 1011 0110 1010 ....
            bitmaps: vec![0b1011_0110, 0b1010_0000],
        }
    }

    fn rows(font: &BitmapFont, ch: char) -> Vec<String> {
        let glyph = font.resolve(ch).unwrap();
        let GlyphData::Bitmap(bits) = glyph.data else {
            panic!("expected bitmap glyph");
        };
        (0..bits.height)
            .map(|y| {
                (0..bits.width)
                    .map(|x| if bits.is_set(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_parse_known_good_fixture() {
        let font = converted().parse().unwrap();
        assert_eq!(font.glyph_count(), 2);
        assert_eq!(font.offsets(), &[0, 3, 12]);
        assert_eq!(rows(&font, 'i'), vec!["#", ".", "#"]);
        assert_eq!(rows(&font, 'v'), vec!["#.#", "#.#", ".#."]);
    }

    #[test]
    fn test_round_trip_preserves_glyphs() {
        let table = converted();
        let font = table.parse().unwrap();
        assert_eq!(font.to_proportional_table().unwrap(), ProportionalTable {
            offset_width: 1,
            offsets: vec![0, 3, 12],
            ..table.clone()
        });

        let again = font.to_proportional_table().unwrap().parse().unwrap();
        assert_eq!(again.widths(), font.widths());
        assert_eq!(again.bitmaps(), font.bitmaps());
        assert_eq!(again.offsets(), font.offsets());
    }

    #[test]
    fn test_three_byte_offsets() {
        let mut table = converted();
        table.offset_width = 3;
        table.offsets = vec![0, 0, 0, 0, 0, 3, 0, 0, 12];
        let font = table.parse().unwrap();
        assert_eq!(font.offsets(), &[0, 3, 12]);
    }

    #[test]
    fn test_monospace_repacks_to_stream() {
        // 2x2 cells: '!' = #./.#
        let mono = BitmapFont::monospace(33, 33, 2, 2, vec![0x80, 0x40]).unwrap();
        let table = mono.to_proportional_table().unwrap();
        assert_eq!(table.map, "!");
        assert_eq!(table.offsets, vec![0, 4]);
        assert_eq!(table.bitmaps, vec![0b1001_0000]);

        let font = table.parse().unwrap();
        assert_eq!(rows(&font, '!'), vec!["#.", ".#"]);
    }

    #[test]
    fn test_bad_offset_width() {
        let mut table = converted();
        table.offset_width = 4;
        assert_eq!(table.parse().unwrap_err(), FontTableError::InvalidOffsetWidth(4));
    }

    #[test]
    fn test_ragged_offsets() {
        let mut table = converted();
        table.offsets.pop();
        assert!(matches!(
            table.parse().unwrap_err(),
            FontTableError::OffsetCountMismatch { .. }
        ));
    }
}
