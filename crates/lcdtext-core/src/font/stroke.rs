//! Hershey-style stroke fonts

use super::{CodepointMap, Glyph, GlyphData};
use crate::error::{FontTableError, GlyphError};
use crate::traits::FontTable;

/// First codepoint covered by a Hershey `INDEX`
pub const HERSHEY_FIRST: u32 = 32;
/// Last codepoint covered by a Hershey `INDEX`
pub const HERSHEY_LAST: u32 = 127;

/// Every Hershey coordinate byte is stored relative to `'R'`
const HERSHEY_BIAS: i16 = 0x52;
/// An `x` byte of `' '` marks a pen-up pair
const HERSHEY_PEN_UP: u8 = b' ';

/// One step of a stroke glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokePoint {
    /// Pen position in design units
    To { x: i16, y: i16 },
    /// Lift the pen; the next point starts a new stroke
    PenUp,
}

/// Geometry and metrics of one stroke glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeGlyph {
    /// Design-space x of the glyph's left edge
    pub left: i16,
    /// Nominal advance in design units
    pub width: u16,
    pub points: Vec<StrokePoint>,
}

impl StrokeGlyph {
    pub fn new(width: u16, points: Vec<StrokePoint>) -> Self {
        Self {
            left: 0,
            width,
            points,
        }
    }

    /// Consecutive in-stroke point pairs, never bridging a pen-up
    pub fn segments(&self) -> impl Iterator<Item = ((i16, i16), (i16, i16))> + '_ {
        self.points.windows(2).filter_map(|pair| match (pair[0], pair[1]) {
            (StrokePoint::To { x: x0, y: y0 }, StrokePoint::To { x: x1, y: y1 }) => {
                Some(((x0, y0), (x1, y1)))
            },
            _ => None,
        })
    }
}

/// An immutable stroke font table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeFont {
    map: CodepointMap,
    height: u16,
    glyphs: Vec<StrokeGlyph>,
}

impl StrokeFont {
    pub fn new(
        map: CodepointMap,
        height: u16,
        glyphs: Vec<StrokeGlyph>,
    ) -> Result<Self, FontTableError> {
        map.validate()?;
        if map.len() != glyphs.len() {
            return Err(FontTableError::MapLengthMismatch {
                map: map.len(),
                widths: glyphs.len(),
            });
        }
        Ok(Self {
            map,
            height,
            glyphs,
        })
    }

    /// Parse a Hershey font module
    ///
    /// `index` holds one little-endian `u16` offset into `font` per
    /// codepoint from 32 upwards. Each glyph record in `font` is
    /// `[count, left, right]` followed by `count` coordinate pairs, every
    /// byte biased by `'R'`; a pair whose `x` is `' '` lifts the pen.
    pub fn from_hershey(index: &[u8], font: &[u8], height: u16) -> Result<Self, FontTableError> {
        let count = (index.len() / 2).min((HERSHEY_LAST - HERSHEY_FIRST + 1) as usize);
        if count == 0 {
            return Err(FontTableError::EmptyRange {
                first: HERSHEY_FIRST,
                last: HERSHEY_FIRST,
            });
        }

        let glyphs = index
            .chunks_exact(2)
            .take(count)
            .enumerate()
            .map(|(i, entry)| {
                let offset = u16::from_le_bytes([entry[0], entry[1]]) as usize;
                parse_hershey_glyph(font, offset).ok_or(FontTableError::TruncatedStroke { index: i })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Loaded Hershey font: {} glyphs, height {}", glyphs.len(), height);

        Self::new(
            CodepointMap::range(HERSHEY_FIRST, HERSHEY_FIRST + count as u32 - 1)?,
            height,
            glyphs,
        )
    }

    pub fn map(&self) -> &CodepointMap {
        &self.map
    }

    pub fn glyph(&self, index: usize) -> Option<&StrokeGlyph> {
        self.glyphs.get(index)
    }
}

fn parse_hershey_glyph(font: &[u8], offset: usize) -> Option<StrokeGlyph> {
    let header = font.get(offset..offset + 3)?;
    let count = header[0] as usize;
    let left = header[1] as i16 - HERSHEY_BIAS;
    let right = header[2] as i16 - HERSHEY_BIAS;

    let body = font.get(offset + 3..offset + 3 + count * 2)?;
    let points = body
        .chunks_exact(2)
        .map(|pair| {
            if pair[0] == HERSHEY_PEN_UP {
                StrokePoint::PenUp
            } else {
                StrokePoint::To {
                    x: pair[0] as i16 - HERSHEY_BIAS,
                    y: pair[1] as i16 - HERSHEY_BIAS,
                }
            }
        })
        .collect();

    Some(StrokeGlyph {
        left,
        width: (right - left).max(0) as u16,
        points,
    })
}

impl FontTable for StrokeFont {
    fn height(&self) -> u16 {
        self.height
    }

    fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn resolve(&self, ch: char) -> Result<Glyph<'_>, GlyphError> {
        let codepoint = u32::from(ch);
        let index = self.map.index_of(codepoint)?;
        let glyph = self
            .glyphs
            .get(index)
            .ok_or(GlyphError::GlyphNotFound(codepoint))?;

        Ok(Glyph {
            index,
            codepoint: ch,
            width: glyph.width,
            height: self.height,
            data: GlyphData::Strokes(glyph),
        })
    }
}
