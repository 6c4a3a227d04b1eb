//! Font tables and glyph resolution
//!
//! Three table variants are chosen once, at load time:
//!
//! - [`Font::Monospace`] - fixed-size cells over a contiguous codepoint range
//! - [`Font::Proportional`] - per-glyph widths and offsets over a codepoint map
//! - [`Font::Stroke`] - Hershey-style polylines
//!
//! Every variant resolves a `char` into a [`Glyph`] that borrows the table's
//! data; nothing here mutates after construction.

mod bitmap;
mod proportional;
mod stroke;

pub use bitmap::{BitmapFont, BitmapFontParts, GlyphBits, GlyphPacking};
pub use proportional::ProportionalTable;
pub use stroke::{StrokeFont, StrokeGlyph, StrokePoint, HERSHEY_FIRST, HERSHEY_LAST};

use crate::error::{FontTableError, GlyphError};
use crate::traits::FontTable;

const SURROGATES_FIRST: u32 = 0xD800;
const SURROGATES_LAST: u32 = 0xDFFF;

/// Which codepoints a table covers, and in which glyph order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodepointMap {
    /// Glyph `i` is codepoint `first + i`
    Range { first: u32, last: u32 },
    /// Explicit codepoints; `(codepoint, glyph index)` kept sorted by codepoint
    Sparse(Vec<(u32, u32)>),
}

impl CodepointMap {
    /// Contiguous `first..=last`
    pub fn range(first: u32, last: u32) -> Result<Self, FontTableError> {
        let map = Self::Range { first, last };
        map.validate()?;
        Ok(map)
    }

    /// Codepoints listed in glyph order
    ///
    /// The list does not have to be ascending; duplicates are rejected.
    pub fn sparse(codepoints: impl IntoIterator<Item = u32>) -> Result<Self, FontTableError> {
        let mut entries: Vec<(u32, u32)> = codepoints
            .into_iter()
            .enumerate()
            .map(|(index, cp)| (cp, index as u32))
            .collect();

        let ascending = entries.windows(2).all(|w| w[0].0 < w[1].0);
        if !ascending {
            log::warn!("Codepoint map is not in ascending order; building a sorted index");
            entries.sort_unstable_by_key(|&(cp, _)| cp);
        }

        let map = Self::Sparse(entries);
        map.validate()?;
        Ok(map)
    }

    /// Check the invariants the constructors enforce
    ///
    /// The variants are public, so tables re-check a map they are handed.
    /// Every codepoint must be a Unicode scalar value, ranges must not be
    /// inverted, and sparse entries must be sorted without duplicates.
    pub fn validate(&self) -> Result<(), FontTableError> {
        match self {
            Self::Range { first, last } => {
                if last < first {
                    return Err(FontTableError::EmptyRange {
                        first: *first,
                        last: *last,
                    });
                }
                if char::from_u32(*first).is_none() {
                    return Err(FontTableError::InvalidCodepoint(*first));
                }
                if char::from_u32(*last).is_none() {
                    return Err(FontTableError::InvalidCodepoint(*last));
                }
                if *first < SURROGATES_FIRST && *last > SURROGATES_LAST {
                    return Err(FontTableError::InvalidCodepoint(SURROGATES_FIRST));
                }
            },
            Self::Sparse(entries) => {
                let invalid = entries.iter().find(|&&(cp, _)| char::from_u32(cp).is_none());
                if let Some(&(cp, _)) = invalid {
                    return Err(FontTableError::InvalidCodepoint(cp));
                }
                if let Some(w) = entries.windows(2).find(|w| w[0].0 >= w[1].0) {
                    return Err(if w[0].0 == w[1].0 {
                        FontTableError::DuplicateCodepoint(w[0].0)
                    } else {
                        FontTableError::UnsortedMap(w[1].0)
                    });
                }
            },
        }
        Ok(())
    }

    /// Build from a `MAP` string as found in converted font modules
    pub fn from_map_str(map: &str) -> Result<Self, FontTableError> {
        Self::sparse(map.chars().map(u32::from))
    }

    /// Number of glyphs covered
    pub fn len(&self) -> usize {
        match self {
            Self::Range { first, last } => last
                .checked_sub(*first)
                .map_or(0, |span| span as usize + 1),
            Self::Sparse(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Glyph index of `codepoint`
    pub fn index_of(&self, codepoint: u32) -> Result<usize, GlyphError> {
        match self {
            Self::Range { first, last } => {
                if (*first..=*last).contains(&codepoint) {
                    Ok((codepoint - first) as usize)
                } else {
                    Err(GlyphError::OutOfRange {
                        codepoint,
                        first: *first,
                        last: *last,
                    })
                }
            },
            Self::Sparse(entries) => entries
                .binary_search_by_key(&codepoint, |&(cp, _)| cp)
                .map(|pos| entries[pos].1 as usize)
                .map_err(|_| GlyphError::GlyphNotFound(codepoint)),
        }
    }

    /// Codepoints in glyph order
    pub fn codepoints(&self) -> Vec<u32> {
        match self {
            Self::Range { first, last } => (*first..=*last).collect(),
            Self::Sparse(entries) => {
                let mut ordered = vec![0; entries.len()];
                for &(cp, index) in entries {
                    ordered[index as usize] = cp;
                }
                ordered
            },
        }
    }
}

/// One resolved glyph, borrowing from its font table
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'f> {
    pub index: usize,
    pub codepoint: char,
    /// Pixel width for bitmap glyphs, nominal design width for strokes
    pub width: u16,
    pub height: u16,
    pub data: GlyphData<'f>,
}

/// Where the glyph's shape lives
#[derive(Debug, Clone, Copy)]
pub enum GlyphData<'f> {
    Bitmap(GlyphBits<'f>),
    Strokes(&'f StrokeGlyph),
}

/// A font table of any supported variant
#[derive(Debug, Clone)]
pub enum Font {
    Monospace(BitmapFont),
    Proportional(BitmapFont),
    Stroke(StrokeFont),
}

impl Font {
    /// Short variant name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Monospace(_) => "monospace",
            Self::Proportional(_) => "proportional",
            Self::Stroke(_) => "stroke",
        }
    }

    /// Pixel advance of a resolved glyph at `size`
    ///
    /// Bitmap glyphs never scale; stroke glyphs advance by their nominal
    /// width times `size`, rounded.
    pub fn advance(&self, glyph: &Glyph<'_>, size: f32) -> u32 {
        match self {
            Self::Monospace(_) | Self::Proportional(_) => glyph.width as u32,
            Self::Stroke(_) => scale_round(glyph.width as f32, size).max(0) as u32,
        }
    }

    /// Row pitch before any extra line spacing
    pub fn line_height(&self, size: f32) -> u32 {
        match self {
            Self::Monospace(f) | Self::Proportional(f) => f.height() as u32,
            Self::Stroke(f) => scale_round(f.height() as f32, size).max(0) as u32,
        }
    }

    fn table(&self) -> &dyn FontTable {
        match self {
            Self::Monospace(f) | Self::Proportional(f) => f,
            Self::Stroke(f) => f,
        }
    }
}

impl FontTable for Font {
    fn height(&self) -> u16 {
        self.table().height()
    }

    fn glyph_count(&self) -> usize {
        self.table().glyph_count()
    }

    fn resolve(&self, ch: char) -> Result<Glyph<'_>, GlyphError> {
        self.table().resolve(ch)
    }
}

/// Scale a design coordinate and round half away from zero
pub fn scale_round(value: f32, size: f32) -> i32 {
    (value * size).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_lookup() {
        let map = CodepointMap::range(32, 126).unwrap();
        assert_eq!(map.len(), 95);
        assert_eq!(map.index_of(32).unwrap(), 0);
        assert_eq!(map.index_of('A' as u32).unwrap(), 33);
        assert_eq!(
            map.index_of(127),
            Err(GlyphError::OutOfRange {
                codepoint: 127,
                first: 32,
                last: 126
            })
        );
        assert!(map.index_of(31).is_err());
    }

    #[test]
    fn test_empty_range_rejected() {
        assert_eq!(
            CodepointMap::range(10, 9),
            Err(FontTableError::EmptyRange { first: 10, last: 9 })
        );
    }

    #[test]
    fn test_sparse_lookup() {
        let map = CodepointMap::from_map_str("AB").unwrap();
        assert_eq!(map.index_of('A' as u32).unwrap(), 0);
        assert_eq!(map.index_of('B' as u32).unwrap(), 1);
        assert_eq!(
            map.index_of('C' as u32),
            Err(GlyphError::GlyphNotFound('C' as u32))
        );
    }

    #[test]
    fn test_unsorted_map_keeps_glyph_order() {
        let map = CodepointMap::from_map_str("zay").unwrap();
        assert_eq!(map.index_of('z' as u32).unwrap(), 0);
        assert_eq!(map.index_of('a' as u32).unwrap(), 1);
        assert_eq!(map.index_of('y' as u32).unwrap(), 2);
        assert_eq!(map.codepoints(), vec!['z' as u32, 'a' as u32, 'y' as u32]);
    }

    #[test]
    fn test_duplicate_codepoint_rejected() {
        assert_eq!(
            CodepointMap::from_map_str("ABA"),
            Err(FontTableError::DuplicateCodepoint('A' as u32))
        );
    }

    #[test]
    fn test_inverted_range_has_no_glyphs() {
        let map = CodepointMap::Range { first: 10, last: 5 };
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(
            map.validate(),
            Err(FontTableError::EmptyRange { first: 10, last: 5 })
        );
    }

    #[test]
    fn test_non_scalar_codepoints_rejected() {
        assert_eq!(
            CodepointMap::sparse([0x41, 0xD800]),
            Err(FontTableError::InvalidCodepoint(0xD800))
        );
        assert_eq!(
            CodepointMap::sparse([0x11_0000]),
            Err(FontTableError::InvalidCodepoint(0x11_0000))
        );
        assert_eq!(
            CodepointMap::range(0xD000, 0xE000),
            Err(FontTableError::InvalidCodepoint(0xD800))
        );
        assert_eq!(
            CodepointMap::range(0x20, 0x11_0000),
            Err(FontTableError::InvalidCodepoint(0x11_0000))
        );
        assert!(CodepointMap::range(0xE000, 0x10_FFFF).is_ok());
    }

    #[test]
    fn test_hand_built_sparse_map_checked() {
        let unsorted = CodepointMap::Sparse(vec![(0x42, 0), (0x41, 1)]);
        assert_eq!(unsorted.validate(), Err(FontTableError::UnsortedMap(0x41)));
        let duplicate = CodepointMap::Sparse(vec![(0x41, 0), (0x41, 1)]);
        assert_eq!(
            duplicate.validate(),
            Err(FontTableError::DuplicateCodepoint(0x41))
        );
    }

    #[test]
    fn test_scale_round() {
        assert_eq!(scale_round(5.0, 2.0), 10);
        assert_eq!(scale_round(5.0, 0.5), 3);
        assert_eq!(scale_round(-5.0, 0.5), -3);
    }
}
