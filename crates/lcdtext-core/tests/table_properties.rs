//! Property tests for bitmap font tables

use lcdtext_core::font::{BitmapFont, BitmapFontParts, CodepointMap, GlyphData, GlyphPacking};
use lcdtext_core::traits::FontTable;
use proptest::prelude::*;

/// Builds a bit-stream font whose glyphs are all blank but whose gaps
/// between glyph spans are filled with set bits.
fn gapped_font(widths: &[u8], height: u16, gap: usize) -> BitmapFont {
    let mut offsets = Vec::with_capacity(widths.len() + 1);
    let mut set_bits = Vec::new();
    let mut pos = gap;
    set_bits.extend(0..gap);
    for &w in widths {
        offsets.push(pos as u32);
        pos += w as usize * height as usize;
        set_bits.extend(pos..pos + gap);
        pos += gap;
    }
    offsets.push((pos - gap) as u32);

    let mut bitmaps = vec![0u8; pos.div_ceil(8)];
    for bit in set_bits {
        bitmaps[bit / 8] |= 0x80 >> (bit % 8);
    }

    let map = CodepointMap::sparse((0..widths.len() as u32).map(|i| 0x41 + i)).unwrap();
    BitmapFont::from_parts(BitmapFontParts {
        map,
        widths: widths.to_vec(),
        offsets,
        bitmaps,
        bpp: 1,
        height,
        max_width: widths.iter().copied().max().unwrap_or(0) as u16,
        packing: GlyphPacking::BitStream,
    })
    .unwrap()
}

proptest! {
    #[test]
    fn prop_decode_stays_inside_span(
        widths in prop::collection::vec(0u8..12, 1..10),
        height in 1u16..6,
        gap in 1usize..9,
    ) {
        let font = gapped_font(&widths, height, gap);
        for i in 0..widths.len() {
            let ch = char::from_u32(0x41 + i as u32).unwrap();
            let glyph = font.resolve(ch).unwrap();
            let GlyphData::Bitmap(bits) = glyph.data else {
                panic!("expected bitmap glyph");
            };
            for y in 0..height + 1 {
                for x in 0..glyph.width + 1 {
                    prop_assert!(!bits.is_set(x, y), "glyph {} read a gap bit at {},{}", i, x, y);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_resolved_width_within_max(
        widths in prop::collection::vec(0u8..40, 1..20),
        height in 1u16..4,
    ) {
        let font = gapped_font(&widths, height, 1);
        for i in 0..widths.len() {
            let ch = char::from_u32(0x41 + i as u32).unwrap();
            let glyph = font.resolve(ch).unwrap();
            prop_assert!(glyph.width <= font.max_width());
            prop_assert_eq!(glyph.width, widths[i] as u16);
        }
    }
}

proptest! {
    #[test]
    fn prop_round_trip_keeps_glyphs(
        widths in prop::collection::vec(1u8..10, 1..8),
        height in 1u16..5,
    ) {
        let font = gapped_font(&widths, height, 2);
        let table = font.to_proportional_table().unwrap();
        let reparsed = table.parse().unwrap();

        prop_assert_eq!(reparsed.glyph_count(), font.glyph_count());
        prop_assert_eq!(reparsed.widths(), font.widths());
        for i in 0..font.glyph_count() {
            let a = font.glyph_bits(i).unwrap();
            let b = reparsed.glyph_bits(i).unwrap();
            prop_assert_eq!(a.span(), b.span());
            prop_assert_eq!(a.bytes(), b.bytes());
        }
    }
}

proptest! {
    #[test]
    fn prop_accepted_map_survives_export(
        codepoints in prop::collection::hash_set(
            prop_oneof![0u32..0x80, 0xD7F0u32..0xE010, 0x10_FFF0u32..0x11_0010],
            1..8,
        ),
    ) {
        let codepoints: Vec<u32> = codepoints.into_iter().collect();
        let count = codepoints.len();
        let scalars = codepoints.iter().all(|&cp| char::from_u32(cp).is_some());
        let map = CodepointMap::sparse(codepoints);
        prop_assert_eq!(map.is_ok(), scalars);
        let Ok(map) = map else {
            return Ok(());
        };
        let font = BitmapFont::from_parts(BitmapFontParts {
            map,
            widths: vec![1; count],
            offsets: (0..=count as u32).collect(),
            bitmaps: vec![0; count.div_ceil(8)],
            bpp: 1,
            height: 1,
            max_width: 1,
            packing: GlyphPacking::BitStream,
        })
        .unwrap();

        let table = font.to_proportional_table().unwrap();
        prop_assert_eq!(table.map.chars().count(), table.widths.len());
        prop_assert_eq!(table.parse().unwrap().glyph_count(), count);
    }
}

#[test]
fn test_monospace_scenario_table() {
    let font = BitmapFont::monospace(32, 126, 8, 8, vec![0u8; 95 * 8]).unwrap();
    assert_eq!(font.glyph_count(), 95);
    let h = font.resolve('H').unwrap();
    assert_eq!(h.index, 'H' as usize - 32);
    let GlyphData::Bitmap(bits) = h.data else {
        panic!("expected bitmap glyph");
    };
    assert_eq!(bits.span(), (40 * 8)..(41 * 8));
}
