//! Line breaking
//!
//! Both strategies work on per-glyph advances supplied by the caller, so
//! they know nothing about fonts. `'\n'` always ends a line and never
//! appears in one.

/// One wrapped line, borrowing from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Byte offset of `text` within the source
    pub start: usize,
    pub text: &'a str,
    /// Sum of the advances of `text`
    pub width: u32,
}

/// Total advance of `text`, newlines excluded
pub fn measure_with(text: &str, advance: impl Fn(char) -> u32) -> u32 {
    text.chars()
        .filter(|&ch| ch != '\n')
        .fold(0u32, |sum, ch| sum.saturating_add(advance(ch)))
}

/// Break before any glyph that would push the line past `max_width`
///
/// A line always holds at least one glyph, so a glyph wider than
/// `max_width` overflows its own line.
pub fn wrap_glyphs(text: &str, max_width: u32, advance: impl Fn(char) -> u32) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for (base, para) in paragraphs(text) {
        let mut start = 0;
        let mut width = 0u32;
        for (i, ch) in para.char_indices() {
            let adv = advance(ch);
            if i > start && width.saturating_add(adv) > max_width {
                lines.push(Line {
                    start: base + start,
                    text: &para[start..i],
                    width,
                });
                start = i;
                width = 0;
            }
            width = width.saturating_add(adv);
        }
        lines.push(Line {
            start: base + start,
            text: &para[start..],
            width,
        });
    }
    lines
}

/// Greedy word wrap on spaces
///
/// Spaces between words on one line are kept; spaces at a break are
/// dropped. A word wider than `max_width` overflows its own line.
pub fn wrap_words(text: &str, max_width: u32, advance: impl Fn(char) -> u32) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for (base, para) in paragraphs(text) {
        // (start, end, width) of the line being filled
        let mut current: Option<(usize, usize, u32)> = None;

        for (word_start, word) in words(para) {
            let word_end = word_start + word.len();
            let word_width = measure_with(word, &advance);

            current = match current {
                None => Some((word_start, word_end, word_width)),
                Some((start, end, width)) => {
                    let gap = measure_with(&para[end..word_start], &advance);
                    let joined = width.saturating_add(gap).saturating_add(word_width);
                    if joined <= max_width {
                        Some((start, word_end, joined))
                    } else {
                        lines.push(Line {
                            start: base + start,
                            text: &para[start..end],
                            width,
                        });
                        Some((word_start, word_end, word_width))
                    }
                },
            };
        }

        let (start, end, width) = current.unwrap_or((0, 0, 0));
        lines.push(Line {
            start: base + start,
            text: &para[start..end],
            width,
        });
    }
    lines
}

/// `'\n'`-separated pieces with their byte offsets
fn paragraphs(text: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = 0;
    text.split('\n').map(move |para| {
        let start = offset;
        offset += para.len() + 1;
        (start, para)
    })
}

/// Non-empty space-separated words with their byte offsets
fn words(para: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    let mut offset = 0;
    para.split(' ').filter_map(move |word| {
        let start = offset;
        offset += word.len() + 1;
        (!word.is_empty()).then_some((start, word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every glyph 1 pixel wide
    fn unit(_: char) -> u32 {
        1
    }

    fn texts<'a>(lines: &[Line<'a>]) -> Vec<&'a str> {
        lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_measure_skips_newlines() {
        assert_eq!(measure_with("", unit), 0);
        assert_eq!(measure_with("ab\ncd", unit), 4);
    }

    #[test]
    fn test_glyph_wrap() {
        let lines = wrap_glyphs("abcdefg", 3, unit);
        assert_eq!(texts(&lines), vec!["abc", "def", "g"]);
        assert_eq!(lines[1].start, 3);
        assert_eq!(lines[2].width, 1);
    }

    #[test]
    fn test_glyph_wrap_oversized_glyph() {
        let wide = |ch: char| if ch == 'W' { 10 } else { 1 };
        let lines = wrap_glyphs("aWb", 4, wide);
        assert_eq!(texts(&lines), vec!["a", "W", "b"]);
        assert_eq!(lines[1].width, 10);
    }

    #[test]
    fn test_newline_always_breaks() {
        let lines = wrap_glyphs("ab\n\ncd", 10, unit);
        assert_eq!(texts(&lines), vec!["ab", "", "cd"]);
        assert_eq!(lines[2].start, 4);
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_glyphs("", 10, unit).is_empty());
        assert!(wrap_words("", 10, unit).is_empty());
    }

    #[test]
    fn test_word_wrap() {
        let lines = wrap_words("the quick brown fox", 10, unit);
        assert_eq!(texts(&lines), vec!["the quick", "brown fox"]);
        assert_eq!(lines[0].width, 9);
        assert_eq!(lines[1].start, 10);
    }

    #[test]
    fn test_word_wrap_never_splits_words() {
        let lines = wrap_words("a enormous b", 4, unit);
        assert_eq!(texts(&lines), vec!["a", "enormous", "b"]);
        assert_eq!(lines[1].width, 8);
    }

    #[test]
    fn test_word_wrap_keeps_inner_spaces() {
        let lines = wrap_words("  a  b ", 10, unit);
        assert_eq!(texts(&lines), vec!["a  b"]);
        assert_eq!(lines[0].start, 2);
        assert_eq!(lines[0].width, 4);
    }
}
