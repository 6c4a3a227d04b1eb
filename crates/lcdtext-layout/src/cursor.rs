//! The running pen position during emission

use lcdtext_core::Point;
use std::fmt;

/// Stages a render call passes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LayoutPhase {
    Measuring,
    Wrapping,
    Emitting,
}

impl fmt::Display for LayoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Measuring => "measuring",
            Self::Wrapping => "wrapping",
            Self::Emitting => "emitting",
        };
        f.write_str(name)
    }
}

/// Pen position relative to the layout origin
///
/// Lives for one emit call only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCursor {
    pub column: u32,
    pub row: u32,
    /// Row pitch: font height plus line spacing
    pub line_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl LayoutCursor {
    pub fn new(line_height: u32, max_width: u32, max_height: u32) -> Self {
        Self {
            column: 0,
            row: 0,
            line_height,
            max_width,
            max_height,
        }
    }

    /// Absolute position of the pen
    pub fn position(&self, origin: Point) -> Point {
        Point::new(
            origin.x.saturating_add(self.column as i32),
            origin.y.saturating_add(self.row as i32),
        )
    }

    pub fn advance(&mut self, by: u32) {
        self.column = self.column.saturating_add(by);
    }

    /// Whether a glyph of `advance` pixels still fits on the current row
    ///
    /// The first glyph of a row always fits.
    pub fn fits(&self, advance: u32) -> bool {
        self.column == 0 || self.column.saturating_add(advance) <= self.max_width
    }

    /// Back to column 0, one row down
    pub fn new_line(&mut self) {
        self.column = 0;
        self.row = self.row.saturating_add(self.line_height);
    }

    /// Whether a row of `glyph_height` pixels fits at the current row
    pub fn row_fits(&self, glyph_height: u32) -> bool {
        self.row.saturating_add(glyph_height) <= self.max_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves() {
        let mut cursor = LayoutCursor::new(10, 20, 25);
        cursor.advance(8);
        assert_eq!(cursor.position(Point::new(5, 5)), Point::new(13, 5));
        assert!(cursor.fits(12));
        assert!(!cursor.fits(13));

        cursor.new_line();
        assert_eq!((cursor.column, cursor.row), (0, 10));
        assert!(cursor.row_fits(8));
        cursor.new_line();
        assert!(!cursor.row_fits(8));
    }

    #[test]
    fn test_first_glyph_always_fits() {
        let cursor = LayoutCursor::new(8, 4, 8);
        assert!(cursor.fits(100));
    }

    #[test]
    fn test_phase_order() {
        assert!(LayoutPhase::Measuring < LayoutPhase::Wrapping);
        assert!(LayoutPhase::Wrapping < LayoutPhase::Emitting);
        assert_eq!(LayoutPhase::Emitting.to_string(), "emitting");
    }
}
