//! Layout settings

/// Where lines may break
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Break before any glyph that would overflow the line
    #[default]
    Glyph,
    /// Greedy word wrap on spaces; a word is never split
    Word,
}

/// How text is placed on the framebuffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub wrap_mode: WrapMode,
    /// Line width limit; `None` uses the framebuffer width right of the origin
    pub max_width: Option<u32>,
    /// Page height limit; `None` uses the framebuffer height below the origin
    pub max_height: Option<u32>,
    /// Extra pixels between rows
    pub line_spacing: u32,
    /// Advance used for glyphs the font cannot resolve
    pub fallback_advance: u32,
    /// Scale for stroke fonts; bitmap fonts ignore it
    pub size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wrap_mode: WrapMode::Glyph,
            max_width: None,
            max_height: None,
            line_spacing: 0,
            fallback_advance: 0,
            size: 1.0,
        }
    }
}

impl LayoutConfig {
    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn with_max_height(mut self, max_height: u32) -> Self {
        self.max_height = Some(max_height);
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: u32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    pub fn with_fallback_advance(mut self, fallback_advance: u32) -> Self {
        self.fallback_advance = fallback_advance;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}
