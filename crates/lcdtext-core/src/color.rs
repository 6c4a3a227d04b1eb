//! RGB565 colors and per-channel blending

/// A 16-bit color: 5 bits red, 6 bits green, 5 bits blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const BLUE: Self = Self(0x001F);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const WHITE: Self = Self(0xFFFF);

    /// Pack 8-bit channels, dropping the low bits of each
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b & 0xF8) as u16 >> 3))
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    /// 5-bit red channel
    pub const fn r5(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// 6-bit green channel
    pub const fn g6(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue channel
    pub const fn b5(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    const fn from_channels(r5: u8, g6: u8, b5: u8) -> Self {
        Self(((r5 as u16) << 11) | ((g6 as u16) << 5) | b5 as u16)
    }

    /// Expand to 8-bit channels, replicating high bits into the low ones
    pub const fn to_rgb8(self) -> [u8; 3] {
        let r = self.r5();
        let g = self.g6();
        let b = self.b5();
        [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
    }

    /// Blend `fg` over `bg` with `opacity` in 0..=255
    ///
    /// Each 5/6/5 channel is mixed as `(bg * (255 - opacity) + fg * opacity) / 255`,
    /// so opacity 255 yields `fg` and opacity 0 yields `bg` exactly.
    pub fn blend(fg: Self, bg: Self, opacity: u8) -> Self {
        match opacity {
            255 => fg,
            0 => bg,
            a => {
                let a = a as u32;
                let mix = |f: u8, b: u8| ((b as u32 * (255 - a) + f as u32 * a) / 255) as u8;
                Self::from_channels(
                    mix(fg.r5(), bg.r5()),
                    mix(fg.g6(), bg.g6()),
                    mix(fg.b5(), bg.b5()),
                )
            },
        }
    }
}

impl From<u16> for Rgb565 {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_matches_named_colors() {
        assert_eq!(Rgb565::from_rgb(255, 0, 0), Rgb565::RED);
        assert_eq!(Rgb565::from_rgb(0, 255, 0), Rgb565::GREEN);
        assert_eq!(Rgb565::from_rgb(0, 0, 255), Rgb565::BLUE);
        assert_eq!(Rgb565::from_rgb(255, 255, 255), Rgb565::WHITE);
        assert_eq!(Rgb565::from_rgb(7, 3, 7), Rgb565::BLACK);
    }

    #[test]
    fn test_channels() {
        let c = Rgb565::MAGENTA;
        assert_eq!(c.r5(), 0x1F);
        assert_eq!(c.g6(), 0);
        assert_eq!(c.b5(), 0x1F);
    }

    #[test]
    fn test_to_rgb8_extremes() {
        assert_eq!(Rgb565::WHITE.to_rgb8(), [255, 255, 255]);
        assert_eq!(Rgb565::BLACK.to_rgb8(), [0, 0, 0]);
        assert_eq!(Rgb565::GREEN.to_rgb8(), [0, 255, 0]);
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(Rgb565::blend(Rgb565::RED, Rgb565::BLUE, 255), Rgb565::RED);
        assert_eq!(Rgb565::blend(Rgb565::RED, Rgb565::BLUE, 0), Rgb565::BLUE);
    }

    #[test]
    fn test_blend_midpoint() {
        let mid = Rgb565::blend(Rgb565::WHITE, Rgb565::BLACK, 128);
        // 31 * 128 / 255 = 15, 63 * 128 / 255 = 31
        assert_eq!(mid.r5(), 15);
        assert_eq!(mid.g6(), 31);
        assert_eq!(mid.b5(), 15);
    }
}
