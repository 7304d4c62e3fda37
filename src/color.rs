//! Pixel color values
//!
//! The matrix takes one 8-bit value per channel. In the bit-packed formats
//! only zero/nonzero matters: any nonzero channel lights at full intensity.
//!
//! Colors can be given as an [`Rgb`] or as a packed `0xRRGGBB` word.
//!
//! ## Example
//!
//! ```
//! use rgb_matrix::Rgb;
//!
//! let orange = Rgb::from_packed(0xFF_80_00);
//! assert_eq!(orange, Rgb::new(0xFF, 0x80, 0x00));
//! assert_eq!(orange.to_packed(), 0xFF_80_00);
//! ```

/// One pixel's red, green and blue channel values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub grn: u8,
    /// Blue channel
    pub blu: u8,
}

impl Rgb {
    /// All channels off
    pub const OFF: Self = Self::new(0, 0, 0);

    /// Create a color from channel values
    pub const fn new(red: u8, grn: u8, blu: u8) -> Self {
        Self { red, grn, blu }
    }

    /// Decode a packed `0xRRGGBB` word
    ///
    /// Bits 31..24 are ignored.
    pub const fn from_packed(rgb: u32) -> Self {
        Self {
            red: (rgb >> 16) as u8,
            grn: (rgb >> 8) as u8,
            blu: rgb as u8,
        }
    }

    /// Encode as a packed `0xRRGGBB` word
    pub const fn to_packed(self) -> u32 {
        ((self.red as u32) << 16) | ((self.grn as u32) << 8) | self.blu as u32
    }

    /// Whether every channel is zero
    pub const fn is_off(self) -> bool {
        self.red == 0 && self.grn == 0 && self.blu == 0
    }
}

impl From<u32> for Rgb {
    fn from(rgb: u32) -> Self {
        Self::from_packed(rgb)
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb888> for Rgb {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb888) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::new(color.r(), color.g(), color.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed_splits_channels() {
        let color = Rgb::from_packed(0xAA_BB_CC);
        assert_eq!(color.red, 0xAA);
        assert_eq!(color.grn, 0xBB);
        assert_eq!(color.blu, 0xCC);
    }

    #[test]
    fn test_from_packed_ignores_top_byte() {
        assert_eq!(Rgb::from_packed(0xFF_12_34_56), Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_is_off() {
        assert!(Rgb::OFF.is_off());
        assert!(!Rgb::new(0, 0, 1).is_off());
    }
}
