//! Pen colours shared by the slideshow pen and the overlay canvases.

use serde::{Deserialize, Serialize};

/// An opaque RGB pen colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PenColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PenColor {
    pub const RED: PenColor = PenColor::rgb(255, 0, 0);
    pub const BLACK: PenColor = PenColor::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0x00BBGGRR` value, as expected by `ColorFormat.RGB` and
    /// `COLORREF`.
    pub const fn to_bgr(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }

    pub const fn from_bgr(packed: u32) -> Self {
        Self {
            r: (packed & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: ((packed >> 16) & 0xFF) as u8,
        }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

/// Colours offered by the pen flyout, in display order (two rows of five).
pub const PALETTE: [PenColor; 10] = [
    PenColor::rgb(255, 0, 0),
    PenColor::rgb(0, 255, 0),
    PenColor::rgb(0, 0, 255),
    PenColor::rgb(255, 255, 0),
    PenColor::rgb(255, 0, 255),
    PenColor::rgb(0, 255, 255),
    PenColor::rgb(0, 0, 0),
    PenColor::rgb(255, 255, 255),
    PenColor::rgb(255, 165, 0),
    PenColor::rgb(128, 0, 128),
];

/// Display names for [`PALETTE`], same order.
pub const PALETTE_NAMES: [&str; 10] = [
    "Red", "Green", "Blue", "Yellow", "Magenta", "Cyan", "Black", "White", "Orange", "Purple",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_packing_puts_red_in_low_byte() {
        assert_eq!(PenColor::rgb(0x12, 0x34, 0x56).to_bgr(), 0x0056_3412);
        assert_eq!(PenColor::RED.to_bgr(), 0xFF);
    }

    #[test]
    fn bgr_unpacking_inverts_packing() {
        let orange = PALETTE[8];
        assert_eq!(PenColor::from_bgr(orange.to_bgr()), orange);
    }
}
