use core::fmt;

use bytemuck::{Pod, Zeroable};

use crate::consts::{TGX_COLOR_MASK_BLUE, TGX_COLOR_MASK_GREEN, TGX_COLOR_MASK_RED};
use crate::pixel::Pixel;

/// 15-bit color word as it appears on the wire.
///
/// Bit layout of the little-endian `u16` is `0RRRRRGGGGGBBBBB`; bit 15 is
/// ignored. The word is kept as its two wire bytes so that a slice of
/// token payload can be reinterpreted as `&[Color16]` directly.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Color16([u8; 2]);

impl Color16 {
    #[inline]
    pub const fn from_word(word: u16) -> Self {
        Self(word.to_le_bytes())
    }

    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn word(self) -> u16 {
        u16::from_le_bytes(self.0)
    }

    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0
    }

    /// Quantizes an RGBA8 pixel by dropping the low 3 bits of each color channel.
    ///
    /// Alpha is not representable in a color word and is discarded.
    #[inline]
    pub const fn from_pixel(px: Pixel) -> Self {
        let red = ((px.r >> 3) as u16) << 10;
        let green = ((px.g >> 3) as u16) << 5;
        let blue = (px.b >> 3) as u16;
        Self::from_word(red | green | blue)
    }

    /// Expands the color word into an opaque RGBA8 pixel.
    ///
    /// The low 3 bits of every channel are zero, so this is not the inverse of
    /// [`Color16::from_pixel`] for arbitrary pixels.
    #[inline]
    pub const fn to_pixel(self) -> Pixel {
        let v = self.word();
        let blue = ((v & TGX_COLOR_MASK_BLUE) << 3) as u8;
        let green = ((v & TGX_COLOR_MASK_GREEN) >> 2) as u8;
        let red = ((v & TGX_COLOR_MASK_RED) >> 7) as u8;
        Pixel::rgb(red, green, blue)
    }

    #[inline]
    pub const fn red5(self) -> u8 {
        ((self.word() & TGX_COLOR_MASK_RED) >> 10) as u8
    }

    #[inline]
    pub const fn green5(self) -> u8 {
        ((self.word() & TGX_COLOR_MASK_GREEN) >> 5) as u8
    }

    #[inline]
    pub const fn blue5(self) -> u8 {
        (self.word() & TGX_COLOR_MASK_BLUE) as u8
    }
}

impl From<Pixel> for Color16 {
    #[inline]
    fn from(px: Pixel) -> Self {
        Self::from_pixel(px)
    }
}

impl From<Color16> for Pixel {
    #[inline]
    fn from(color: Color16) -> Self {
        color.to_pixel()
    }
}

impl From<u16> for Color16 {
    #[inline]
    fn from(word: u16) -> Self {
        Self::from_word(word)
    }
}

impl From<Color16> for u16 {
    #[inline]
    fn from(color: Color16) -> Self {
        color.word()
    }
}

impl fmt::Debug for Color16 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Color16({:#06x})", self.word())
    }
}
