use bytemuck::{Pod, Zeroable};

/// 8-bit RGBA pixel as stored in memory.
///
/// The layout is four consecutive bytes, so pixel slices can be viewed as
/// tightly packed RGBA8 byte buffers and back.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black, the initial value of every pixel in a blank image.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque pixel.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    /// Returns true if the alpha channel is zero.
    ///
    /// Any non-zero alpha counts as opaque: the format has no partial transparency.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Pixel {
    #[inline(always)]
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Pixel> for [u8; 4] {
    #[inline(always)]
    fn from(px: Pixel) -> Self {
        px.to_array()
    }
}
