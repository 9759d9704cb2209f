use alloc::vec;
use alloc::vec::Vec;

use bytemuck::cast_slice;

use crate::error::{Error, Result};
use crate::pixel::Pixel;
use crate::utils::unlikely;

/// Pixel grid the codec reads from when encoding and writes to when decoding.
///
/// Accessors are only ever called with coordinates inside
/// `0..width() x 0..height()`.
pub trait RasterImage {
    /// Creates an image with every pixel set to [`Pixel::TRANSPARENT`].
    ///
    /// The decoder never writes transparent runs, it relies on this initial state.
    fn new_blank(width: u32, height: u32) -> Self
    where
        Self: Sized;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn get_pixel(&self, x: u32, y: u32) -> Pixel;

    fn set_pixel(&mut self, x: u32, y: u32, px: Pixel);
}

/// Owned row-major RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let n_pixels = (width as usize).saturating_mul(height as usize);
        if unlikely(pixels.len() != n_pixels) {
            return Err(Error::InvalidImageLength { size: pixels.len() * 4, width, height });
        }
        Ok(Self { width, height, pixels })
    }

    /// Copies a tightly packed RGBA8 buffer (4 bytes per pixel, row-major).
    pub fn from_rgba_bytes(width: u32, height: u32, data: impl AsRef<[u8]>) -> Result<Self> {
        let data = data.as_ref();
        let n_pixels = (width as usize).saturating_mul(height as usize);
        if unlikely(data.len() != n_pixels.saturating_mul(4)) {
            return Err(Error::InvalidImageLength { size: data.len(), width, height });
        }
        Ok(Self { width, height, pixels: cast_slice::<u8, Pixel>(data).to_vec() })
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Views the pixels as a tightly packed RGBA8 buffer.
    #[inline]
    pub fn as_rgba_bytes(&self) -> &[u8] {
        cast_slice(&self.pixels)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    const fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }
}

impl RasterImage for Image {
    fn new_blank(width: u32, height: u32) -> Self {
        let n_pixels = (width as usize) * (height as usize);
        Self { width, height, pixels: vec![Pixel::TRANSPARENT; n_pixels] }
    }

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    /// Panics if the coordinates are outside of the image.
    #[inline]
    fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        match self.get(x, y) {
            Some(px) => px,
            None => panic!("pixel ({}, {}) out of bounds for {}x{}", x, y, self.width, self.height),
        }
    }

    /// Panics if the coordinates are outside of the image.
    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, px: Pixel) {
        match self.index(x, y) {
            Some(i) => self.pixels[i] = px,
            None => panic!("pixel ({}, {}) out of bounds for {}x{}", x, y, self.width, self.height),
        }
    }
}
