use crate::consts::TGX_HEADER_SIZE;
use crate::error::{Error, Result};
use crate::utils::{unlikely, Bytes};

/// Image header, the first 8 bytes of a TGX file.
///
/// Both reserved 16-bit fields of the on-disk layout are ignored when
/// reading and written as zeros.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    /// Image width in pixels
    pub width: u16,
    /// Image height in pixels
    pub height: u16,
}

impl Header {
    pub const SIZE: usize = TGX_HEADER_SIZE;

    /// Creates a header, checking that both dimensions are non-zero and fit into 16 bits.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        if unlikely(width == 0 || height == 0) {
            return Err(Error::EmptyImage { width, height });
        }
        match (u16::try_from(width), u16::try_from(height)) {
            (Ok(width), Ok(height)) => Ok(Self { width, height }),
            _ => Err(Error::ImageTooLarge { width, height }),
        }
    }

    /// Serializes the header into its 8-byte little-endian layout.
    pub const fn encode(&self) -> [u8; TGX_HEADER_SIZE] {
        let w = self.width.to_le_bytes();
        let h = self.height.to_le_bytes();
        [w[0], w[1], 0, 0, h[0], h[1], 0, 0]
    }

    /// Parses the header from the start of `data`.
    ///
    /// Only fails if fewer than 8 bytes are available; dimensions are not validated here.
    pub fn decode(data: impl AsRef<[u8]>) -> Result<Self> {
        Self::read(&mut Bytes::new(data.as_ref(), 0))
    }

    pub(crate) fn read(bytes: &mut Bytes) -> Result<Self> {
        let v = bytes.read_array::<TGX_HEADER_SIZE>()?;
        let width = u16::from_le_bytes([v[0], v[1]]);
        let height = u16::from_le_bytes([v[4], v[5]]);
        Ok(Self { width, height })
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width as u32
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height as u32
    }

    #[inline]
    pub const fn n_pixels(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn validate(&self) -> Result<()> {
        if unlikely(self.width == 0 || self.height == 0) {
            return Err(Error::EmptyImage { width: self.width(), height: self.height() });
        }
        Ok(())
    }
}
