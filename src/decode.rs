use core::convert::TryFrom;
#[cfg(feature = "std")]
use std::io::Read;

use log::{debug, trace};

use crate::color::Color16;
use crate::consts::{TGX_COLOR_SIZE, TGX_HEADER_SIZE};
use crate::error::{Error, Result};
use crate::header::Header;
use crate::image::RasterImage;
use crate::pixel::Pixel;
use crate::token::{Opcode, Token};
use crate::utils::{unlikely, Bytes};

/// Write position of the decoder.
///
/// `x` wraps around within the current row on every written or skipped
/// pixel; only [`Token::NewLine`] moves to the next row.
#[derive(Copy, Clone, Debug)]
struct Cursor {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Cursor {
    const fn new(header: &Header) -> Self {
        Self { x: 0, y: 0, width: header.width(), height: header.height() }
    }

    #[inline]
    fn step(&mut self) {
        self.x += 1;
        if self.x == self.width {
            self.x = 0;
        }
    }

    #[inline]
    fn put<I: RasterImage>(&mut self, image: &mut I, px: Pixel) -> Result<()> {
        if unlikely(self.y >= self.height || self.x >= self.width) {
            return Err(Error::PixelOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
            });
        }
        image.set_pixel(self.x, self.y, px);
        self.step();
        Ok(())
    }

    #[inline]
    fn skip(&mut self, n: u8) {
        for _ in 0..n {
            self.step();
        }
    }

    #[inline]
    fn new_line(&mut self) {
        self.x = 0;
        self.y = self.y.saturating_add(1);
    }
}

/// Decoder over an in-memory TGX buffer.
///
/// The header is parsed on construction; tokens are read lazily until the
/// end of the buffer, which is the only end-of-image marker.
pub struct Decoder<'a> {
    bytes: Bytes<'a>,
    header: Header,
}

impl<'a> Decoder<'a> {
    /// Parses and validates the header.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut bytes = Bytes::new(data, 0);
        let header = Header::read(&mut bytes)?;
        header.validate()?;
        debug!(
            "tgx header: {}x{}, {} token bytes",
            header.width,
            header.height,
            data.len() - TGX_HEADER_SIZE
        );
        Ok(Self { bytes, header })
    }

    #[inline]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Byte offset of the next control byte, counted from the start of the buffer.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.bytes.offset()
    }

    /// Reads the next token, or `None` once the buffer is exhausted.
    ///
    /// The token is only parsed; pixels are not written.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        if self.bytes.is_empty() {
            return Ok(None);
        }
        let offset = self.bytes.offset();
        let (opcode, n) = Opcode::split_control(self.bytes.read_u8()?);
        let token = match Opcode::try_from(opcode) {
            Ok(Opcode::PixelStream) => Token::pixel_stream(self.bytes.read_slice(n * TGX_COLOR_SIZE)?),
            Ok(Opcode::Transparent) => Token::Transparent(n as u8),
            Ok(Opcode::Repeat) => Token::Repeat(Color16::from_le_bytes(self.bytes.read_array()?), n as u8),
            // the run length bits carry no meaning here
            Ok(Opcode::NewLine) => Token::NewLine,
            Err(opcode) => return Err(Error::UnknownOpcode { opcode, offset }),
        };
        trace!("token at {}: {:?}", offset, token);
        Ok(Some(token))
    }

    /// Decodes all remaining tokens into `image`.
    ///
    /// `image` must match the header dimensions. Every pixel is reset to
    /// [`Pixel::TRANSPARENT`] first, transparent runs are not written.
    pub fn decode_into<I: RasterImage>(&mut self, image: &mut I) -> Result<()> {
        let expected = (self.header.width(), self.header.height());
        let actual = (image.width(), image.height());
        if unlikely(expected != actual) {
            return Err(Error::DimensionMismatch { expected, actual });
        }
        for y in 0..actual.1 {
            for x in 0..actual.0 {
                image.set_pixel(x, y, Pixel::TRANSPARENT);
            }
        }
        self.decode_tokens(image)
    }

    fn decode_tokens<I: RasterImage>(&mut self, image: &mut I) -> Result<()> {
        let mut cursor = Cursor::new(&self.header);
        let mut n_tokens = 0_usize;
        while let Some(token) = self.next_token()? {
            match token {
                Token::PixelStream(colors) => {
                    for &color in colors {
                        cursor.put(image, color.to_pixel())?;
                    }
                }
                Token::Transparent(n) => cursor.skip(n),
                Token::Repeat(color, n) => {
                    let px = color.to_pixel();
                    for _ in 0..n {
                        cursor.put(image, px)?;
                    }
                }
                Token::NewLine => cursor.new_line(),
            }
            n_tokens += 1;
        }
        debug!("tgx decoded {} tokens, cursor stopped at ({}, {})", n_tokens, cursor.x, cursor.y);
        Ok(())
    }

    /// Allocates a blank image of the header dimensions and decodes into it.
    pub fn decode_to_image<I: RasterImage>(&mut self) -> Result<I> {
        let mut image = I::new_blank(self.header.width(), self.header.height());
        self.decode_tokens(&mut image)?;
        Ok(image)
    }
}

/// Parses and validates the header without decoding any tokens.
#[inline]
pub fn decode_header(data: impl AsRef<[u8]>) -> Result<Header> {
    let header = Header::decode(data)?;
    header.validate()?;
    Ok(header)
}

#[inline]
pub fn decode_to_image<I: RasterImage>(data: impl AsRef<[u8]>) -> Result<I> {
    Decoder::new(data.as_ref())?.decode_to_image()
}

/// Decodes into a caller-provided image of matching size, returning the parsed header.
#[inline]
pub fn decode_into<I: RasterImage>(data: impl AsRef<[u8]>, image: &mut I) -> Result<Header> {
    let mut decoder = Decoder::new(data.as_ref())?;
    decoder.decode_into(image)?;
    Ok(decoder.header)
}

/// Reads the reader to the end and decodes the buffered bytes.
#[cfg(feature = "std")]
pub fn decode_from_reader<R: Read, I: RasterImage>(mut reader: R) -> Result<I> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_to_image(&data)
}
