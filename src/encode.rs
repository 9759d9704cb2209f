use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io::Write;

use log::debug;

use crate::color::Color16;
use crate::consts::{TGX_COLOR_SIZE, TGX_HEADER_SIZE, TGX_RUN_MAX};
use crate::error::Result;
use crate::header::Header;
use crate::image::RasterImage;
use crate::pixel::Pixel;
use crate::token::Token;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum RunKind {
    Opaque,
    Transparent,
}

impl RunKind {
    #[inline]
    const fn of(px: Pixel) -> Self {
        if px.is_transparent() {
            Self::Transparent
        } else {
            Self::Opaque
        }
    }
}

/// Pending run of same-kind pixels, at most 32 long.
struct Run {
    kind: RunKind,
    len: usize,
    colors: [Color16; TGX_RUN_MAX],
}

impl Run {
    const fn new() -> Self {
        Self { kind: RunKind::Opaque, len: 0, colors: [Color16::from_word(0); TGX_RUN_MAX] }
    }

    #[inline]
    fn accepts(&self, kind: RunKind) -> bool {
        self.len == 0 || (self.len < TGX_RUN_MAX && self.kind == kind)
    }

    #[inline]
    fn push(&mut self, kind: RunKind, px: Pixel) {
        debug_assert!(self.accepts(kind));
        self.kind = kind;
        if kind == RunKind::Opaque {
            self.colors[self.len] = Color16::from_pixel(px);
        }
        self.len += 1;
    }

    /// Emits the pending run as a single token; returns false if there was nothing to emit.
    fn flush(&mut self, out: &mut Vec<u8>) -> bool {
        if self.len == 0 {
            return false;
        }
        let n = self.len as u8;
        let token = match self.kind {
            RunKind::Transparent => Token::Transparent(n),
            RunKind::Opaque => {
                // equality is checked on quantized words, not on the source pixels
                let colors = &self.colors[..self.len];
                if colors.len() > 1 && colors.iter().all(|&c| c == colors[0]) {
                    Token::Repeat(colors[0], n)
                } else {
                    Token::PixelStream(colors)
                }
            }
        };
        token.write_to(out);
        self.len = 0;
        true
    }
}

/// Encoder of a [`RasterImage`] into a TGX buffer.
///
/// Pixels with zero alpha are transparent, any other alpha is stored as opaque.
pub struct Encoder<'a, I: RasterImage + ?Sized> {
    image: &'a I,
    header: Header,
}

impl<'a, I: RasterImage + ?Sized> Encoder<'a, I> {
    /// Fails if the image is empty or does not fit 16-bit dimensions.
    pub fn new(image: &'a I) -> Result<Self> {
        let header = Header::try_new(image.width(), image.height())?;
        Ok(Self { image, header })
    }

    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(TGX_HEADER_SIZE + self.header.n_pixels());
        out.extend_from_slice(&self.header.encode());
        let n_tokens = self.encode_tokens(&mut out);
        debug!(
            "tgx encoded {}x{}: {} tokens, {} bytes",
            self.header.width,
            self.header.height,
            n_tokens,
            out.len()
        );
        Ok(out)
    }

    /// Encodes into `writer` and returns the number of bytes written.
    #[cfg(feature = "std")]
    pub fn encode_to_stream<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let data = self.encode_to_vec()?;
        writer.write_all(&data)?;
        Ok(data.len())
    }

    fn encode_tokens(&self, out: &mut Vec<u8>) -> usize {
        let mut run = Run::new();
        let mut n_tokens = 0;
        for y in 0..self.header.height() {
            for x in 0..self.header.width() {
                let px = self.image.get_pixel(x, y);
                let kind = RunKind::of(px);
                if !run.accepts(kind) {
                    n_tokens += usize::from(run.flush(out));
                }
                run.push(kind, px);
            }
            n_tokens += usize::from(run.flush(out));
            Token::NewLine.write_to(out);
            n_tokens += 1;
        }
        n_tokens
    }
}

#[inline]
pub fn encode_to_vec<I: RasterImage + ?Sized>(image: &I) -> Result<Vec<u8>> {
    Encoder::new(image)?.encode_to_vec()
}

/// Upper bound on the encoded size: every pixel as its own 3-byte token plus
/// a [`Token::NewLine`] per row.
#[inline]
pub fn encode_max_len(width: u32, height: u32) -> usize {
    let (width, height) = (width as usize, height as usize);
    let n_pixels = width.saturating_mul(height);
    TGX_HEADER_SIZE + n_pixels.saturating_mul(1 + TGX_COLOR_SIZE) + height
}
