use alloc::vec::Vec;
use core::convert::TryFrom;

use bytemuck::cast_slice;

use crate::color::Color16;
use crate::consts::{
    TGX_COLOR_SIZE, TGX_MASK_OPCODE, TGX_MASK_RUN, TGX_OPCODE_SHIFT, TGX_OP_NEWLINE, TGX_OP_PIXEL_STREAM,
    TGX_OP_REPEAT, TGX_OP_TRANSPARENT, TGX_RUN_MAX,
};

/// Upper 3 bits of a control byte.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    PixelStream = 0,
    Transparent = 1,
    Repeat = 2,
    NewLine = 4,
}

impl Opcode {
    /// Splits a control byte into the raw opcode value and the run length.
    #[inline]
    pub const fn split_control(control: u8) -> (u8, usize) {
        ((control & TGX_MASK_OPCODE) >> TGX_OPCODE_SHIFT, (control & TGX_MASK_RUN) as usize + 1)
    }

    #[inline]
    pub const fn tag(self) -> u8 {
        (self as u8) << TGX_OPCODE_SHIFT
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    /// Fails with the rejected opcode value.
    #[inline]
    fn try_from(opcode: u8) -> core::result::Result<Self, u8> {
        match opcode {
            0 => Ok(Self::PixelStream),
            1 => Ok(Self::Transparent),
            2 => Ok(Self::Repeat),
            4 => Ok(Self::NewLine),
            _ => Err(opcode),
        }
    }
}

/// A single unit of the token stream.
///
/// Run lengths are in `1..=32`; they are stored in the control byte minus one.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Token<'a> {
    /// Individually colored opaque pixels.
    PixelStream(&'a [Color16]),
    /// Pixels skipped without writing, i.e. left transparent.
    Transparent(u8),
    /// One opaque color repeated for the given number of pixels.
    Repeat(Color16, u8),
    /// Moves the cursor to the start of the next row.
    NewLine,
}

impl<'a> Token<'a> {
    /// Reinterprets a little-endian color word payload as a pixel stream.
    ///
    /// `payload` must hold between 1 and 32 color words.
    #[inline]
    pub fn pixel_stream(payload: &'a [u8]) -> Self {
        Self::PixelStream(cast_slice(payload))
    }

    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::PixelStream(_) => Opcode::PixelStream,
            Self::Transparent(_) => Opcode::Transparent,
            Self::Repeat(..) => Opcode::Repeat,
            Self::NewLine => Opcode::NewLine,
        }
    }

    /// Number of pixels the token covers; zero for [`Token::NewLine`].
    pub const fn run_len(&self) -> usize {
        match *self {
            Self::PixelStream(colors) => colors.len(),
            Self::Transparent(n) | Self::Repeat(_, n) => n as usize,
            Self::NewLine => 0,
        }
    }

    pub const fn control_byte(&self) -> u8 {
        match *self {
            Self::PixelStream(colors) => TGX_OP_PIXEL_STREAM | run_bits(colors.len()),
            Self::Transparent(n) => TGX_OP_TRANSPARENT | run_bits(n as usize),
            Self::Repeat(_, n) => TGX_OP_REPEAT | run_bits(n as usize),
            Self::NewLine => TGX_OP_NEWLINE,
        }
    }

    /// Size of the token on the wire, control byte included.
    pub const fn encoded_len(&self) -> usize {
        match *self {
            Self::PixelStream(colors) => 1 + TGX_COLOR_SIZE * colors.len(),
            Self::Repeat(..) => 1 + TGX_COLOR_SIZE,
            Self::Transparent(_) | Self::NewLine => 1,
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        debug_assert!(
            matches!(self, Self::NewLine) || (1..=TGX_RUN_MAX).contains(&self.run_len()),
            "run length out of range: {:?}",
            self
        );
        out.push(self.control_byte());
        match *self {
            Self::PixelStream(colors) => out.extend_from_slice(cast_slice(colors)),
            Self::Repeat(color, _) => out.extend_from_slice(&color.to_le_bytes()),
            Self::Transparent(_) | Self::NewLine => {}
        }
    }
}

#[inline]
const fn run_bits(n: usize) -> u8 {
    (n.wrapping_sub(1) as u8) & TGX_MASK_RUN
}
