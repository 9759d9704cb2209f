use core::fmt::{self, Display};

use crate::consts::TGX_DIM_MAX;

#[derive(Debug)]
pub enum Error {
    TruncatedInput {
        offset: usize,
        required: usize,
        available: usize,
    },
    UnknownOpcode {
        opcode: u8,
        offset: usize,
    },
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    EmptyImage {
        width: u32,
        height: u32,
    },
    ImageTooLarge {
        width: u32,
        height: u32,
    },
    InvalidImageLength {
        size: usize,
        width: u32,
        height: u32,
    },
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[cfg(feature = "std")]
    IoError(std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::TruncatedInput { offset, required, available } => {
                write!(
                    f,
                    "unexpected end of input at offset {}: need {} bytes, {} available",
                    offset, required, available
                )
            }
            Self::UnknownOpcode { opcode, offset } => {
                write!(f, "unknown token opcode {} at offset {}", opcode, offset)
            }
            Self::PixelOutOfBounds { x, y, width, height } => {
                write!(f, "pixel write at ({}, {}) is outside of {}x{} image", x, y, width, height)
            }
            Self::EmptyImage { width, height } => {
                write!(f, "image contains no pixels: {}x{}", width, height)
            }
            Self::ImageTooLarge { width, height } => {
                write!(f, "image is too large: {}x{} (max={}x{})", width, height, TGX_DIM_MAX, TGX_DIM_MAX)
            }
            Self::InvalidImageLength { size, width, height } => {
                write!(f, "invalid image length: {} for {}x{}", size, width, height)
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "image dimensions mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            #[cfg(feature = "std")]
            Self::IoError(ref err) => {
                write!(f, "i/o error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}
