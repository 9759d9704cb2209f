//! Encoder and decoder for TGX images.
//!
//! TGX is a compact image format: an 8-byte header (width and height as
//! little-endian `u16`) followed by a stream of run-length tokens. Opaque
//! pixels are stored as 15-bit `0RRRRRGGGGGBBBBB` color words, transparency
//! is encoded by skipping pixels.
//!
//! ```text
//! offset 0: width    u16
//! offset 2: reserved u16
//! offset 4: height   u16
//! offset 6: reserved u16
//! offset 8: tokens until the end of the buffer
//! ```
//!
//! Each token starts with a control byte: the upper 3 bits are the opcode,
//! the lower 5 bits are the run length minus one (see [`Token`]).
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::inline_always,
    clippy::similar_names,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::cargo_common_metadata
)]

extern crate alloc;

mod color;
mod decode;
mod encode;
mod error;
mod header;
mod image;
mod pixel;
mod token;
mod utils;

#[doc(hidden)]
pub mod consts;

pub use crate::color::Color16;
#[cfg(feature = "std")]
pub use crate::decode::decode_from_reader;
pub use crate::decode::{decode_header, decode_into, decode_to_image, Decoder};
pub use crate::encode::{encode_max_len, encode_to_vec, Encoder};
pub use crate::error::{Error, Result};
pub use crate::header::Header;
pub use crate::image::{Image, RasterImage};
pub use crate::pixel::Pixel;
pub use crate::token::{Opcode, Token};
