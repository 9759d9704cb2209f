pub const TGX_OP_PIXEL_STREAM: u8 = 0x00;
pub const TGX_OP_TRANSPARENT: u8 = 0x20;
pub const TGX_OP_REPEAT: u8 = 0x40;
pub const TGX_OP_NEWLINE: u8 = 0x80;

pub const TGX_MASK_OPCODE: u8 = 0xe0;
pub const TGX_MASK_RUN: u8 = 0x1f;
pub const TGX_OPCODE_SHIFT: u32 = 5;

pub const TGX_RUN_MAX: usize = 32;

pub const TGX_COLOR_MASK_BLUE: u16 = 0x001f;
pub const TGX_COLOR_MASK_GREEN: u16 = 0x03e0;
pub const TGX_COLOR_MASK_RED: u16 = 0x7c00;

pub const TGX_HEADER_SIZE: usize = 8;
pub const TGX_COLOR_SIZE: usize = 2;
pub const TGX_DIM_MAX: u32 = u16::MAX as u32;

pub const TGX_EXTENSION: &str = "tgx";
