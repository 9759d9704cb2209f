#![allow(unused)]

use rand::Rng;

use tgx::{Decoder, Header, Image, Pixel, RasterImage, Token};

pub fn tgx_bytes(width: u16, height: u16, tokens: &[u8]) -> Vec<u8> {
    let header = Header { width, height };
    let mut out = header.encode().to_vec();
    out.extend_from_slice(tokens);
    out
}

pub fn image_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Pixel) -> Image {
    let mut img = Image::new_blank(width, height);
    for y in 0..height {
        for x in 0..width {
            img.set_pixel(x, y, f(x, y));
        }
    }
    img
}

/// Random image made of opaque and transparent stretches of varying length,
/// some of them a single repeated color.
pub fn random_image(rng: &mut impl Rng, width: u32, height: u32) -> Image {
    let n_pixels = (width * height) as usize;
    let mut pixels = Vec::with_capacity(n_pixels);
    while pixels.len() < n_pixels {
        let len = rng.random_range(1_usize..=70);
        match rng.random_range(0..3) {
            0 => pixels.extend((0..len).map(|_| Pixel::new(rng.random(), rng.random(), rng.random(), 0))),
            1 => {
                let px = Pixel::new(rng.random(), rng.random(), rng.random(), rng.random_range(1..=255));
                pixels.extend((0..len).map(|_| px));
            }
            _ => pixels.extend(
                (0..len).map(|_| Pixel::new(rng.random(), rng.random(), rng.random(), rng.random_range(1..=255))),
            ),
        }
    }
    pixels.truncate(n_pixels);
    Image::from_pixels(width, height, pixels).unwrap()
}

/// Checks the lossy round trip contract of a decoded image against its source.
pub fn assert_lossy_eq(original: &Image, decoded: &Image) {
    assert_eq!(original.width(), decoded.width());
    assert_eq!(original.height(), decoded.height());
    for y in 0..original.height() {
        for x in 0..original.width() {
            let (src, dst) = (original.get_pixel(x, y), decoded.get_pixel(x, y));
            if src.is_transparent() {
                assert_eq!(dst, Pixel::TRANSPARENT, "pixel ({}, {})", x, y);
            } else {
                assert_eq!(dst.a, 0xff, "pixel ({}, {})", x, y);
                for (a, b) in [(src.r, dst.r), (src.g, dst.g), (src.b, dst.b)] {
                    assert!(a >= b && a - b <= 7, "pixel ({}, {}): {:?} -> {:?}", x, y, src, dst);
                }
            }
        }
    }
}

pub fn collect_tokens(data: &[u8]) -> tgx::Result<Vec<Token<'_>>> {
    let mut decoder = Decoder::new(data)?;
    let mut tokens = vec![];
    while let Some(token) = decoder.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
