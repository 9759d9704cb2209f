#![no_main]
use libfuzzer_sys::fuzz_target;

use tgx::{decode_to_image, encode_max_len, encode_to_vec, Image, RasterImage};

fuzz_target!(|input: (u8, &[u8])| {
    let (w_frac, data) = input;
    let n_pixels = data.len() / 4;
    let (w, h) = if n_pixels == 0 {
        (0, 0)
    } else {
        let w = ((n_pixels * (1 + w_frac as usize)) / 256).max(1);
        let h = n_pixels / w;
        (w, h)
    };
    let img = Image::from_rgba_bytes(w as u32, h as u32, &data[..(w * h * 4)]).unwrap();
    let out = encode_to_vec(&img);
    if w * h != 0 {
        let out = out.unwrap();
        assert!(out.len() <= encode_max_len(w as u32, h as u32));
        let decoded: Image = decode_to_image(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (img.width(), img.height()));
    } else {
        assert!(out.is_err());
    }
});
