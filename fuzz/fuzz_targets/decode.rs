#![no_main]
use libfuzzer_sys::fuzz_target;

use tgx::{decode_header, decode_to_image, Error, Header, Image, RasterImage};

fuzz_target!(|input: (u16, u16, &[u8])| {
    let (w, h, data) = input;
    let (w, h) = (1 + w % 260, 1 + h % 260);

    let header_expected = Header { width: w, height: h };
    let mut vec = header_expected.encode().to_vec();
    vec.extend(data);

    assert_eq!(decode_header(&vec).unwrap(), header_expected);

    match decode_to_image::<Image>(&vec) {
        Ok(img) => {
            assert_eq!((img.width(), img.height()), (u32::from(w), u32::from(h)));
            assert!(img.pixels().iter().all(|px| px.a == 0 || px.a == 0xff));
        }
        Err(Error::TruncatedInput { .. } | Error::UnknownOpcode { .. } | Error::PixelOutOfBounds { .. }) => {}
        Err(err) => panic!("unexpected error: {}", err),
    }
});
