use tgx::{Color16, Pixel};

#[test]
fn test_decode_channels() {
    assert_eq!(Color16::from_word(0x7c00).to_pixel(), Pixel::new(248, 0, 0, 255));
    assert_eq!(Color16::from_word(0x03e0).to_pixel(), Pixel::new(0, 248, 0, 255));
    assert_eq!(Color16::from_word(0x001f).to_pixel(), Pixel::new(0, 0, 248, 255));
    assert_eq!(Color16::from_word(0x0000).to_pixel(), Pixel::new(0, 0, 0, 255));
    // bit 15 is unused
    assert_eq!(Color16::from_word(0xffff).to_pixel(), Color16::from_word(0x7fff).to_pixel());
}

#[test]
fn test_encode_channels() {
    assert_eq!(Color16::from_pixel(Pixel::new(255, 0, 0, 255)).word(), 0x7c00);
    assert_eq!(Color16::from_pixel(Pixel::new(0, 255, 0, 255)).word(), 0x03e0);
    assert_eq!(Color16::from_pixel(Pixel::new(0, 0, 255, 255)).word(), 0x001f);
    assert_eq!(Color16::from_pixel(Pixel::new(7, 7, 7, 255)).word(), 0x0000);

    let color = Color16::from_pixel(Pixel::new(0x58, 0x90, 0x28, 255));
    assert_eq!((color.red5(), color.green5(), color.blue5()), (11, 18, 5));
}

#[test]
fn test_alpha_is_not_encoded() {
    let opaque = Color16::from_pixel(Pixel::new(100, 150, 200, 255));
    let translucent = Color16::from_pixel(Pixel::new(100, 150, 200, 1));
    let transparent = Color16::from_pixel(Pixel::new(100, 150, 200, 0));
    assert_eq!(opaque, translucent);
    assert_eq!(opaque, transparent);
}

#[test]
fn test_wire_bytes_are_little_endian() {
    let color = Color16::from_word(0x1234);
    assert_eq!(color.to_le_bytes(), [0x34, 0x12]);
    assert_eq!(Color16::from_le_bytes([0x34, 0x12]), color);
    assert_eq!(u16::from(color), 0x1234);
    assert_eq!(format!("{:?}", color), "Color16(0x1234)");
}

#[test]
fn test_quantization_error_bound() {
    for v in 0..=255_u8 {
        let px = Pixel::new(v, v, v, 255);
        let back = Pixel::from(Color16::from(px));
        assert_eq!(back.r, v & 0xf8);
        assert_eq!(back.g, v & 0xf8);
        assert_eq!(back.b, v & 0xf8);
        assert!(v - back.r <= 7);
        // stable after the first pass
        assert_eq!(Color16::from(back), Color16::from(px));
    }
}

#[test]
fn test_every_word_is_stable() {
    for word in 0..0x8000_u16 {
        let color = Color16::from_word(word);
        assert_eq!(Color16::from_pixel(color.to_pixel()), color);
    }
}
