mod common;

use rand::{rngs::StdRng, Rng, SeedableRng};

use tgx::{consts::TGX_RUN_MAX, decode_to_image, encode_max_len, encode_to_vec, Image, RasterImage, Token};

use self::common::{assert_lossy_eq, collect_tokens, random_image};

#[test]
fn test_generated() {
    let mut rng = StdRng::seed_from_u64(0);

    let mut n_pixels = 0;
    while n_pixels < 2_000_000 {
        let width = rng.random_range(1..=300);
        let height = rng.random_range(1..=50);
        let img = random_image(&mut rng, width, height);

        let encoded = encode_to_vec(&img).unwrap();
        assert!(encoded.len() <= encode_max_len(width, height), "size limit exceeded");

        let decoded: Image = decode_to_image(&encoded).unwrap();
        assert_lossy_eq(&img, &decoded);

        let reencoded = encode_to_vec(&decoded).unwrap();
        let redecoded: Image = decode_to_image(&reencoded).unwrap();
        assert_eq!(decoded, redecoded, "re-encode is not idempotent");
        assert_eq!(encoded, reencoded, "quantized image encodes differently");

        n_pixels += (width * height) as usize;
    }
}

#[test]
fn test_generated_token_structure() {
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..200 {
        let (width, height) = (rng.random_range(1..=100), rng.random_range(1..=20));
        let img = random_image(&mut rng, width, height);
        let encoded = encode_to_vec(&img).unwrap();
        let tokens = collect_tokens(&encoded).unwrap();

        let mut row_len = 0;
        let mut n_rows = 0;
        for token in &tokens {
            match *token {
                Token::NewLine => {
                    assert_eq!(row_len, width as usize);
                    row_len = 0;
                    n_rows += 1;
                }
                Token::Repeat(_, n) => {
                    assert!(n >= 2);
                    row_len += token.run_len();
                }
                _ => row_len += token.run_len(),
            }
            if *token != Token::NewLine {
                assert!((1..=TGX_RUN_MAX).contains(&token.run_len()));
            }
        }
        assert_eq!(row_len, 0);
        assert_eq!(n_rows, height);
        assert_eq!(tokens.iter().map(Token::encoded_len).sum::<usize>() + 8, encoded.len());
    }
}

#[test]
fn test_random_streams_never_panic() {
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..10_000 {
        let (width, height) = (rng.random_range(1..=16_u16), rng.random_range(1..=16_u16));
        let len = rng.random_range(0..64);
        let tokens: Vec<u8> = (0..len).map(|_| rng.random()).collect();
        let data = common::tgx_bytes(width, height, &tokens);
        if let Ok(img) = decode_to_image::<Image>(&data) {
            assert_eq!((img.width(), img.height()), (u32::from(width), u32::from(height)));
        }
    }
}
