#![no_main]

use compression::lzw::{LzwDecoder, LzwEncoder};
use compression::{Context, Decoder, Encoder, PointerWidth};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for width in [PointerWidth::Strict, PointerWidth::Legacy] {
        let mut compressed: Vec<u8> = Vec::new();
        {
            let ctx = Context::new(width, true);
            let mut encoder = LzwEncoder::new(data, &mut compressed, ctx);
            let written = encoder.encode();
            assert_eq!(written, compressed.len());
        }

        let mut decompressed: Vec<u8> = Vec::new();
        {
            let mut decoder = LzwDecoder::new(&compressed, &mut decompressed);
            let (consumed, written) = decoder.decode().unwrap();
            assert_eq!(consumed, compressed.len());
            assert_eq!(written, decompressed.len());
        }
        assert_eq!(decompressed, data);
    }
});
