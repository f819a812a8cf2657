#![no_main]

use compression::coding::huffman::{HuffmanDecoder, HuffmanEncoder};
use compression::{Context, Decoder, Encoder, PointerWidth};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for normalize in [true, false] {
        let mut compressed: Vec<u8> = Vec::new();
        {
            let ctx = Context::new(PointerWidth::Strict, normalize);
            let mut encoder = HuffmanEncoder::new(data, &mut compressed, ctx);
            let written = encoder.encode();
            assert_eq!(written, compressed.len());
        }

        let mut decompressed: Vec<u8> = Vec::new();
        {
            let mut decoder =
                HuffmanDecoder::new(&compressed, &mut decompressed);
            let (consumed, written) = decoder.decode().unwrap();
            assert_eq!(consumed, compressed.len());
            assert_eq!(written, decompressed.len());
        }
        assert_eq!(decompressed, data);
    }
});
