#![no_main]

use compression::coding::huffman::HuffmanDecoder;
use compression::Decoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = HuffmanDecoder::new(data, &mut decompressed);
        let _ = decoder.decode();
    }
});
