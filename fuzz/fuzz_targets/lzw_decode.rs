#![no_main]

use compression::lzw::LzwDecoder;
use compression::Decoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = LzwDecoder::new(data, &mut decompressed);
        if decoder.decode().is_err() {
            assert!(decompressed.is_empty());
        }
    }
});
