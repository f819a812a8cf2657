use compression::coding::huffman::{HuffmanDecoder, HuffmanEncoder};
use compression::{Context, Decoder, Encoder, FormatError, PointerWidth};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

/// Decode 'compressed' into a fresh buffer.
fn decode(compressed: &[u8]) -> Result<Vec<u8>, FormatError> {
    let mut decompressed = Vec::new();
    let (_, written) =
        HuffmanDecoder::new(compressed, &mut decompressed).decode()?;
    assert_eq!(written, decompressed.len());
    Ok(decompressed)
}

fn round_trip_with(input: &[u8], ctx: Context) -> Vec<u8> {
    let mut compressed: Vec<u8> = Vec::new();
    {
        let mut encoder = HuffmanEncoder::new(input, &mut compressed, ctx);
        let written = encoder.encode();
        assert_eq!(written, compressed.len());
    }

    let mut decompressed = Vec::new();
    let (consumed, _) = HuffmanDecoder::new(&compressed, &mut decompressed)
        .decode()
        .unwrap();
    assert_eq!(consumed, compressed.len());
    assert_eq!(decompressed, input);
    compressed
}

fn round_trip(input: &[u8]) {
    for normalize in [true, false] {
        round_trip_with(input, Context::new(PointerWidth::Strict, normalize));
    }
}

#[test]
fn test_empty_input() {
    let compressed = round_trip_with(&[], Context::default());
    assert!(compressed.is_empty());
    assert_eq!(decode(&[]), Ok(Vec::new()));
}

#[test]
fn test_single_symbol_container() {
    let input = vec![0x41; 1000];
    let mut compressed = Vec::new();
    let mut encoder =
        HuffmanEncoder::new(&input, &mut compressed, Context::default());
    let _ = encoder.encode();
    let stats = encoder.stats();
    assert_eq!(stats.symbols, 1);
    assert_eq!(stats.payload_bits, 0);
    assert_eq!(compressed, [0x21, 0x00, 0x41, 0x01, 0xe8, 0x03]);
    assert_eq!(decode(&compressed).unwrap(), input);

    let ctx = Context::new(PointerWidth::Strict, false);
    let compressed = round_trip_with(&input, ctx);
    assert_eq!(compressed, [0x22, 0x00, 0x41, 0xe8, 0x03, 0xe8, 0x03]);
}

#[test]
fn test_two_symbol_container() {
    // 'b' is the rarer symbol and takes the left edge.
    let compressed = round_trip_with(b"aab", Context::default());
    assert_eq!(compressed, [0x11, 0x01, 0x61, 0x02, 0x62, 0x01, 0x03, 0x04]);
}

#[test]
fn test_huffman_round_trip_const_inputs() {
    round_trip(&[0]);
    round_trip(&[255, 255]);
    round_trip(&[1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0, 0]);
    round_trip(b"sir sid eastman easily teases sea sick seals");
    round_trip(b"this is an example of a huffman tree");
    round_trip(&vec![0; 100_000]);
}

#[test]
fn test_huffman_round_trip_alphabet() {
    let mut input = Vec::new();
    for i in 0..=255u8 {
        input.extend(std::iter::repeat(i).take(1 + i as usize % 7));
    }
    let compressed = round_trip_with(&input, Context::default());
    assert_eq!(compressed[1], 255);
}

#[test]
fn test_huffman_round_trip_random() {
    let mut rng = StdRng::seed_from_u64(2);
    let uniform = Uniform::new_inclusive(0, 255);
    let normal = Normal::new(100.0_f32, 8.0_f32).unwrap();

    for i in 1..20 {
        let input: Vec<u8> = (0..i * 1001)
            .map(|_| uniform.sample(&mut rng) as u8)
            .collect();
        round_trip(&input);

        let input: Vec<u8> =
            (0..i * 997).map(|_| normal.sample(&mut rng) as u8).collect();
        round_trip(&input);
    }
}

#[test]
fn test_compresses_skewed_input() {
    let mut rng = StdRng::seed_from_u64(5);
    let normal = Normal::new(100.0_f32, 2.0_f32).unwrap();
    let input: Vec<u8> =
        (0..50_000).map(|_| normal.sample(&mut rng) as u8).collect();
    let compressed = round_trip_with(&input, Context::default());
    assert!(compressed.len() < input.len() / 2);
}

#[test]
fn test_trailing_bytes_are_not_consumed() {
    let mut compressed = round_trip_with(b"aab", Context::default());
    let len = compressed.len();
    compressed.extend([0xff, 0xff]);

    let mut decoded = Vec::new();
    let res = HuffmanDecoder::new(&compressed, &mut decoded).decode();
    assert_eq!(res, Ok((len, 3)));
    assert_eq!(decoded, b"aab");
}

#[test]
fn test_huffman_decoder_errors() {
    use FormatError::*;

    assert!(matches!(
        decode(&[0x00]),
        Err(InvalidWidth {
            field: "frequency",
            width: 0
        })
    ));
    assert!(matches!(
        decode(&[0x91]),
        Err(InvalidWidth {
            field: "count",
            width: 9
        })
    ));
    assert!(matches!(
        decode(&[0x11]),
        Err(Truncated {
            field: "symbol count",
            ..
        })
    ));
    assert!(matches!(
        decode(&[0x11, 0x01, 0x61, 0x02]),
        Err(Truncated {
            field: "symbol table",
            needed: 4,
            available: 2,
        })
    ));
    assert!(matches!(
        decode(&[0x21, 0x00, 0x41, 0x01, 0xe8]),
        Err(Truncated {
            field: "element count",
            needed: 2,
            available: 1,
        })
    ));
    assert_eq!(
        decode(&[0x11, 0x01, 0x62, 0x01, 0x61, 0x01, 0x02]),
        Err(UnorderedSymbols { symbol: 0x61 })
    );
    assert_eq!(
        decode(&[0x11, 0x00, 0x61, 0x00, 0x05]),
        Err(ZeroFrequency { symbol: 0x61 })
    );
    assert_eq!(
        decode(&[0x11, 0x01, 0x61, 0x02, 0x62, 0x01, 0x04, 0x04]),
        Err(CountMismatch { declared: 4, sum: 3 })
    );
    assert_eq!(
        decode(&[0x11, 0x00, 0x61, 0x01, 0x00]),
        Err(CountMismatch { declared: 0, sum: 1 })
    );
    assert_eq!(
        decode(&[0x11, 0x01, 0x61, 0x01, 0x62, 0x01, 0x10]),
        Err(CountOverflow {
            declared: 16,
            limit: 0
        })
    );
    assert!(matches!(
        decode(&[
            0x11, 0x02, 0x61, 0x01, 0x62, 0x01, 0x63, 0x01, 0x06, 0x00
        ]),
        Err(Truncated {
            field: "payload",
            needed: 2,
            available: 1,
        })
    ));
}

#[test]
fn test_huge_single_symbol_count() {
    let mut input = vec![0x81, 0x00, 0x41, 0x01];
    input.extend([0xff; 8]);
    let mut decoded = Vec::new();
    let res = HuffmanDecoder::new(&input, &mut decoded).decode();
    assert!(matches!(res, Err(FormatError::CountOverflow { .. })));
    assert!(decoded.is_empty());
}

#[test]
fn test_huffman_decoder_no_partial_output() {
    let mut output = b"keep".to_vec();
    let input = [0x11, 0x02, 0x61, 0x01, 0x62, 0x01, 0x63, 0x01, 0x06, 0x00];
    let res = HuffmanDecoder::new(&input, &mut output).decode();
    assert!(res.is_err());
    assert_eq!(output, b"keep");
}

#[test]
fn test_huffman_decoder_random_input() {
    let mut rng = StdRng::seed_from_u64(11);
    let uniform = Uniform::new_inclusive(0, 255);

    // Random buffers must never crash the decoder.
    for i in 1..200 {
        let mut input: Vec<u8> =
            (0..i * 3).map(|_| uniform.sample(&mut rng) as u8).collect();
        input[0] = 0x11 + (i % 2) as u8;
        let mut decoded = Vec::new();
        if let Ok((read, written)) =
            HuffmanDecoder::new(&input, &mut decoded).decode()
        {
            assert!(read <= input.len());
            assert_eq!(written, decoded.len());
        }
    }
}
