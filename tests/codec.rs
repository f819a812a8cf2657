use compression::coding::huffman::Huffman;
use compression::lzw::Lzw;
use compression::utils::signatures::{match_signature, HUFFMAN_SIG, LZW_SIG};
use compression::{Codec, CodecKind, Context, PointerWidth};

const TEXT: &str = "sir sid eastman easily teases sea sick seals";

fn all_codecs() -> Vec<Box<dyn Codec>> {
    let mut codecs = Vec::new();
    for kind in [CodecKind::Lzw, CodecKind::Huffman] {
        codecs.push(kind.build(Context::default()));
        codecs.push(kind.build(Context::new(PointerWidth::Legacy, false)));
    }
    codecs
}

#[test]
fn test_codec_names() {
    assert_eq!(CodecKind::Lzw.build(Context::default()).name(), "lzw");
    assert_eq!(CodecKind::Huffman.build(Context::default()).name(), "huffman");
}

#[test]
fn test_codec_round_trip() {
    let inputs: [&[u8]; 5] = [
        &[],
        &[0x41],
        TEXT.as_bytes(),
        &[7; 5000],
        b"TOBEORNOTTOBEORTOBEORNOT",
    ];

    for codec in all_codecs() {
        for input in inputs {
            let compressed = codec.encode(input);
            let decoded = codec.decode(&compressed).unwrap();
            assert_eq!(decoded, input, "codec {}", codec.name());
        }
    }
}

#[test]
fn test_codec_rejects_garbage() {
    for codec in all_codecs() {
        assert!(codec.decode(&[0xf0]).is_err(), "codec {}", codec.name());
    }
}

#[test]
fn test_shared_between_threads() {
    let lzw = Lzw::new(Context::default());
    let huffman = Huffman::new(Context::default());
    let inputs: Vec<Vec<u8>> = (1..8).map(|i| TEXT.repeat(i).into_bytes()).collect();

    std::thread::scope(|s| {
        for input in &inputs {
            let (lzw, huffman) = (&lzw, &huffman);
            s.spawn(move || {
                assert_eq!(lzw.decode(&lzw.encode(input)).unwrap(), *input);
                assert_eq!(huffman.decode(&huffman.encode(input)).unwrap(), *input);
            });
        }
    });
}

#[test]
fn test_signatures() {
    assert!(match_signature(&[0x1f, 0x9d, 0x17, 0x05, 0x00], &LZW_SIG));
    assert!(!match_signature(&[0x1f, 0x9d], &LZW_SIG));
    assert!(!match_signature(&LZW_SIG, &HUFFMAN_SIG));
}
