//! Benchmark for the LZW and Huffman codecs.

use compression::coding::huffman::{HuffmanDecoder, HuffmanEncoder};
use compression::lzw::{LzwDecoder, LzwEncoder};
use compression::{Context, Decoder, Encoder};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn get_text(items: usize) -> Vec<u8> {
    let text = b"sir sid eastman easily teases sea sick seals ";
    text.iter().copied().cycle().take(items).collect()
}

fn get_large_array(items: usize) -> Vec<u8> {
    let mut input = Vec::new();
    let mut v = 0;
    for i in 0..items {
        v += 3;
        input.push((i ^ v) as u8);
    }
    input
}

fn lzw_round_trip(input: &[u8]) {
    let mut compressed = Vec::new();
    let _ = LzwEncoder::new(input, &mut compressed, Context::default()).encode();
    let mut decompressed = Vec::new();
    let res = LzwDecoder::new(&compressed, &mut decompressed).decode();
    black_box(res.is_ok());
}

fn huffman_round_trip(input: &[u8]) {
    let mut compressed = Vec::new();
    let _ =
        HuffmanEncoder::new(input, &mut compressed, Context::default()).encode();
    let mut decompressed = Vec::new();
    let res = HuffmanDecoder::new(&compressed, &mut decompressed).decode();
    black_box(res.is_ok());
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let text = get_text(100_000);
    let noise = get_large_array(100_000);
    c.bench_function("lzw_text", |b| b.iter(|| lzw_round_trip(&text)));
    c.bench_function("lzw_noise", |b| b.iter(|| lzw_round_trip(&noise)));
    c.bench_function("huffman_text", |b| b.iter(|| huffman_round_trip(&text)));
    c.bench_function("huffman_noise", |b| {
        b.iter(|| huffman_round_trip(&noise))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
