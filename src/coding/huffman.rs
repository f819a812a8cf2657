//! A static Huffman encoder and decoder.
//!
//! Container layout, all numbers little endian:
//! [control: u8] freq_width in the low nibble, count_width in the high nibble.
//! [symbols - 1: u8]
//! [symbol: u8, frequency: freq_width bytes] * symbols, ascending by symbol
//! [element count: count_width bytes]
//! [payload] codewords packed with 'BitWriter', zero padded.
//!
//! An empty input is encoded as an empty container.

use crate::bitstream::{BitReader, BitWriter};
use crate::coding::hist::{FrequencyTable, Histogram};
use crate::coding::tree::HuffmanTree;
use crate::error::{FormatError, Result};
use crate::utils::byte_encoding::{self, byte_width, MAX_WIDTH};
use crate::{Codec, Context, Decoder, Encoder};

/// Counters that describe the last encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HuffmanStats {
    /// The number of distinct symbols.
    pub symbols: usize,
    /// The width of each serialized frequency, in bytes.
    pub freq_width: usize,
    /// The width of the element count, in bytes.
    pub count_width: usize,
    /// The length of the packed payload, in bits.
    pub payload_bits: usize,
}

/// A Huffman Encoder.
pub struct HuffmanEncoder<'a> {
    /// The uncompressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
    /// Encoder context.
    ctx: Context,
    /// Counters of the last encoding.
    stats: HuffmanStats,
}

impl<'a> HuffmanEncoder<'a> {
    pub fn stats(&self) -> HuffmanStats {
        self.stats
    }

    /// Write the control byte, the symbol table and the element count.
    fn write_header(
        &mut self,
        table: &FrequencyTable,
        freq_width: usize,
        count_width: usize,
    ) {
        debug_assert!((1..=MAX_WIDTH).contains(&freq_width));
        debug_assert!((1..=MAX_WIDTH).contains(&count_width));
        self.output.push(((count_width << 4) | freq_width) as u8);
        self.output.push((table.len() - 1) as u8);
        for &(sym, freq) in table {
            self.output.push(sym);
            byte_encoding::write(freq, freq_width, self.output);
        }
        byte_encoding::write(self.input.len() as u64, count_width, self.output);
    }

    fn encode_impl(&mut self) -> usize {
        self.stats = HuffmanStats::default();
        if self.input.is_empty() {
            return 0;
        }
        let start = self.output.len();

        let mut hist: Histogram<256> = Histogram::from_data(self.input);
        if self.ctx.normalize_frequencies() {
            let divisor = hist.normalize();
            log::trace!("huffman: normalized frequencies by {}", divisor);
        }
        let table = hist.frequency_table();
        let Some(tree) = HuffmanTree::build(&table) else {
            return 0;
        };
        let codes = tree.code_table();

        let max_freq = table.iter().map(|(_, f)| *f).max().unwrap_or(0);
        let freq_width = byte_width(max_freq);
        let count_width = byte_width(self.input.len() as u64);
        self.write_header(&table, freq_width, count_width);

        let mut bits = BitWriter::with_capacity(self.input.len());
        for &sym in self.input {
            if let Some(code) = codes.get(sym) {
                bits.extend(code.iter().by_vals());
            }
        }

        self.stats = HuffmanStats {
            symbols: table.len(),
            freq_width,
            count_width,
            payload_bits: bits.len(),
        };
        self.output.extend_from_slice(bits.as_bytes());

        let written = self.output.len() - start;
        log::debug!(
            "huffman: {} bytes -> {} bytes ({} symbols, {} payload bits)",
            self.input.len(),
            written,
            table.len(),
            self.stats.payload_bits
        );
        written
    }
}

/// A Huffman Decoder.
pub struct HuffmanDecoder<'a> {
    /// The compressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
}

/// Check that a width from the control byte can be read into a word.
fn check_width(field: &'static str, width: usize) -> Result<usize> {
    if width == 0 || width > MAX_WIDTH {
        return Err(FormatError::InvalidWidth { field, width });
    }
    Ok(width)
}

impl<'a> HuffmanDecoder<'a> {
    /// Read the symbol table that starts at 'cursor'. Returns the table and
    /// the cursor past it.
    fn read_table(
        &self,
        symbols: usize,
        freq_width: usize,
        cursor: usize,
    ) -> Result<(FrequencyTable, usize)> {
        let entry_size = 1 + freq_width;
        let needed = symbols * entry_size;
        let available = self.input.len() - cursor;
        if available < needed {
            return Err(FormatError::Truncated {
                field: "symbol table",
                needed,
                available,
            });
        }

        let mut table: FrequencyTable = Vec::with_capacity(symbols);
        let entries = &self.input[cursor..cursor + needed];
        for entry in entries.chunks_exact(entry_size) {
            let symbol = entry[0];
            let freq = byte_encoding::from_bytes(&entry[1..]);
            if freq == 0 {
                return Err(FormatError::ZeroFrequency { symbol });
            }
            if let Some(&(prev, _)) = table.last() {
                if symbol <= prev {
                    return Err(FormatError::UnorderedSymbols { symbol });
                }
            }
            table.push((symbol, freq));
        }
        Ok((table, cursor + needed))
    }

    /// Check that 'count' elements agree with the symbol table. The encoder
    /// divides the counts by a common factor, so the number of elements must
    /// be a multiple of the sum of the frequencies.
    fn check_count(table: &FrequencyTable, count: u64) -> Result<()> {
        let sum: u128 = table.iter().map(|(_, f)| *f as u128).sum();
        if count == 0 || (count as u128) % sum != 0 {
            return Err(FormatError::CountMismatch {
                declared: count,
                sum: sum.min(u64::MAX as u128) as u64,
            });
        }
        Ok(())
    }

    fn decode_impl(&mut self) -> Result<(usize, usize)> {
        let input = self.input;
        if input.is_empty() {
            return Ok((0, 0));
        }

        let control = input[0] as usize;
        let freq_width = check_width("frequency", control & 0xf)?;
        let count_width = check_width("count", control >> 4)?;
        let symbols = *input.get(1).ok_or(FormatError::Truncated {
            field: "symbol count",
            needed: 1,
            available: 0,
        })? as usize
            + 1;

        let (table, mut cursor) = self.read_table(symbols, freq_width, 2)?;
        let count = byte_encoding::read(&input[cursor..], count_width).ok_or(
            FormatError::Truncated {
                field: "element count",
                needed: count_width,
                available: input.len() - cursor,
            },
        )?;
        cursor += count_width;
        Self::check_count(&table, count)?;
        log::trace!(
            "huffman: {} symbols, {} elements, widths {}/{}",
            symbols,
            count,
            freq_width,
            count_width
        );

        let tree = match HuffmanTree::build(&table) {
            Some(tree) => tree,
            None => unreachable!("The symbol table holds at least one entry"),
        };
        let payload = &input[cursor..];

        // A single symbol has an empty codeword, so the payload is empty.
        if let Some(sym) = tree.single_symbol() {
            let overflow = FormatError::CountOverflow {
                declared: count,
                limit: isize::MAX as u64,
            };
            let len = usize::try_from(count).map_err(|_| overflow.clone())?;
            self.output.try_reserve(len).map_err(|_| overflow)?;
            self.output.resize(self.output.len() + len, sym);
            return Ok((cursor, len));
        }

        // Every codeword takes at least one bit.
        let limit = payload.len() as u64 * 8;
        if count > limit {
            return Err(FormatError::CountOverflow {
                declared: count,
                limit,
            });
        }

        let mut reader = BitReader::new(payload);
        let mut decoded = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let sym = tree.read_symbol(&mut reader).ok_or(
                FormatError::Truncated {
                    field: "payload",
                    needed: payload.len() + 1,
                    available: payload.len(),
                },
            )?;
            decoded.push(sym);
        }

        self.output.extend_from_slice(&decoded);
        let consumed = cursor + reader.consumed();
        log::debug!(
            "huffman: {} bytes -> {} bytes",
            consumed,
            decoded.len()
        );
        Ok((consumed, decoded.len()))
    }
}

impl<'a> Encoder<'a> for HuffmanEncoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>, ctx: Context) -> Self {
        Self {
            input,
            output,
            ctx,
            stats: HuffmanStats::default(),
        }
    }

    fn encode(&mut self) -> usize {
        self.encode_impl()
    }
}

impl<'a> Decoder<'a> for HuffmanDecoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        Self { input, output }
    }

    fn decode(&mut self) -> Result<(usize, usize)> {
        self.decode_impl()
    }
}

/// The Huffman codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct Huffman {
    ctx: Context,
}

impl Huffman {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

impl Codec for Huffman {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn encode(&self, raw: &[u8]) -> Vec<u8> {
        let mut encoded = Vec::new();
        let _ = HuffmanEncoder::new(raw, &mut encoded, self.ctx).encode();
        encoded
    }

    fn decode(&self, compressed: &[u8]) -> Result<Vec<u8>> {
        let mut decoded = Vec::new();
        HuffmanDecoder::new(compressed, &mut decoded).decode()?;
        Ok(decoded)
    }
}
