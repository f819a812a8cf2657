//! An LZW encoder and decoder that store the dictionary in the container.
//!
//! Container layout, all numbers little endian:
//! [ptr_size: u8]
//! [new entries count: ptr_size bytes]
//! [parent: ptr_size bytes, symbol: u8] * new entries count
//! [token: ptr_size bytes] * until the end of the buffer

use crate::error::{FormatError, Result};
use crate::lzw::dictionary::{Dictionary, ALPHABET_SIZE};
use crate::utils::byte_encoding::{self, bit_length, byte_width, MAX_WIDTH};
use crate::{Codec, Context, Decoder, Encoder, PointerWidth};

/// Returns the number of bytes that each pointer takes in a container whose
/// dictionary has 'dict_len' entries.
pub fn pointer_size(dict_len: usize, width: PointerWidth) -> usize {
    debug_assert!(dict_len >= ALPHABET_SIZE);
    match width {
        PointerWidth::Strict => byte_width(dict_len as u64 - 1),
        PointerWidth::Legacy => bit_length(dict_len as u64) as usize / 8 + 1,
    }
}

/// Counters that describe the last encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LzwStats {
    /// The number of pointers in the token stream.
    pub tokens: usize,
    /// The number of times that the current match could not be extended.
    pub misses: usize,
    /// The number of entries that were added to the dictionary.
    pub new_entries: usize,
    /// The width of each pointer, in bytes.
    pub ptr_size: usize,
}

/// An LZW Encoder.
pub struct LzwEncoder<'a> {
    /// The uncompressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
    /// Encoder context.
    ctx: Context,
    /// Counters of the last encoding.
    stats: LzwStats,
}

impl<'a> LzwEncoder<'a> {
    pub fn stats(&self) -> LzwStats {
        self.stats
    }

    /// Scan the input and grow 'dict'. Returns the pointer tokens.
    fn tokenize(&mut self, dict: &mut Dictionary) -> Vec<usize> {
        let mut tokens = Vec::new();
        // The current match is input[start..i], and 'curr' is its node.
        let mut start = 0;
        let mut curr: Option<usize> = None;

        for (i, &x) in self.input.iter().enumerate() {
            match (dict.child(curr, x), curr) {
                (Some(next), _) => curr = Some(next),
                (None, Some(matched)) => {
                    let created = dict.put_symbol(matched, x);
                    debug_assert!(created.is_some());
                    tokens.push(matched);
                    self.stats.misses += 1;
                    start = i;
                    curr = dict.child(None, x);
                }
                (None, None) => unreachable!("Every byte has a root edge"),
            }
        }

        // Flush the pending match.
        if let Some(last) = dict.put_sequence(&self.input[start..]) {
            tokens.push(last);
        }
        tokens
    }

    fn encode_impl(&mut self) -> usize {
        self.stats = LzwStats::default();
        let mut dict = Dictionary::new();
        let tokens = self.tokenize(&mut dict);

        let ptr_size = pointer_size(dict.len(), self.ctx.pointer_width());
        let new_entries = dict.len() - ALPHABET_SIZE;
        self.stats.tokens = tokens.len();
        self.stats.new_entries = new_entries;
        self.stats.ptr_size = ptr_size;

        let start = self.output.len();
        self.output
            .reserve(1 + ptr_size * (1 + new_entries + tokens.len()) + new_entries);

        self.output.push(ptr_size as u8);
        byte_encoding::write(new_entries as u64, ptr_size, self.output);

        for node in dict.new_entries() {
            debug_assert!(node.parent.is_some());
            let parent = node.parent.unwrap_or(0) as u64;
            byte_encoding::write(parent, ptr_size, self.output);
            self.output.push(node.symbol);
        }

        for token in &tokens {
            byte_encoding::write(*token as u64, ptr_size, self.output);
        }

        let written = self.output.len() - start;
        log::debug!(
            "lzw: {} bytes -> {} bytes ({} tokens, {} new entries, {} byte pointers)",
            self.input.len(),
            written,
            tokens.len(),
            new_entries,
            ptr_size
        );
        written
    }
}

/// An LZW Decoder.
pub struct LzwDecoder<'a> {
    /// The compressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
}

impl<'a> LzwDecoder<'a> {
    /// Read the pointer width and check that it fits in a word.
    fn read_pointer_size(&self) -> Result<usize> {
        let ptr_size = *self.input.first().ok_or(FormatError::Truncated {
            field: "pointer size",
            needed: 1,
            available: 0,
        })? as usize;

        if ptr_size == 0 || ptr_size > MAX_WIDTH {
            return Err(FormatError::InvalidWidth {
                field: "pointer",
                width: ptr_size,
            });
        }
        Ok(ptr_size)
    }

    /// Rebuild the dictionary from the entries table that starts at 'cursor'.
    /// Returns the dictionary and the cursor past the table.
    fn read_dictionary(
        &self,
        ptr_size: usize,
        mut cursor: usize,
    ) -> Result<(Dictionary, usize)> {
        let input = self.input;
        let count = byte_encoding::read(&input[cursor..], ptr_size).ok_or(
            FormatError::Truncated {
                field: "entry count",
                needed: ptr_size,
                available: input.len() - cursor,
            },
        )?;
        cursor += ptr_size;

        // Check that the whole table is in the buffer before allocating.
        let entry_size = ptr_size + 1;
        let available = input.len() - cursor;
        if count > (available / entry_size) as u64 {
            return Err(FormatError::Truncated {
                field: "entries table",
                needed: (count as usize).saturating_mul(entry_size),
                available,
            });
        }

        let mut dict = Dictionary::with_capacity(count as usize);
        for entry in input[cursor..].chunks_exact(entry_size).take(count as usize) {
            let parent = byte_encoding::from_bytes(&entry[..ptr_size]);
            let symbol = entry[ptr_size];
            if parent >= dict.len() as u64 {
                return Err(FormatError::InvalidIndex {
                    index: parent,
                    size: dict.len(),
                });
            }
            let parent = parent as usize;
            dict.put_symbol(parent, symbol)
                .ok_or(FormatError::DuplicateEntry { parent, symbol })?;
        }
        cursor += count as usize * entry_size;
        Ok((dict, cursor))
    }

    fn decode_impl(&mut self) -> Result<(usize, usize)> {
        let ptr_size = self.read_pointer_size()?;
        let (dict, cursor) = self.read_dictionary(ptr_size, 1)?;
        log::trace!(
            "lzw: {} byte pointers, {} dictionary entries",
            ptr_size,
            dict.len()
        );

        let payload = &self.input[cursor..];
        if payload.len() % ptr_size != 0 {
            return Err(FormatError::TrailingBytes {
                remaining: payload.len() % ptr_size,
            });
        }

        // Nothing reaches 'output' until every token is valid.
        let mut decoded = Vec::with_capacity(payload.len());
        for chunk in payload.chunks_exact(ptr_size) {
            let ptr = byte_encoding::from_bytes(chunk);
            if ptr >= dict.len() as u64 {
                return Err(FormatError::InvalidIndex {
                    index: ptr,
                    size: dict.len(),
                });
            }
            dict.append_sequence(ptr as usize, &mut decoded);
        }

        self.output.extend_from_slice(&decoded);
        log::debug!(
            "lzw: {} bytes -> {} bytes ({} tokens)",
            self.input.len(),
            decoded.len(),
            payload.len() / ptr_size
        );
        Ok((self.input.len(), decoded.len()))
    }
}

impl<'a> Encoder<'a> for LzwEncoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>, ctx: Context) -> Self {
        Self {
            input,
            output,
            ctx,
            stats: LzwStats::default(),
        }
    }

    fn encode(&mut self) -> usize {
        self.encode_impl()
    }
}

impl<'a> Decoder<'a> for LzwDecoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        Self { input, output }
    }

    fn decode(&mut self) -> Result<(usize, usize)> {
        self.decode_impl()
    }
}

/// The LZW codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lzw {
    ctx: Context,
}

impl Lzw {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

impl Codec for Lzw {
    fn name(&self) -> &'static str {
        "lzw"
    }

    fn encode(&self, raw: &[u8]) -> Vec<u8> {
        let mut encoded = Vec::new();
        let _ = LzwEncoder::new(raw, &mut encoded, self.ctx).encode();
        encoded
    }

    fn decode(&self, compressed: &[u8]) -> Result<Vec<u8>> {
        let mut decoded = Vec::new();
        LzwDecoder::new(compressed, &mut decoded).decode()?;
        Ok(decoded)
    }
}
