pub mod bitstream;
pub mod coding;
pub mod error;
pub mod lzw;
pub mod utils;

pub use error::{FormatError, Result};

/// Selects how many bytes the LZW container spends on each pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PointerWidth {
    /// The minimal number of bytes that holds the largest stored index.
    #[default]
    Strict,
    /// The historical rule `bits / 8 + 1`, which wastes a byte whenever the
    /// bit length of the dictionary size is a multiple of eight.
    Legacy,
}

/// Stores information about the environment.
#[derive(Copy, Clone, Debug)]
pub struct Context {
    /// Controls the width of the LZW pointers.
    pointer_width: PointerWidth,
    /// Divide the Huffman frequency table by its greatest common divisor
    /// before it is serialized.
    normalize_frequencies: bool,
}

impl Context {
    pub fn new(pointer_width: PointerWidth, normalize_frequencies: bool) -> Self {
        Self {
            pointer_width,
            normalize_frequencies,
        }
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.pointer_width
    }

    pub fn normalize_frequencies(&self) -> bool {
        self.normalize_frequencies
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(PointerWidth::Strict, true)
    }
}

/// A trait that defines the interface for encoding buffers.
pub trait Encoder<'a> {
    /// Creates a new Encoder that reads from 'input' and writes into 'output',
    /// with the encoder context 'ctx'.
    fn new(input: &'a [u8], output: &'a mut Vec<u8>, ctx: Context) -> Self;

    /// Encode the whole input buffer and return the number of bytes that were
    /// written into the output stream.
    #[must_use]
    fn encode(&mut self) -> usize;
}

/// A trait that defines the interface for decoding buffers.
pub trait Decoder<'a> {
    /// Creates a new Decoder that reads from 'input' and writes into 'output'.
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self;

    /// Try to decode the buffer 'input', and return the number of input bytes
    /// that were consumed followed by the number of bytes written. Nothing is
    /// written to the output if the input is malformed.
    fn decode(&mut self) -> Result<(usize, usize)>;
}

/// A stateless whole-buffer compressor. Every call allocates its own working
/// structures, so a single codec may be shared between threads.
pub trait Codec {
    /// A short name for reports.
    fn name(&self) -> &'static str;

    /// Compress 'raw' into a self-describing container.
    fn encode(&self, raw: &[u8]) -> Vec<u8>;

    /// Restore the bytes that were compressed into 'compressed'.
    fn decode(&self, compressed: &[u8]) -> Result<Vec<u8>>;
}

/// The codecs that this crate implements.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CodecKind {
    Lzw,
    Huffman,
}

impl CodecKind {
    /// Construct the codec, configured with 'ctx'.
    pub fn build(self, ctx: Context) -> Box<dyn Codec> {
        match self {
            CodecKind::Lzw => Box::new(lzw::Lzw::new(ctx)),
            CodecKind::Huffman => Box::new(coding::huffman::Huffman::new(ctx)),
        }
    }
}
