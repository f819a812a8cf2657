//! A dictionary coder in the Lempel–Ziv–Welch family.

mod codec;
pub mod dictionary;
pub use codec::pointer_size;
pub use codec::{Lzw, LzwDecoder, LzwEncoder, LzwStats};
