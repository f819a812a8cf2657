//! A collection of utilities for handling numbers, byte widths and signatures.

/// A collection of signatures that the command line tool places in front of
/// each container.
pub mod signatures {
    /// Signatures for different encoding kinds.
    pub const LZW_SIG: [u8; 4] = [0x1f, 0x9d, 0x17, 0x05];
    pub const HUFFMAN_SIG: [u8; 4] = [0x48, 0x55, 0x46, 0x17];
    pub const FILE_EXTENSION: &str = ".cz";

    /// Return True if 'input' starts with 'signature'.
    pub fn match_signature(input: &[u8], signature: &[u8]) -> bool {
        input.starts_with(signature)
    }
}

/// Implements encoding and decoding of little endian numbers that are
/// truncated to a caller-selected number of bytes.
/// The number 0x1234 written with width 3 is serialized as [0x34, 0x12, 0].
pub mod byte_encoding {
    /// The widest number that we can store.
    pub const MAX_WIDTH: usize = 8;

    /// Return the lowest 'width' bytes of 'val', least significant first.
    /// Widths above 8 are zero padded.
    pub fn to_bytes(val: u64, width: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(width);
        write(val, width, &mut bytes);
        bytes
    }

    /// Write the lowest 'width' bytes of 'val' into 'stream' and return the
    /// number of bytes written.
    pub fn write(val: u64, width: usize, stream: &mut Vec<u8>) -> usize {
        let le = val.to_le_bytes();
        let used = width.min(MAX_WIDTH);
        stream.extend_from_slice(&le[..used]);
        stream.resize(stream.len() + (width - used), 0);
        width
    }

    /// Zero-extend a little endian byte sequence. Only the first 8 bytes are
    /// significant.
    pub fn from_bytes(bytes: &[u8]) -> u64 {
        bytes
            .iter()
            .take(MAX_WIDTH)
            .rev()
            .fold(0, |acc, b| (acc << 8) | *b as u64)
    }

    /// Try to decode a number of 'width' bytes from the start of 'stream'.
    pub fn read(stream: &[u8], width: usize) -> Option<u64> {
        if stream.len() < width {
            return None;
        }
        Some(from_bytes(&stream[..width]))
    }

    /// Returns the number of bits needed to represent 'num'. Zero takes one
    /// bit.
    pub fn bit_length(num: u64) -> u32 {
        (64 - num.leading_zeros()).max(1)
    }

    /// Returns the minimal number of whole bytes that can hold 'num'.
    pub fn byte_width(num: u64) -> usize {
        (bit_length(num) as usize + 7) / 8
    }

    #[test]
    fn test_to_bytes() {
        assert_eq!(to_bytes(0x1234, 2), vec![0x34, 0x12]);
        assert_eq!(to_bytes(0x1234, 3), vec![0x34, 0x12, 0]);
        assert_eq!(to_bytes(0x123456, 1), vec![0x56]);
        assert_eq!(to_bytes(7, 0), Vec::<u8>::new());
        assert_eq!(to_bytes(u64::MAX, 10).len(), 10);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(from_bytes(&[0xaa]), 0xaa);
        assert_eq!(from_bytes(&[0x34, 0x12]), 0x1234);
        assert_eq!(from_bytes(&[0x56, 0x34, 0x12]), 0x123456);
        assert_eq!(from_bytes(&[0x9a, 0x78, 0x56, 0x34, 0x12]), 0x123456789a);
        assert_eq!(from_bytes(&[]), 0);
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 1);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(255), 8);
        assert_eq!(bit_length(256), 9);
        assert_eq!(bit_length(u64::MAX), 64);
        assert_eq!(byte_width(0), 1);
        assert_eq!(byte_width(255), 1);
        assert_eq!(byte_width(256), 2);
        assert_eq!(byte_width(u64::MAX), 8);
    }
}

/// Number theory helpers.
pub mod numeric {
    pub fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a
    }

    /// Returns the greatest common divisor of all of the values, or zero for
    /// an empty list.
    pub fn gcd_of(values: impl IntoIterator<Item = u64>) -> u64 {
        values.into_iter().fold(0, gcd)
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd_of([4, 8, 20]), 4);
        assert_eq!(gcd_of([7]), 7);
        assert_eq!(gcd_of([3, 5]), 1);
        assert_eq!(gcd_of(Vec::new()), 0);
    }
}
