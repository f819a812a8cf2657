//! Unaligned bit storage. Bits are packed into bytes starting from the least
//! significant bit, and fields of any width may straddle byte boundaries.

#[derive(PartialEq, Debug, Default)]
pub struct BitWriter {
    /// Stores the packed bits. Bits above 'pos' in the last byte are zero.
    data: Vec<u8>,
    /// Points to the next free bit in the last byte. Zero means that a new
    /// byte must be allocated before the next bit is written.
    pos: u8,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter {
            data: Vec::new(),
            pos: 0,
        }
    }

    pub fn with_capacity(bytes: usize) -> BitWriter {
        BitWriter {
            data: Vec::with_capacity(bytes),
            pos: 0,
        }
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if self.pos == 0 {
            self.data.push(0);
        }
        if let Some(last) = self.data.last_mut() {
            *last |= (bit as u8) << self.pos;
        }
        self.pos = (self.pos + 1) % 8;
    }

    /// Push the lowest 'num' bits of 'bits', starting from bit zero.
    pub fn push_word(&mut self, bits: u64, num: usize) {
        debug_assert!(num <= 64, "Pushing too many bits");
        for i in 0..num {
            self.push_bit((bits >> i) & 1 == 1);
        }
    }

    /// Push every bit that 'bits' yields, in order.
    pub fn extend<I: IntoIterator<Item = bool>>(&mut self, bits: I) {
        for bit in bits {
            self.push_bit(bit);
        }
    }

    /// Returns the number of bits that were written.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.pos {
            0 => self.data.len() * 8,
            pos => (self.data.len() - 1) * 8 + pos as usize,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the packed bytes. The last byte is padded with zeros.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Reads bits in the order in which 'BitWriter' wrote them.
pub struct BitReader<'a> {
    /// The packed input.
    input: &'a [u8],
    /// Points to the byte that holds the next bit.
    cursor: usize,
    /// The index of the next bit inside the current byte.
    offset: u8,
}

impl<'a> BitReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            cursor: 0,
            offset: 0,
        }
    }

    /// Pop the next bit, or return None if the input is exhausted.
    #[must_use]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.input.get(self.cursor)?;
        let bit = (byte >> self.offset) & 1 == 1;
        self.offset += 1;
        if self.offset == 8 {
            self.offset = 0;
            self.cursor += 1;
        }
        Some(bit)
    }

    /// Read 'num' bits into a word. The first bit that is read becomes bit
    /// zero of the result.
    #[must_use]
    pub fn read_word(&mut self, num: usize) -> Option<u64> {
        debug_assert!(num <= 64, "Taking too many bits");
        let mut val = 0;
        for i in 0..num {
            val |= (self.read_bit()? as u64) << i;
        }
        Some(val)
    }

    /// Returns the number of bits that can still be read.
    pub fn remaining(&self) -> usize {
        (self.input.len() - self.cursor) * 8 - self.offset as usize
    }

    /// Returns the number of bytes that were touched, including a partially
    /// read byte.
    pub fn consumed(&self) -> usize {
        self.cursor + (self.offset > 0) as usize
    }
}
