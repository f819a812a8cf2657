//! Construction of Huffman trees and their code tables.
//!
//! The encoder and the decoder build the tree from the same frequency table,
//! so the construction must be deterministic. Nodes are merged in the order
//! (frequency, symbol, creation index), where internal nodes use a symbol
//! value that sorts after every byte.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use bitvec::prelude::*;

use crate::bitstream::BitReader;

/// The symbol key of internal nodes.
const INTERNAL_SYMBOL: u16 = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(u8),
    Internal { left: usize, right: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// The sum of the frequencies of the leaves below this node. This is
    /// wider than the input counts so sums never overflow.
    pub frequency: u128,
    /// The index of the parent node, or None for the root.
    pub parent: Option<usize>,
    pub kind: NodeKind,
}

#[derive(Clone, Debug)]
pub struct HuffmanTree {
    /// The nodes, leaves first, in creation order.
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build the tree from a list of (symbol, frequency) pairs. Returns None
    /// if the table is empty.
    pub fn build(table: &[(u8, u64)]) -> Option<Self> {
        let mut nodes: Vec<Node> = Vec::with_capacity(table.len() * 2);
        let mut heap = BinaryHeap::with_capacity(table.len());

        for &(sym, freq) in table {
            heap.push(Reverse((freq as u128, sym as u16, nodes.len())));
            nodes.push(Node {
                frequency: freq as u128,
                parent: None,
                kind: NodeKind::Leaf(sym),
            });
        }

        while heap.len() > 1 {
            let Reverse((left_freq, _, left)) = heap.pop()?;
            let Reverse((right_freq, _, right)) = heap.pop()?;
            let idx = nodes.len();
            let frequency = left_freq + right_freq;
            nodes[left].parent = Some(idx);
            nodes[right].parent = Some(idx);
            nodes.push(Node {
                frequency,
                parent: None,
                kind: NodeKind::Internal { left, right },
            });
            heap.push(Reverse((frequency, INTERNAL_SYMBOL, idx)));
        }

        let Reverse((_, _, root)) = heap.pop()?;
        Some(Self { nodes, root })
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Returns the symbol of a tree that holds a single leaf. Such a tree
    /// assigns an empty codeword to its only symbol.
    pub fn single_symbol(&self) -> Option<u8> {
        match self.nodes[self.root].kind {
            NodeKind::Leaf(sym) => Some(sym),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Iterate over the (index, symbol) pairs of the leaves.
    pub fn leaves(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| match node.kind {
                NodeKind::Leaf(sym) => Some((idx, sym)),
                NodeKind::Internal { .. } => None,
            })
    }

    /// Returns the codeword of the leaf at 'idx', read from the root. Left
    /// edges are 1 and right edges are 0.
    pub fn codeword(&self, idx: usize) -> BitVec {
        let mut bits = BitVec::new();
        let mut curr = idx;
        while let Some(parent) = self.nodes[curr].parent {
            let is_left = matches!(
                self.nodes[parent].kind,
                NodeKind::Internal { left, .. } if left == curr
            );
            bits.push(is_left);
            curr = parent;
        }
        bits.reverse();
        bits
    }

    /// Build the table that maps every symbol to its codeword.
    pub fn code_table(&self) -> CodeTable {
        let mut codes = vec![None; 256];
        for (idx, sym) in self.leaves() {
            codes[sym as usize] = Some(self.codeword(idx));
        }
        CodeTable { codes }
    }

    /// Walk from the root, one bit at a time, until a leaf is reached and
    /// return its symbol. Returns None if the reader runs out of bits.
    pub fn read_symbol(&self, reader: &mut BitReader) -> Option<u8> {
        let mut curr = self.root;
        loop {
            match self.nodes[curr].kind {
                NodeKind::Leaf(sym) => return Some(sym),
                NodeKind::Internal { left, right } => {
                    curr = if reader.read_bit()? { left } else { right };
                }
            }
        }
    }
}

/// Maps symbols to their codewords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<BitVec>>,
}

impl CodeTable {
    /// Returns the codeword of 'sym', or None if the symbol is not in the
    /// tree.
    pub fn get(&self, sym: u8) -> Option<&BitSlice> {
        self.codes[sym as usize].as_deref()
    }

    /// Iterate over the (symbol, codeword) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(sym, code)| Some((sym as u8, code.as_deref()?)))
    }

    /// Returns the number of bits needed to encode 'hist'.
    pub fn encoded_bits(&self, hist: &[u64; 256]) -> u64 {
        self.iter()
            .map(|(sym, code)| hist[sym as usize] * code.len() as u64)
            .sum()
    }
}
