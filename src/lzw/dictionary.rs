//! The LZW dictionary: an append-only trie over byte sequences.
//!
//! Nodes live in an arena and are addressed by their index, which is also the
//! order of creation. The 256 single-byte sequences are created first, so the
//! node at index 'i' for i in 0..256 is the sequence [i]. The root stands for
//! the empty sequence and is not addressable by index.
//!
//! Operations complexities:
//!  - put_sequence: O(m)
//!  - put_symbol: O(1)
//!  - contains: O(1)
//!  - find: O(m)
//!  - sequence_of: O(depth)

use rustc_hash::FxHashMap;

/// The number of single-byte sequences that every dictionary starts with.
pub const ALPHABET_SIZE: usize = 256;

/// Marks the root as the parent of an edge.
const ROOT: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// The byte that labels the edge from the parent.
    pub symbol: u8,
    /// The index of the parent, or None for the single-byte sequences that
    /// hang from the root.
    pub parent: Option<usize>,
    /// The length of the sequence that ends at this node.
    pub depth: usize,
}

#[derive(Clone, Debug)]
pub struct Dictionary {
    /// The nodes, in creation order.
    nodes: Vec<Node>,
    /// Maps (parent, symbol) to the index of the child.
    children: FxHashMap<(usize, u8), usize>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a dictionary with room for 'extra' entries on top of the
    /// single-byte sequences.
    pub fn with_capacity(extra: usize) -> Self {
        let total = ALPHABET_SIZE + extra;
        let mut dict = Self {
            nodes: Vec::with_capacity(total),
            children: FxHashMap::with_capacity_and_hasher(
                total,
                Default::default(),
            ),
        };
        for sym in 0..ALPHABET_SIZE {
            dict.add_child(None, sym as u8);
        }
        debug_assert_eq!(dict.len(), ALPHABET_SIZE);
        dict
    }

    /// Create the node 'parent' + 'symbol' and return its index. The edge
    /// must not exist.
    fn add_child(&mut self, parent: Option<usize>, symbol: u8) -> usize {
        let index = self.nodes.len();
        let depth = parent.map_or(0, |p| self.nodes[p].depth) + 1;
        let prev = self.children.insert((parent.unwrap_or(ROOT), symbol), index);
        debug_assert!(prev.is_none(), "Edge already exists");
        self.nodes.push(Node {
            symbol,
            parent,
            depth,
        });
        index
    }

    /// Returns the child of 'parent' (None for the root) that is labeled
    /// 'symbol'.
    pub fn child(&self, parent: Option<usize>, symbol: u8) -> Option<usize> {
        self.children
            .get(&(parent.unwrap_or(ROOT), symbol))
            .copied()
    }

    /// Add every missing prefix of 'seq' to the dictionary and return the
    /// index of the node that terminates the whole sequence. Existing prefixes
    /// are reused. The empty sequence has no index.
    pub fn put_sequence(&mut self, seq: &[u8]) -> Option<usize> {
        let mut curr = None;
        for &sym in seq {
            let next = match self.child(curr, sym) {
                Some(idx) => idx,
                None => self.add_child(curr, sym),
            };
            curr = Some(next);
        }
        curr
    }

    /// Create exactly one new child of the node at 'parent'. Returns the index
    /// of the new node, or None if 'parent' does not exist or if it already has a child
    /// for 'symbol'.
    pub fn put_symbol(&mut self, parent: usize, symbol: u8) -> Option<usize> {
        if !self.contains(parent) || self.child(Some(parent), symbol).is_some()
        {
            return None;
        }
        Some(self.add_child(Some(parent), symbol))
    }

    /// Checks whether a sequence with the given index exists.
    pub fn contains(&self, index: usize) -> bool {
        index < self.nodes.len()
    }

    /// Find the index of the node that terminates 'seq', or None if some
    /// prefix of the sequence is missing.
    pub fn find(&self, seq: &[u8]) -> Option<usize> {
        let mut curr = None;
        for &sym in seq {
            curr = Some(self.child(curr, sym)?);
        }
        curr
    }

    /// Returns the byte sequence that ends at 'index', or an empty sequence if
    /// the index was not assigned.
    pub fn sequence_of(&self, index: usize) -> Vec<u8> {
        let mut seq = Vec::new();
        if self.contains(index) {
            self.append_sequence(index, &mut seq);
        }
        seq
    }

    /// Append the sequence that ends at 'index' to 'output'. The index must
    /// exist.
    pub fn append_sequence(&self, index: usize, output: &mut Vec<u8>) {
        let depth = self.nodes[index].depth;
        let start = output.len();
        output.resize(start + depth, 0);

        // Walk to the root and fill the sequence from the back.
        let mut curr = Some(index);
        let mut pos = start + depth;
        while let Some(idx) = curr {
            let node = &self.nodes[idx];
            pos -= 1;
            output[pos] = node.symbol;
            curr = node.parent;
        }
        debug_assert_eq!(pos, start);
    }

    /// Returns the node at 'index'.
    pub fn entry(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Iterate over the entries that were added on top of the single-byte
    /// sequences, in creation order.
    pub fn new_entries(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes[ALPHABET_SIZE..].iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
