//! This module contains the entropy coders and the structures that they are built from.

pub mod hist;
pub mod huffman;
pub mod tree;
