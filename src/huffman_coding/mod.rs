//! The huffman module builds the code tree for huffpack and moves it in and out of the
//! compressed stream.
//!
//! huffpack uses one static tree for the whole file. The tree covers 257 symbols: the 256
//! byte values plus an end of stream marker, which is always counted exactly once so that
//! the decoder knows where the data stops without a stored length.
//!
//! - symbol_table: counts the input and merges the lightest subtrees into a tree.
//! - tree_codec: turns the tree into per-symbol codes, and writes/reads the tree header.
//!
pub mod symbol_table;
pub mod tree_codec;
